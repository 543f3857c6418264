//! Flat-index scanning over a decoded RGB buffer
//!
//! The extractor walks the source image through row-major pixel indices.
//! Every walk here has an explicit, reachable end index, so a scan never
//! leaves `[0, end_index]`. Indexing outside the buffer panics: it can only
//! happen if the caller broke the image dimension contract.

use image::{Rgb, RgbImage};

use super::lightness::LightnessClassifier;

/// Direction of an edge walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One pixel to the right per step
    Right,
    /// One row up per step
    Up,
    /// One row down per step
    Down,
}

/// A maximal horizontal span of content pixels, as inclusive indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

/// One sampled row of the source image, as inclusive indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLine {
    /// Position of this scan line among all scan lines
    pub region: u32,
    /// Index of the first pixel of the row
    pub start: usize,
    /// Index of the last pixel of the row
    pub end: usize,
}

/// Read-only view of a source image addressed by flat pixel index
pub struct Scanner<'a> {
    image: &'a RgbImage,
    width: usize,
    classifier: LightnessClassifier,
}

impl<'a> Scanner<'a> {
    /// Create a scanner
    ///
    /// # Arguments
    /// * `image` - Source image, left untouched for the scanner's lifetime
    /// * `classifier` - Background/content classification to apply
    pub fn new(image: &'a RgbImage, classifier: LightnessClassifier) -> Self {
        Scanner {
            image,
            width: image.width() as usize,
            classifier,
        }
    }

    /// Pixel at a row-major index
    pub fn pixel(&self, index: usize) -> Rgb<u8> {
        let offset = index * 3;
        let raw = &self.image.as_raw()[offset..offset + 3];
        Rgb([raw[0], raw[1], raw[2]])
    }

    pub fn is_content(&self, index: usize) -> bool {
        self.classifier.is_content(&self.pixel(index))
    }

    /// Find the first content pixel in `[from, scan_end)`
    ///
    /// The walk stops on reaching `scan_end` without inspecting it, so the
    /// last pixel of a scan line never starts a run on its own.
    ///
    /// # Returns
    /// Index of the content pixel, or `None` if only background was found
    pub fn find_content(&self, from: usize, scan_end: usize) -> Option<usize> {
        let mut i = from;
        while i < scan_end {
            if self.is_content(i) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Walk from `start` while pixels are content
    ///
    /// # Arguments
    /// * `start` - Content pixel the walk begins from
    /// * `end` - Last index the walk may reach; must be reachable from
    ///   `start` in whole steps of `direction`
    /// * `direction` - Step direction
    ///
    /// # Returns
    /// The last content pixel before background, or `end` when no background
    /// is met before the boundary
    pub fn find_edge(&self, start: usize, end: usize, direction: Direction) -> usize {
        if start == end {
            return end;
        }

        let mut previous = start;
        let mut i = self.step(start, direction);
        loop {
            if !self.is_content(i) {
                return previous;
            }
            if i == end {
                return end;
            }
            previous = i;
            i = self.step(i, direction);
        }
    }

    /// Expand a content pixel into the run it belongs to, bounded by the scan line
    pub fn run_from(&self, start: usize, scan_end: usize) -> Run {
        Run {
            start,
            end: self.find_edge(start, scan_end, Direction::Right),
        }
    }

    fn step(&self, index: usize, direction: Direction) -> usize {
        match direction {
            Direction::Right => index + 1,
            Direction::Up => index - self.width,
            Direction::Down => index + self.width,
        }
    }
}
