//! Detection and extraction of sub-images from a flatbed scan
//!
//! A scan is sampled along evenly spaced horizontal lines. On each line,
//! every run of content pixels is grown into a rectangle by probing upward
//! and downward from the run's midpoint column. Rectangles smaller than a
//! quarter of the scan in either dimension are treated as noise.
//!
//! Scan lines are independent of one another, so a picture crossing several
//! lines is reported once per line.

use image::RgbImage;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::ScanConfig;
use crate::coordinate::{to_coords, BoundingBox};

use super::lightness::LightnessClassifier;
use super::resample;
use super::scanner::{Direction, Run, ScanLine, Scanner};

/// A picture found in the scan
#[derive(Debug, Clone)]
pub struct SubImage {
    /// Scan line that found the picture
    pub region: u32,
    /// Bounds in source-image pixels
    pub bounds: BoundingBox,
    /// Cropped, possibly rescaled, pixels
    pub image: RgbImage,
}

/// A rectangle found on a scan line, before cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Scan line that found the rectangle
    pub region: u32,
    /// Bounds in source-image pixels
    pub bounds: BoundingBox,
}

/// Extracts the pictures embedded in one scanned image
pub struct SubImageExtractor<'a> {
    image: &'a RgbImage,
    scanner: Scanner<'a>,
    width: u32,
    height: u32,
    regions: u32,
    /// Smallest accepted rectangle area, in pixels
    min_pixels: f64,
    /// Smallest accepted rectangle width, in pixels
    min_width: f64,
    /// Smallest accepted rectangle height, in pixels
    min_height: f64,
    /// Vertical offset of the first scan line
    y_start: f64,
    /// Index of the last pixel
    end_index: usize,
    resize_ratio: Option<f64>,
}

impl<'a> SubImageExtractor<'a> {
    /// Create an extractor for one source image
    ///
    /// # Arguments
    /// * `image` - Decoded source image, read-only during extraction
    /// * `config` - Validated scan configuration
    pub fn new(image: &'a RgbImage, config: &ScanConfig) -> Self {
        let (width, height) = image.dimensions();
        let total_pixels = width as usize * height as usize;
        let regions = config.regions.max(1);

        SubImageExtractor {
            image,
            scanner: Scanner::new(image, LightnessClassifier::new(config.lightness_threshold)),
            width,
            height,
            regions,
            min_pixels: config.min_px_rate * total_pixels as f64,
            min_width: config.min_dimension_rate * width as f64,
            min_height: config.min_dimension_rate * height as f64,
            y_start: height as f64 / (regions as f64 * 2.0),
            end_index: total_pixels.saturating_sub(1),
            resize_ratio: config.resize_ratio(),
        }
    }

    /// The sampled rows, top to bottom
    pub fn scan_lines(&self) -> Vec<ScanLine> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }

        let width = self.width as usize;
        (0..self.regions)
            .map(|region| {
                let row = (self.y_start * (2 * region + 1) as f64).floor() as usize;
                let start = width * row;
                ScanLine { region, start, end: start + width - 1 }
            })
            .collect()
    }

    /// Find the accepted rectangles on every scan line, in discovery order
    pub fn detect(&self) -> Vec<Detection> {
        self.scan_lines()
            .iter()
            .flat_map(|line| self.detect_on_line(line))
            .collect()
    }

    /// Detect, crop and rescale every picture in the scan
    ///
    /// # Returns
    /// One sub-image per accepted rectangle, ordered by scan line and then
    /// left to right. Empty when the scan holds no content.
    pub fn extract(&self) -> Vec<SubImage> {
        let sub_images: Vec<SubImage> = self.detect()
            .into_iter()
            .map(|detection| self.crop(detection))
            .collect();

        info!("Extracted {} sub-image(s) from {}x{} scan",
              sub_images.len(), self.width, self.height);
        sub_images
    }

    /// Same as [`extract`](Self::extract), with scan lines processed on the rayon pool
    pub fn extract_parallel(&self) -> Vec<SubImage> {
        let per_line: Vec<Vec<SubImage>> = self.scan_lines()
            .par_iter()
            .map(|line| {
                self.detect_on_line(line)
                    .into_iter()
                    .map(|detection| self.crop(detection))
                    .collect()
            })
            .collect();

        let sub_images: Vec<SubImage> = per_line.into_iter().flatten().collect();
        info!("Extracted {} sub-image(s) from {}x{} scan",
              sub_images.len(), self.width, self.height);
        sub_images
    }

    /// Walk one scan line left to right, bounding every run of content
    pub fn detect_on_line(&self, line: &ScanLine) -> Vec<Detection> {
        let mut detections = Vec::new();
        let mut cursor = line.start;

        while cursor < line.end {
            let Some(start) = self.scanner.find_content(cursor, line.end) else {
                break;
            };

            let run = self.scanner.run_from(start, line.end);
            match self.bound_run(&run, line) {
                Some(bounds) => {
                    debug!("Scan line {}: accepted {}", line.region, bounds);
                    detections.push(Detection { region: line.region, bounds });
                }
                None => debug!("Scan line {}: discarded run {}..={}",
                               line.region, run.start, run.end),
            }

            cursor = run.end + 1;
        }

        detections
    }

    /// Grow a horizontal run into a rectangle by probing its midpoint column
    ///
    /// # Returns
    /// The rectangle, or `None` if it is too small to be a picture
    pub fn bound_run(&self, run: &Run, line: &ScanLine) -> Option<BoundingBox> {
        let width = self.width as usize;

        let start_dist = (run.end - run.start) / 2;
        let midpoint = run.start + start_dist;
        let midpoint_x = midpoint - line.start;
        let end_dist = run.end - midpoint;

        let top = self.scanner.find_edge(midpoint, midpoint_x, Direction::Up);
        let bottom_limit = self.end_index - (width - midpoint_x - 1);
        let bottom = self.scanner.find_edge(midpoint, bottom_limit, Direction::Down);

        let top_left = to_coords(top - start_dist, self.width);
        let bottom_right = to_coords(bottom + end_dist, self.width).offset(1, 1);
        let bounds = BoundingBox::new(top_left, bottom_right);

        self.accepts(&bounds).then_some(bounds)
    }

    /// Size filter applied to every candidate rectangle
    pub fn accepts(&self, bounds: &BoundingBox) -> bool {
        bounds.is_valid()
            && bounds.width() as f64 >= self.min_width
            && bounds.height() as f64 >= self.min_height
            && bounds.area() as f64 >= self.min_pixels
    }

    fn crop(&self, detection: Detection) -> SubImage {
        let image = resample::crop_and_resize(
            self.image, &detection.bounds.to_region(), self.resize_ratio);
        SubImage {
            region: detection.region,
            bounds: detection.bounds,
            image,
        }
    }
}
