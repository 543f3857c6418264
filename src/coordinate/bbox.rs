//! Bounding rectangle of a detected sub-image

use std::fmt;

use super::point::Point;
use crate::extractor::Region;

/// A rectangle in source-image pixel space
///
/// `bottom_right` is exclusive: it lies one column right of and one row below
/// the last pixel included in the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// First included pixel
    pub top_left: Point,
    /// One past the last included pixel in each axis
    pub bottom_right: Point,
}

impl BoundingBox {
    /// Create a new bounding box from its two corners
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        BoundingBox { top_left, bottom_right }
    }

    /// Get the width of the bounding box, zero if the corners are inverted
    pub fn width(&self) -> u32 {
        self.bottom_right.x.saturating_sub(self.top_left.x)
    }

    /// Get the height of the bounding box, zero if the corners are inverted
    pub fn height(&self) -> u32 {
        self.bottom_right.y.saturating_sub(self.top_left.y)
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether the corners describe a non-empty rectangle
    pub fn is_valid(&self) -> bool {
        self.top_left.x < self.bottom_right.x && self.top_left.y < self.bottom_right.y
    }

    /// Check if this bounding box contains a pixel
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.top_left.x && point.x < self.bottom_right.x &&
            point.y >= self.top_left.y && point.y < self.bottom_right.y
    }

    /// Convert to a pixel region usable for cropping
    pub fn to_region(&self) -> Region {
        Region::new(self.top_left.x, self.top_left.y, self.width(), self.height())
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {}) [{}x{}]",
               self.top_left.x, self.top_left.y,
               self.bottom_right.x, self.bottom_right.y,
               self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_use_exclusive_corner() {
        let bbox = BoundingBox::new(Point::new(10, 20), Point::new(70, 80));
        assert_eq!(bbox.width(), 60);
        assert_eq!(bbox.height(), 60);
        assert_eq!(bbox.area(), 3600);
        assert!(bbox.contains(&Point::new(69, 79)));
        assert!(!bbox.contains(&Point::new(70, 79)));
    }

    #[test]
    fn inverted_box_is_invalid_and_empty() {
        let bbox = BoundingBox::new(Point::new(30, 5), Point::new(0, 40));
        assert!(!bbox.is_valid());
        assert_eq!(bbox.width(), 0);
        assert_eq!(bbox.area(), 0);
    }

    #[test]
    fn converts_to_crop_region() {
        let region = BoundingBox::new(Point::new(3, 4), Point::new(13, 24)).to_region();
        assert_eq!((region.x, region.y, region.width, region.height), (3, 4, 10, 20));
        assert_eq!(region.end_x(), 13);
        assert_eq!(region.end_y(), 24);
    }
}
