//! Region structure for defining a crop area
//!
//! A Region is the crop-friendly form of a bounding box: top-left corner
//! plus dimensions, in pixels, with (0,0) at the top-left of the source.

/// Region for cropping (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    ///
    /// # Arguments
    /// * `x` - X-coordinate of the top-left corner
    /// * `y` - Y-coordinate of the top-left corner
    /// * `width` - Width of the region in pixels
    /// * `height` - Height of the region in pixels
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    /// Dimensions after scaling by `ratio`, rounded down to whole pixels
    ///
    /// # Arguments
    /// * `ratio` - Scale factor, e.g. target PPI over scanner DPI
    ///
    /// # Returns
    /// `(floor(width * ratio), floor(height * ratio))`
    pub fn scaled_dimensions(&self, ratio: f64) -> (u32, u32) {
        (
            (self.width as f64 * ratio).floor() as u32,
            (self.height as f64 * ratio).floor() as u32,
        )
    }
}
