//! Pixel coordinate in source-image space

/// A pixel position, (0,0) being the top-left corner of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column (pixels from left)
    pub x: u32,
    /// Row (pixels from top)
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }

    /// Point shifted by the given column and row offsets
    pub fn offset(&self, dx: u32, dy: u32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Point::new(x, y)
    }
}
