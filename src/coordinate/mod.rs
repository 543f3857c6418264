//! Coordinate handling for source images
//!
//! Pixels are addressed either by a flat row-major index or by an `(x, y)`
//! pair. The conversion functions here are the only place where the two
//! meet.

mod bbox;
mod point;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;

/// Convert a row-major pixel index into its `(x, y)` coordinate
///
/// # Panics
/// Panics if `width` is zero.
pub fn to_coords(index: usize, width: u32) -> Point {
    let width = width as usize;
    Point::new((index % width) as u32, (index / width) as u32)
}

/// Convert an `(x, y)` coordinate into its row-major pixel index
pub fn to_index(point: Point, width: u32) -> usize {
    point.y as usize * width as usize + point.x as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_maps_to_column_and_row() {
        assert_eq!(to_coords(0, 10), Point::new(0, 0));
        assert_eq!(to_coords(9, 10), Point::new(9, 0));
        assert_eq!(to_coords(10, 10), Point::new(0, 1));
        assert_eq!(to_coords(57, 10), Point::new(7, 5));
    }

    #[test]
    fn index_coordinate_round_trip_holds_for_every_pixel() {
        let (width, height) = (13u32, 7u32);
        for i in 0..(width * height) as usize {
            let point = to_coords(i, width);
            assert_eq!(to_index(point, width), i);
            assert_eq!(to_coords(to_index(point, width), width), point);
        }
    }
}
