//! Sub-image extraction from flatbed scans
//!
//! This module provides lightness classification, flat-index scanning,
//! rectangle bounding and crop/resample production.

mod region;
mod lightness;
mod scanner;
mod resample;
mod sub_image_extractor;
#[cfg(test)]
mod tests;

// Public exports
pub use region::Region;
pub use lightness::{lightness, threshold_from_fraction, LightnessClassifier, MAX_COMPONENT};
pub use scanner::{Direction, Run, ScanLine, Scanner};
pub use resample::{crop, crop_and_resize, RESAMPLE_FILTER};
pub use sub_image_extractor::{Detection, SubImage, SubImageExtractor};
