pub mod errors;
pub mod config;
pub mod coordinate;
pub mod extractor;
pub mod utils;
pub mod batch;
pub mod commands;
pub mod api;

pub use crate::api::ScanCrop;

pub use config::ScanConfig;
pub use errors::{CropError, CropResult};
pub use extractor::{Detection, Region, SubImage, SubImageExtractor};
pub use coordinate::{BoundingBox, Point};
pub use utils::file_utils::SaveOutcome;
