use std::path::Path;

use image::RgbImage;

use crate::batch::{BatchCropper, BatchReport};
use crate::config::ScanConfig;
use crate::errors::CropResult;
use crate::extractor::{Detection, SubImage, SubImageExtractor};
use crate::utils::file_utils::SaveOutcome;
use crate::utils::logger::Logger;

/// Main interface to the scancrop library
pub struct ScanCrop {
    logger: Logger,
    config: ScanConfig,
    parallel: bool,
}

impl ScanCrop {
    /// Create a new ScanCrop instance
    ///
    /// # Arguments
    /// * `config` - Scan configuration; rejected here if invalid
    /// * `log_file` - Optional path to log file, defaults to "scancrop.log"
    ///
    /// # Returns
    /// A ScanCrop instance or an error if initialization fails
    pub fn new(config: ScanConfig, log_file: Option<&Path>) -> CropResult<Self> {
        config.validate()?;
        let log_path = log_file.unwrap_or_else(|| Path::new("scancrop.log"));
        let logger = Logger::new(log_path)?;
        Ok(ScanCrop { logger, config, parallel: false })
    }

    /// Process the scan lines of each image on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Extract the pictures from an already decoded scan
    pub fn crop_image(&self, image: &RgbImage) -> Vec<SubImage> {
        let extractor = SubImageExtractor::new(image, &self.config);
        if self.parallel {
            extractor.extract_parallel()
        } else {
            extractor.extract()
        }
    }

    /// Locate the pictures in a scan file without writing anything
    pub fn detect(&self, input_path: &Path) -> CropResult<Vec<Detection>> {
        self.cropper()?.detect_file(input_path)
    }

    /// Crop one scan file into an existing directory
    ///
    /// # Returns
    /// `SaveOutcome::NoContent` if the scan held no picture, otherwise the
    /// written paths
    pub fn crop_file(&self, input_path: &Path, output_dir: &Path) -> CropResult<SaveOutcome> {
        self.cropper()?.crop_file(input_path, output_dir)
    }

    /// Crop a scan or a directory of scans into a new output directory
    ///
    /// # Arguments
    /// * `input_path` - Scan file or directory of scans
    /// * `output_dir` - Destination, defaults to `<input>_cropped`
    pub fn crop_path(&self, input_path: &Path, output_dir: Option<&Path>) -> CropResult<BatchReport> {
        self.cropper()?.crop_all(input_path, output_dir, false)
    }

    fn cropper(&self) -> CropResult<BatchCropper<'_>> {
        Ok(BatchCropper::new(&self.logger, &self.config)?.with_parallel(self.parallel))
    }
}
