//! Scan-to-files processing
//!
//! Ties the extraction core to the file system: decodes scans, runs the
//! extractor and hands the crops to the output helpers. Used by both the
//! CLI commands and the library facade.

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, info};

use crate::config::ScanConfig;
use crate::errors::CropResult;
use crate::extractor::{Detection, SubImage, SubImageExtractor};
use crate::utils::file_utils::{self, SaveOutcome};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Result of cropping every scan under an input path
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Directory the crops were written to
    pub output_dir: PathBuf,
    /// Outcome per scan, in processing order
    pub results: Vec<(PathBuf, SaveOutcome)>,
}

impl BatchReport {
    /// Number of crops written across all scans
    pub fn total_crops(&self) -> usize {
        self.results.iter().map(|(_, outcome)| outcome.count()).sum()
    }

    /// Scans in which nothing was found
    pub fn empty_scans(&self) -> impl Iterator<Item = &Path> {
        self.results.iter()
            .filter(|(_, outcome)| *outcome == SaveOutcome::NoContent)
            .map(|(path, _)| path.as_path())
    }
}

/// Crops scans with one configuration
pub struct BatchCropper<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
    /// Validated scan configuration
    config: &'a ScanConfig,
    /// Process scan lines on the rayon pool
    parallel: bool,
}

impl<'a> BatchCropper<'a> {
    /// Create a cropper
    ///
    /// # Arguments
    /// * `logger` - Logger for recording operations
    /// * `config` - Scan configuration, validated here
    ///
    /// # Returns
    /// A new BatchCropper or `InvalidConfig`
    pub fn new(logger: &'a Logger, config: &'a ScanConfig) -> CropResult<Self> {
        config.validate()?;
        Ok(BatchCropper {
            logger,
            config,
            parallel: false,
        })
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Decode a scan into an RGB buffer
    pub fn load_scan(&self, path: &Path) -> CropResult<RgbImage> {
        debug!("Decoding {}", path.display());
        let image = image::open(path)?.to_rgb8();
        debug!("Decoded {}: {}x{}", path.display(), image.width(), image.height());
        Ok(image)
    }

    /// Run the extractor over a decoded scan
    pub fn extract(&self, image: &RgbImage) -> Vec<SubImage> {
        let extractor = SubImageExtractor::new(image, self.config);
        if self.parallel {
            extractor.extract_parallel()
        } else {
            extractor.extract()
        }
    }

    /// Locate the pictures in a scan without cropping them
    pub fn detect_file(&self, path: &Path) -> CropResult<Vec<Detection>> {
        let image = self.load_scan(path)?;
        let detections = SubImageExtractor::new(&image, self.config).detect();

        let lines: Vec<(u32, String)> = detections.iter()
            .map(|d| (d.region, d.bounds.to_string()))
            .collect();
        self.logger.log_detections(&path.display().to_string(), &lines)?;

        Ok(detections)
    }

    /// Crop one scan into `output_dir`
    pub fn crop_file(&self, path: &Path, output_dir: &Path) -> CropResult<SaveOutcome> {
        let image = self.load_scan(path)?;
        let sub_images = self.extract(&image);
        // The source buffer is no longer needed once the crops exist.
        drop(image);

        let crops: Vec<&RgbImage> = sub_images.iter().map(|s| &s.image).collect();
        let outcome = file_utils::save_sub_images(path, output_dir, &crops)?;

        self.logger.log(&format!("{}: {} crop(s)", path.display(), outcome.count()))?;
        Ok(outcome)
    }

    /// Crop every scan under `input`
    ///
    /// # Arguments
    /// * `input` - A scan or a directory of scans
    /// * `output_dir` - Destination, defaults to `<input>_cropped`; must not exist
    /// * `show_progress` - Draw a progress bar over the scans
    pub fn crop_all(&self, input: &Path, output_dir: Option<&Path>,
                    show_progress: bool) -> CropResult<BatchReport> {
        let scans = file_utils::collect_images(input)?;

        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| file_utils::default_output_dir(input));
        file_utils::create_output_dir(&output_dir)?;
        info!("Cropping {} scan(s) into {}", scans.len(), output_dir.display());

        let progress = if show_progress {
            ProgressTracker::new(scans.len() as u64, "Cropping scans")
        } else {
            ProgressTracker::hidden()
        };

        let mut results = Vec::with_capacity(scans.len());
        for scan in scans {
            let name = scan.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            progress.set_message(&name);

            let outcome = self.crop_file(&scan, &output_dir)?;
            results.push((scan, outcome));
            progress.increment(1);
        }
        progress.finish();

        let report = BatchReport { output_dir, results };
        info!("Wrote {} crop(s) from {} scan(s)", report.total_crops(), report.results.len());
        Ok(report)
    }
}
