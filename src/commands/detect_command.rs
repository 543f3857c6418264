//! Detection report command
//!
//! Prints the rectangles the extractor finds in each scan, without writing
//! any picture. Useful for tuning the threshold and scan line count.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, warn};

use crate::batch::BatchCropper;
use crate::commands::command_traits::Command;
use crate::config::ScanConfig;
use crate::errors::CropResult;
use crate::utils::file_utils;
use crate::utils::logger::Logger;

/// Command for reporting detected pictures
pub struct DetectCommand<'a> {
    /// Scan file or directory of scans
    input: PathBuf,
    /// Scan configuration
    config: ScanConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> DetectCommand<'a> {
    /// Create a new detect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CropResult<Self> {
        let input = super::input_path(args)?;
        let config = super::scan_config(args)?;

        Ok(DetectCommand {
            input,
            config,
            logger,
        })
    }

    /// Format the report for one scan
    fn describe(name: &str, detections: &[crate::extractor::Detection]) -> String {
        let mut result = format!("{}: {} picture(s)\n", name, detections.len());
        for (i, detection) in detections.iter().enumerate() {
            result.push_str(&format!("  #{} scan line {}: {}\n",
                                     i + 1, detection.region, detection.bounds));
        }
        result
    }
}

impl<'a> Command for DetectCommand<'a> {
    fn execute(&self) -> CropResult<()> {
        let cropper = BatchCropper::new(self.logger, &self.config)?;
        let scans = file_utils::collect_images(&self.input)?;

        if scans.is_empty() {
            warn!("No scans found in {}", self.input.display());
        }

        for scan in &scans {
            let detections = cropper.detect_file(scan)?;
            let name = scan.display().to_string();
            if detections.is_empty() {
                info!("No croppable images found in {}", name);
            }
            print!("{}", Self::describe(&name, &detections));
        }

        Ok(())
    }
}
