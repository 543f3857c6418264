//! Crop command
//!
//! This module implements the default command: crop every scan under the
//! input path and write the pictures to the output directory.

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::batch::BatchCropper;
use crate::commands::command_traits::Command;
use crate::config::ScanConfig;
use crate::errors::CropResult;
use crate::utils::logger::Logger;

/// Command for cropping scans to files
pub struct CropCommand<'a> {
    /// Scan file or directory of scans
    input: PathBuf,
    /// Destination directory, `None` for `<input>_cropped`
    output_dir: Option<PathBuf>,
    /// Scan configuration
    config: ScanConfig,
    /// Process scan lines in parallel
    parallel: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CropCommand<'a> {
    /// Create a new crop command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new CropCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CropResult<Self> {
        let input = super::input_path(args)?;
        info!("Input: {}", input.display());

        let output_dir = args.get_one::<String>("output").map(PathBuf::from);
        info!("Output directory: {:?}", output_dir);

        let config = super::scan_config(args)?;
        let parallel = args.get_flag("parallel");

        Ok(CropCommand {
            input,
            output_dir,
            config,
            parallel,
            logger,
        })
    }
}

impl<'a> Command for CropCommand<'a> {
    fn execute(&self) -> CropResult<()> {
        info!("Cropping scans from {}", self.input.display());

        let cropper = BatchCropper::new(self.logger, &self.config)?.with_parallel(self.parallel);
        let report = cropper.crop_all(&self.input, self.output_dir.as_deref(), true)?;

        for scan in report.empty_scans() {
            info!("No croppable images found in {}", scan.display());
        }

        let summary = format!("Cropped {} picture(s) from {} scan(s) into {}",
                              report.total_crops(), report.results.len(), report.output_dir.display());
        info!("{}", summary);
        self.logger.log(&summary)?;

        Ok(())
    }
}
