//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod crop_command;
pub mod detect_command;

pub use command_traits::{Command, CommandFactory};
pub use crop_command::CropCommand;
pub use detect_command::DetectCommand;

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::info;

use crate::config::ScanConfig;
use crate::errors::{CropError, CropResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct ScancropCommandFactory;

impl ScancropCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ScancropCommandFactory
    }
}

impl Default for ScancropCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ScancropCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CropResult<Box<dyn Command + 'a>> {
        if args.get_flag("detect") {
            Ok(Box::new(DetectCommand::new(args, logger)?))
        } else {
            // Default to cropping
            Ok(Box::new(CropCommand::new(args, logger)?))
        }
    }
}

/// Read the required input path argument
pub(crate) fn input_path(args: &ArgMatches) -> CropResult<PathBuf> {
    args.get_one::<String>("input")
        .map(PathBuf::from)
        .ok_or_else(|| CropError::GenericError("Missing input path".to_string()))
}

fn given_on_command_line(args: &ArgMatches, id: &str) -> bool {
    matches!(args.value_source(id), Some(ValueSource::CommandLine))
}

/// Build the scan configuration from the optional config file and CLI flags
///
/// Defaults come first, then the `--config` file, then any flag given
/// explicitly on the command line.
pub(crate) fn scan_config(args: &ArgMatches) -> CropResult<ScanConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ScanConfig::from_file(path)?
        }
        None => ScanConfig::default(),
    };

    // Clap defaults only apply when no config file supplied the value.
    let has_file = args.get_one::<String>("config").is_some();
    let take = |id: &str| !has_file || given_on_command_line(args, id);

    if take("regions") {
        if let Some(regions) = args.get_one::<u32>("regions") {
            config.regions = *regions;
        }
    }
    if take("minl") {
        if let Some(threshold) = args.get_one::<f64>("minl") {
            config.lightness_threshold = *threshold;
        }
    }
    if take("sdpi") {
        if let Some(dpi) = args.get_one::<u32>("sdpi") {
            config.scanner_dpi = *dpi;
        }
    }
    if take("ppi") {
        if let Some(ppi) = args.get_one::<u32>("ppi") {
            config.picture_ppi = *ppi;
        }
    }
    if args.get_flag("no-resize") {
        config.resize = false;
    }

    config.validate()?;
    info!("Scan configuration: {:?}", config);
    Ok(config)
}
