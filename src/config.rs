//! Scan configuration
//!
//! Every tunable of the extractor lives in [`ScanConfig`]. Values start from
//! the defaults below, may be overlaid from a TOML file, and are finally
//! overridden by command-line flags. The extractor only ever sees a
//! validated configuration.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::errors::{CropError, CropResult};

/// Default lightness threshold, as a fraction of the maximum component value
pub const DEFAULT_LIGHTNESS_THRESHOLD: f64 = 0.95;
/// Default number of horizontal scan lines
pub const DEFAULT_REGIONS: u32 = 2;
/// Default scanner resolution in dots per inch
pub const DEFAULT_SCANNER_DPI: u32 = 600;
/// Default output picture resolution in pixels per inch
pub const DEFAULT_PICTURE_PPI: u32 = 300;
/// Minimum accepted region area as a fraction of the source pixel count.
/// A ~75000 px scan needs ~100 px per region.
pub const DEFAULT_MIN_PX_RATE: f64 = 1.0 / 750.0;
/// Minimum accepted rectangle side as a fraction of the source side
pub const DEFAULT_MIN_DIMENSION_RATE: f64 = 0.25;

/// Parameters for one extraction pass
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Lightness threshold in `[0, 1]`; pixels at or above are background
    pub lightness_threshold: f64,
    /// Number of evenly spaced horizontal scan lines
    pub regions: u32,
    /// Whether crops are rescaled by `picture_ppi / scanner_dpi`
    pub resize: bool,
    /// Resolution the source was scanned at
    pub scanner_dpi: u32,
    /// Resolution wanted for the output pictures
    pub picture_ppi: u32,
    /// Minimum accepted region area as a fraction of total pixels
    pub min_px_rate: f64,
    /// Minimum accepted rectangle side as a fraction of the source side
    pub min_dimension_rate: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            lightness_threshold: DEFAULT_LIGHTNESS_THRESHOLD,
            regions: DEFAULT_REGIONS,
            resize: true,
            scanner_dpi: DEFAULT_SCANNER_DPI,
            picture_ppi: DEFAULT_PICTURE_PPI,
            min_px_rate: DEFAULT_MIN_PX_RATE,
            min_dimension_rate: DEFAULT_MIN_DIMENSION_RATE,
        }
    }
}

impl ScanConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.lightness_threshold = threshold;
        self
    }

    pub fn with_regions(mut self, regions: u32) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_resize(mut self, resize: bool) -> Self {
        self.resize = resize;
        self
    }

    /// Set the scanner DPI and picture PPI the rescale ratio derives from
    pub fn with_resolution(mut self, scanner_dpi: u32, picture_ppi: u32) -> Self {
        self.scanner_dpi = scanner_dpi;
        self.picture_ppi = picture_ppi;
        self
    }

    pub fn with_min_px_rate(mut self, rate: f64) -> Self {
        self.min_px_rate = rate;
        self
    }

    pub fn with_min_dimension_rate(mut self, rate: f64) -> Self {
        self.min_dimension_rate = rate;
        self
    }

    /// Rescale ratio applied to every crop, `None` when resizing is off
    pub fn resize_ratio(&self) -> Option<f64> {
        if self.resize {
            Some(self.picture_ppi as f64 / self.scanner_dpi as f64)
        } else {
            None
        }
    }

    /// Reject configurations the extractor cannot work with
    ///
    /// # Returns
    /// The configuration itself when valid, or `CropError::InvalidConfig`
    pub fn validate(&self) -> CropResult<&Self> {
        if self.regions == 0 {
            return Err(CropError::InvalidConfig("regions must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.lightness_threshold) {
            return Err(CropError::InvalidConfig(format!(
                "lightness threshold must be within [0, 1], got {}", self.lightness_threshold)));
        }
        if !(0.0..1.0).contains(&self.min_px_rate) {
            return Err(CropError::InvalidConfig(format!(
                "minimum area rate must be within [0, 1), got {}", self.min_px_rate)));
        }
        if !(0.0..=1.0).contains(&self.min_dimension_rate) {
            return Err(CropError::InvalidConfig(format!(
                "minimum dimension rate must be within [0, 1], got {}", self.min_dimension_rate)));
        }
        if self.resize && (self.scanner_dpi == 0 || self.picture_ppi == 0) {
            return Err(CropError::InvalidConfig(
                "scanner DPI and picture PPI must be positive when resizing".to_string()));
        }
        Ok(self)
    }

    /// Load a configuration file on top of the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> CropResult<Self> {
        let path = path.as_ref();
        debug!("Loading scan configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::default().merge_toml(&content)
    }

    /// Overlay the keys of a TOML document onto this configuration
    ///
    /// Recognized keys: `threshold`, `regions`, `resize`, `dpi`, `ppi`,
    /// `min_px_rate`, `min_dimension_rate`. Unknown keys are skipped with a
    /// warning.
    pub fn merge_toml(mut self, content: &str) -> CropResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| CropError::InvalidConfig(format!("Failed to parse configuration: {}", e)))?;

        let table = toml_value.as_table()
            .ok_or_else(|| CropError::InvalidConfig("configuration must be a table".to_string()))?;

        for (key, value) in table {
            match key.as_str() {
                "threshold" => self.lightness_threshold = read_float(key, value)?,
                "regions" => self.regions = read_unsigned(key, value)?,
                "resize" => {
                    self.resize = value.as_bool().ok_or_else(|| type_error(key, "a boolean"))?
                }
                "dpi" => self.scanner_dpi = read_unsigned(key, value)?,
                "ppi" => self.picture_ppi = read_unsigned(key, value)?,
                "min_px_rate" => self.min_px_rate = read_float(key, value)?,
                "min_dimension_rate" => self.min_dimension_rate = read_float(key, value)?,
                _ => warn!("Ignoring unknown configuration key: {}", key),
            }
        }

        Ok(self)
    }
}

fn type_error(key: &str, expected: &str) -> CropError {
    CropError::InvalidConfig(format!("'{}' must be {}", key, expected))
}

// Integers are accepted where floats are expected, so `threshold = 1` works.
fn read_float(key: &str, value: &toml::Value) -> CropResult<f64> {
    match value {
        toml::Value::Float(f) => Ok(*f),
        toml::Value::Integer(i) => Ok(*i as f64),
        _ => Err(type_error(key, "a number")),
    }
}

fn read_unsigned(key: &str, value: &toml::Value) -> CropResult<u32> {
    value.as_integer()
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| type_error(key, "a non-negative integer"))
}
