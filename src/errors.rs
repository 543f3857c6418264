//! Custom error types for scan cropping

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised around the extraction core
///
/// The detection algorithm itself never fails on well-formed input; these
/// variants cover configuration, file discovery and persistence.
#[derive(Debug)]
pub enum CropError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// Scan configuration rejected before extraction
    InvalidConfig(String),
    /// Input file or directory does not exist
    InputNotFound(PathBuf),
    /// Output directory already exists
    OutputExists(PathBuf),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::IoError(e) => write!(f, "I/O error: {}", e),
            CropError::ImageError(e) => write!(f, "Image error: {}", e),
            CropError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            CropError::InputNotFound(path) => write!(f, "Input does not exist: {}", path.display()),
            CropError::OutputExists(path) => write!(f, "Output directory already exists: {}", path.display()),
            CropError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CropError::IoError(e) => Some(e),
            CropError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CropError {
    fn from(error: io::Error) -> Self {
        CropError::IoError(error)
    }
}

impl From<image::ImageError> for CropError {
    fn from(error: image::ImageError) -> Self {
        CropError::ImageError(error)
    }
}

impl From<String> for CropError {
    fn from(msg: String) -> Self {
        CropError::GenericError(msg)
    }
}

/// Result type for cropping operations
pub type CropResult<T> = Result<T, CropError>;
