//! Utility modules for common functionality
//!
//! This module provides logging, progress reporting and file handling used
//! around the extraction core.

pub mod logger;
pub mod progress;
pub mod file_utils;
