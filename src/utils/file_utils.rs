//! Scan discovery and output file handling
//!
//! Helpers around the extraction core: finding the scans to process,
//! creating the output directory, naming cropped pictures and writing them.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use log::{debug, info};

use crate::errors::{CropError, CropResult};

/// Suffix appended to the input name to form the output directory
pub const OUTPUT_DIR_SUFFIX: &str = "_cropped";

/// What happened when saving the crops of one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The scan held no croppable picture; nothing was written
    NoContent,
    /// Paths of the written pictures, in extraction order
    Saved(Vec<PathBuf>),
}

impl SaveOutcome {
    /// Number of pictures written
    pub fn count(&self) -> usize {
        match self {
            SaveOutcome::NoContent => 0,
            SaveOutcome::Saved(paths) => paths.len(),
        }
    }
}

/// Whether the path has an extension the image crate can decode
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// List the scans to process
///
/// # Arguments
/// * `input` - A scan file or a directory of scans
///
/// # Returns
/// The file itself, or the directory's image files sorted by name
/// (non-recursive). `InputNotFound` if the path does not exist.
pub fn collect_images(input: &Path) -> CropResult<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(CropError::InputNotFound(input.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if is_supported_image(&path) {
            images.push(path);
        } else {
            debug!("Skipping non-image file {}", path.display());
        }
    }
    images.sort();

    info!("Found {} scan(s) in {}", images.len(), input.display());
    Ok(images)
}

/// Default output directory for an input path
///
/// `scans/` gives `scans_cropped/`; `scans/page.png` gives
/// `scans/page_cropped/`.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let base = if input.is_file() {
        input.file_stem()
    } else {
        input.file_name()
    };

    let mut name = base.map(OsString::from).unwrap_or_else(|| OsString::from("scan"));
    name.push(OUTPUT_DIR_SUFFIX);
    input.with_file_name(name)
}

/// Create the output directory, refusing to reuse an existing one
pub fn create_output_dir(dir: &Path) -> CropResult<()> {
    if dir.exists() {
        return Err(CropError::OutputExists(dir.to_path_buf()));
    }
    fs::create_dir_all(dir)?;
    debug!("Created output directory {}", dir.display());
    Ok(())
}

/// File names for the crops of one scan
///
/// A single crop keeps the scan's file name. Several crops are numbered from
/// 1 ahead of the extension: `page_1.png`, `page_2.png`, ...
pub fn output_names(file_name: &str, count: usize) -> Vec<String> {
    if count == 1 {
        return vec![file_name.to_string()];
    }

    let path = Path::new(file_name);
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..=count)
        .map(|i| match &extension {
            Some(ext) => format!("{}_{}.{}", stem, i, ext),
            None => format!("{}_{}", stem, i),
        })
        .collect()
}

/// Write the crops of one scan into `output_dir`
///
/// # Arguments
/// * `source` - Path of the scan the crops came from
/// * `output_dir` - Existing directory to write into
/// * `images` - Crops in extraction order
pub fn save_sub_images(source: &Path, output_dir: &Path, images: &[&RgbImage]) -> CropResult<SaveOutcome> {
    let file_name = source.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CropError::GenericError(format!("Invalid scan path: {}", source.display())))?;

    if images.is_empty() {
        info!("No croppable images found in {}", file_name);
        return Ok(SaveOutcome::NoContent);
    }

    let mut written = Vec::with_capacity(images.len());
    for (name, image) in output_names(&file_name, images.len()).iter().zip(images) {
        let path = output_dir.join(name);
        image.save(&path)?;
        debug!("Saved {}x{} crop to {}", image.width(), image.height(), path.display());
        written.push(path);
    }

    info!("Saved {} crop(s) from {}", written.len(), file_name);
    Ok(SaveOutcome::Saved(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn single_crop_keeps_original_name() {
        assert_eq!(output_names("scan.png", 1), vec!["scan.png"]);
    }

    #[test]
    fn multiple_crops_are_numbered_before_extension() {
        assert_eq!(output_names("scan.01.png", 3),
                   vec!["scan.01_1.png", "scan.01_2.png", "scan.01_3.png"]);
        assert_eq!(output_names("scan", 2), vec!["scan_1", "scan_2"]);
        assert!(output_names("scan.png", 0).is_empty());
    }

    #[test]
    fn collect_images_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let images = collect_images(dir.path()).unwrap();
        let names: Vec<_> = images.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn collect_images_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(collect_images(&missing), Err(CropError::InputNotFound(_))));
    }

    #[test]
    fn output_dir_sits_next_to_input() {
        let dir = TempDir::new().unwrap();
        let scans = dir.path().join("scans");
        fs::create_dir(&scans).unwrap();
        let page = scans.join("page.png");
        fs::write(&page, b"").unwrap();

        assert_eq!(default_output_dir(&scans), dir.path().join("scans_cropped"));
        assert_eq!(default_output_dir(&page), scans.join("page_cropped"));
    }

    #[test]
    fn existing_output_dir_is_refused() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        create_output_dir(&out).unwrap();
        assert!(matches!(create_output_dir(&out), Err(CropError::OutputExists(_))));
    }

    #[test]
    fn save_reports_no_content() {
        let dir = TempDir::new().unwrap();
        let outcome = save_sub_images(Path::new("scan.png"), dir.path(), &[]).unwrap();
        assert_eq!(outcome, SaveOutcome::NoContent);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_writes_numbered_files() {
        let dir = TempDir::new().unwrap();
        let a = RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]));
        let b = RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]));

        let outcome = save_sub_images(Path::new("in/scan.png"), dir.path(), &[&a, &b]).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(vec![
            dir.path().join("scan_1.png"),
            dir.path().join("scan_2.png"),
        ]));
        let reread = image::open(dir.path().join("scan_1.png")).unwrap().to_rgb8();
        assert_eq!(reread, a);
    }
}
