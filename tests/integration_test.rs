//! Integration tests for cropping scans on disk

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use scancrop::{CropError, SaveOutcome, ScanConfig, ScanCrop};

const PAPER: Rgb<u8> = Rgb([250, 250, 250]);
const PHOTO: Rgb<u8> = Rgb([90, 60, 30]);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 200x100 scan with a 60x60 picture on the left and, optionally, the right
fn write_scan(path: &Path, two_photos: bool) {
    let image = RgbImage::from_fn(200, 100, |x, y| {
        let in_rows = (20..80).contains(&y);
        let left = (10..70).contains(&x);
        let right = two_photos && (110..170).contains(&x);
        if in_rows && (left || right) { PHOTO } else { PAPER }
    });
    image.save(path).unwrap();
}

fn api(dir: &TempDir, config: ScanConfig) -> ScanCrop {
    ScanCrop::new(config, Some(dir.path().join("scancrop.log").as_path())).unwrap()
}

#[test]
fn test_directory_batch_crop() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    fs::create_dir(&scans).unwrap();
    write_scan(&scans.join("pair.png"), true);
    write_scan(&scans.join("single.png"), false);
    RgbImage::from_pixel(200, 100, PAPER).save(scans.join("blank.png")).unwrap();
    fs::write(scans.join("readme.txt"), "not a scan").unwrap();

    let config = ScanConfig::new().with_regions(1).with_resize(false);
    let report = api(&dir, config).crop_path(&scans, None).unwrap();

    let out = dir.path().join("scans_cropped");
    assert_eq!(report.output_dir, out);
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.total_crops(), 3);
    assert_eq!(report.results[0].1, SaveOutcome::NoContent);
    assert_eq!(report.results[1].1, SaveOutcome::Saved(vec![out.join("pair_1.png"), out.join("pair_2.png")]));
    assert_eq!(report.results[2].1, SaveOutcome::Saved(vec![out.join("single.png")]));

    let crop = image::open(out.join("pair_2.png")).unwrap().to_rgb8();
    assert_eq!(crop.dimensions(), (60, 60));
    assert!(crop.pixels().all(|p| *p == PHOTO));
}

#[test]
fn test_rescaled_output_dimensions() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let scan = dir.path().join("scan.png");
    write_scan(&scan, false);
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let config = ScanConfig::new().with_regions(1).with_resolution(600, 300);
    let outcome = api(&dir, config).crop_file(&scan, &out).unwrap();

    assert_eq!(outcome, SaveOutcome::Saved(vec![out.join("scan.png")]));
    let crop = image::open(out.join("scan.png")).unwrap();
    assert_eq!((crop.width(), crop.height()), (30, 30));
}

#[test]
fn test_second_run_refuses_existing_output() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let scan = dir.path().join("scan.png");
    write_scan(&scan, true);

    let scancrop = api(&dir, ScanConfig::new().with_resize(false));
    let report = scancrop.crop_path(&scan, None).unwrap();
    assert_eq!(report.output_dir, dir.path().join("scan_cropped"));
    // two scan lines, two pictures each
    assert_eq!(report.total_crops(), 4);

    let again = scancrop.crop_path(&scan, None);
    assert!(matches!(again, Err(CropError::OutputExists(_))));
}

#[test]
fn test_detect_reports_bounds_without_writing() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let scan = dir.path().join("scan.png");
    write_scan(&scan, true);

    let detections = api(&dir, ScanConfig::new().with_regions(1)).detect(&scan).unwrap();
    let bounds: Vec<String> = detections.iter().map(|d| d.bounds.to_string()).collect();
    assert_eq!(bounds, vec!["(10, 20)-(70, 80) [60x60]", "(110, 20)-(170, 80) [60x60]"]);
    assert!(!dir.path().join("scan_cropped").exists());
}

#[test]
fn test_missing_input_and_invalid_config() {
    init_logging();
    let dir = TempDir::new().unwrap();

    let missing = api(&dir, ScanConfig::new()).crop_path(&dir.path().join("nope"), None);
    assert!(matches!(missing, Err(CropError::InputNotFound(_))));

    let invalid = ScanCrop::new(ScanConfig::new().with_regions(0), Some(dir.path().join("x.log").as_path()));
    assert!(matches!(invalid, Err(CropError::InvalidConfig(_))));
}
