//! Tests for flat-index scanning

use image::Rgb;

use crate::extractor::{Direction, LightnessClassifier, Scanner};
use super::test_utils::{blank_scan, paint_rect, INK};

fn classifier() -> LightnessClassifier {
    LightnessClassifier::new(0.95)
}

#[test]
fn find_content_skips_background() {
    let mut image = blank_scan(10, 3);
    image.put_pixel(4, 1, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.find_content(10, 19), Some(14));
    assert_eq!(scanner.find_content(15, 19), None);
}

#[test]
fn find_content_never_starts_on_scan_end() {
    let mut image = blank_scan(10, 1);
    image.put_pixel(9, 0, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.find_content(0, 9), None);
}

#[test]
fn find_content_reports_index_zero() {
    let mut image = blank_scan(10, 1);
    image.put_pixel(0, 0, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.find_content(0, 9), Some(0));
}

#[test]
fn run_stops_before_background() {
    let mut image = blank_scan(10, 1);
    paint_rect(&mut image, 2, 0, 4, 1, INK);
    let scanner = Scanner::new(&image, classifier());

    let run = scanner.run_from(2, 9);
    assert_eq!((run.start, run.end), (2, 5));
}

#[test]
fn run_reaching_scan_end_uses_boundary() {
    let mut image = blank_scan(10, 2);
    paint_rect(&mut image, 6, 0, 4, 2, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.run_from(16, 19).end, 19);
}

#[test]
fn single_pixel_run_ends_where_it_starts() {
    let mut image = blank_scan(10, 1);
    image.put_pixel(3, 0, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.run_from(3, 9).end, 3);
}

#[test]
fn vertical_walks_stop_at_image_rows() {
    let mut image = blank_scan(5, 6);
    paint_rect(&mut image, 2, 0, 1, 6, INK);
    let scanner = Scanner::new(&image, classifier());

    // column 2, starting on row 3
    assert_eq!(scanner.find_edge(17, 2, Direction::Up), 2);
    assert_eq!(scanner.find_edge(17, 27, Direction::Down), 27);
}

#[test]
fn vertical_walks_stop_before_background() {
    let mut image = blank_scan(5, 6);
    paint_rect(&mut image, 2, 2, 1, 3, INK);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.find_edge(17, 2, Direction::Up), 12);
    assert_eq!(scanner.find_edge(17, 27, Direction::Down), 22);
}

#[test]
fn walk_starting_on_its_boundary_returns_it() {
    let image = blank_scan(5, 2);
    let scanner = Scanner::new(&image, classifier());

    assert_eq!(scanner.find_edge(3, 3, Direction::Up), 3);
}

#[test]
fn raising_threshold_never_loses_content() {
    let image = image::RgbImage::from_fn(64, 4, |x, y| {
        let v = (x * 4 + y) as u8;
        Rgb([v, v.wrapping_mul(3), 255 - v])
    });

    let mut previous = 0;
    for step in 0..=20 {
        let classifier = LightnessClassifier::new(step as f64 / 20.0);
        let scanner = Scanner::new(&image, classifier);
        let content = (0..(64 * 4)).filter(|&i| scanner.is_content(i)).count();
        assert!(content >= previous, "content shrank at threshold step {}", step);
        previous = content;
    }
    assert!(previous > 0);
}
