//! Pixel lightness and background classification

use image::Rgb;

/// Largest value a color component can take
pub const MAX_COMPONENT: f64 = 255.0;

/// Lightness of a pixel: midpoint of its largest and smallest component
pub fn lightness(pixel: &Rgb<u8>) -> f64 {
    let [r, g, b] = pixel.0;
    let max = r.max(g).max(b) as f64;
    let min = r.min(g).min(b) as f64;
    0.5 * (max + min)
}

/// Absolute lightness threshold for a fractional threshold in `[0, 1]`
pub fn threshold_from_fraction(fraction: f64) -> f64 {
    fraction * MAX_COMPONENT
}

/// Pixel classification against a lightness threshold
#[derive(Debug, Clone, Copy)]
pub struct LightnessClassifier {
    threshold: f64,
}

impl LightnessClassifier {
    /// Create a classifier from a fractional threshold
    pub fn new(fraction: f64) -> Self {
        LightnessClassifier { threshold: threshold_from_fraction(fraction) }
    }

    /// Absolute threshold on the 0-255 scale
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Background pixels are at or above the threshold
    pub fn is_background(&self, pixel: &Rgb<u8>) -> bool {
        lightness(pixel) >= self.threshold
    }

    /// Content pixels are strictly below the threshold
    pub fn is_content(&self, pixel: &Rgb<u8>) -> bool {
        !self.is_background(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lightness_is_midpoint_of_extremes() {
        assert_eq!(lightness(&Rgb([255, 255, 255])), 255.0);
        assert_eq!(lightness(&Rgb([0, 0, 0])), 0.0);
        assert_eq!(lightness(&Rgb([255, 0, 128])), 127.5);
        assert_eq!(lightness(&Rgb([10, 200, 30])), 105.0);
    }

    #[test]
    fn threshold_boundary_counts_as_background() {
        let classifier = LightnessClassifier::new(100.0 / 255.0);
        assert!(classifier.is_background(&Rgb([100, 100, 100])));
        assert!(classifier.is_content(&Rgb([99, 99, 99])));
    }

    #[test]
    fn default_threshold_separates_paper_from_photo() {
        let classifier = LightnessClassifier::new(0.95);
        assert!((classifier.threshold() - 242.25).abs() < 1e-9);
        assert!(classifier.is_background(&Rgb([250, 248, 245])));
        assert!(classifier.is_content(&Rgb([240, 240, 240])));
    }
}
