//! Crop and resample production

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::debug;

use super::region::Region;

/// Interpolation kernel used for rescaling crops (bicubic)
pub const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Copy a region out of the source image
///
/// # Panics
/// Panics if the region does not lie within the image.
pub fn crop(image: &RgbImage, region: &Region) -> RgbImage {
    assert!(
        region.end_x() <= image.width() && region.end_y() <= image.height(),
        "crop region {:?} exceeds {}x{} image", region, image.width(), image.height()
    );
    imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}

/// Crop a region and rescale it if a ratio is given
///
/// # Arguments
/// * `image` - Source image
/// * `region` - Area to crop
/// * `ratio` - Optional scale factor; target dimensions are rounded down
///
/// # Returns
/// The cropped, possibly resampled, image
pub fn crop_and_resize(image: &RgbImage, region: &Region, ratio: Option<f64>) -> RgbImage {
    let cropped = crop(image, region);

    let Some(ratio) = ratio else {
        return cropped;
    };

    let (width, height) = region.scaled_dimensions(ratio);
    debug!("Resizing {}x{} crop to {}x{} (ratio {})",
           region.width, region.height, width, height, ratio);
    imageops::resize(&cropped, width, height, RESAMPLE_FILTER)
}
