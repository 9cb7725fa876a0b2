use std::path::Path;
use std::path::PathBuf;

use image::DynamicImage;
use image::GrayImage;
use image::RgbImage;

use crate::Result;

/// Open and decode an image file
pub(crate) fn open_image(file: &Path) -> Result<DynamicImage> {
    Ok(image::open(file)?)
}

/// Save RGB image to PNG file with suffix appended before extension
pub(crate) fn save_rgb_image_as(image: &RgbImage, base_path: &Path, suffix: &str) -> Result<()> {
    let filename = compute_path(base_path, suffix);
    image.save(&filename)?;
    println!("{}: saved", filename.display());
    Ok(())
}

/// Save grayscale image to PNG file with suffix appended before extension
pub(crate) fn save_luma_image_as(image: &GrayImage, base_path: &Path, suffix: &str) -> Result<()> {
    let filename = compute_path(base_path, suffix);
    image.save(&filename)?;
    println!("{}: saved", filename.display());
    Ok(())
}

/// Compute full file path from base path and suffix
fn compute_path(base_path: &Path, suffix: &str) -> PathBuf {
    format!("{}-{suffix}.png", base_path.display()).into()
}
