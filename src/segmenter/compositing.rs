use image::Rgb;
use image::RgbImage;

use super::regions::Region;

/// Render a single region as a standalone image
///
/// Every cell starts out as the background color; cells inside the region
/// keep the source image's original pixel values.
pub(crate) fn render_region(
    image: &RgbImage,
    region: &Region,
    background_color: Rgb<u8>,
) -> RgbImage {
    let mut result = RgbImage::from_pixel(image.width(), image.height(), background_color);
    for &(x, y) in region.cells() {
        result.put_pixel(x, y, *image.get_pixel(x, y));
    }
    result
}
