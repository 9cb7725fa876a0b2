use image::GrayImage;
use image::Luma;
use image::RgbImage;

/// Blur strength applied before edge detection
const EDGE_BLUR_SIGMA: f32 = 1.0;

/// Build an edge map of the image
///
/// Grayscale conversion, then gaussian blur to knock out sensor noise,
/// then sobel gradient magnitude clamped into 8 bits.
pub(crate) fn edge_map(image: &RgbImage) -> GrayImage {
    let gray = image::imageops::grayscale(image);
    let blurred = imageproc::filter::gaussian_blur_f32(&gray, EDGE_BLUR_SIGMA);
    let gradients = imageproc::gradients::sobel_gradients(&blurred);
    let mut edges = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in gradients.enumerate_pixels() {
        let magnitude = pixel[0].min(255) as u8;
        edges.put_pixel(x, y, Luma([magnitude]));
    }
    edges
}
