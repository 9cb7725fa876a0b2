use image::Rgb;
use image::RgbImage;

/// Foreground pixels of an image plus their original row-major grid indices
///
/// Position i in `pixels` came from grid index `indices[i]`, so `indices`
/// is strictly increasing and always as long as `pixels`.
pub(crate) struct FilteredPixels {
    pub(crate) pixels: Vec<Rgb<u8>>,
    pub(crate) indices: Vec<usize>,
}

impl FilteredPixels {
    pub(crate) fn len(&self) -> usize {
        self.pixels.len()
    }
}

/// Split an image into foreground pixels and their grid indices
///
/// A pixel counts as background when all three channels are brighter than
/// the threshold (near-white paper or lightbox surface)
pub(crate) fn filter_background(image: &RgbImage, threshold: u8) -> FilteredPixels {
    let width = image.width() as usize;
    let mut pixels = Vec::new();
    let mut indices = Vec::new();
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[0] > threshold && pixel[1] > threshold && pixel[2] > threshold {
            continue;
        }
        pixels.push(*pixel);
        indices.push(y as usize * width + x as usize);
    }
    FilteredPixels { pixels, indices }
}
