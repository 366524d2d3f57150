use crate::pixel::PixelSample;
use image::{GrayImage, Luma, RgbImage, imageops};

/// Convert the raw RGB grid to a grayscale grid of the same dimensions
///
/// Every cell goes through [`PixelSample::grey`].
///
/// # Arguments
/// * `raw` - Decoded RGB grid
///
/// # Returns
/// Grayscale image with gamma-correct luminance values
pub fn to_grayscale(raw: &RgbImage) -> GrayImage {
    let (width, height) = raw.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in raw.enumerate_pixels() {
        let grey = PixelSample::from(*pixel).grey();
        output.put_pixel(x, y, Luma([grey]));
    }

    output
}

/// Invert every cell: `v -> 255 - v`
pub fn negate(gray: &mut GrayImage) {
    imageops::invert(gray);
}

/// Reverse each row left to right
pub fn mirror(gray: &mut GrayImage) {
    imageops::flip_horizontal_in_place(gray);
}

/// Add `delta` to every cell, clamping to [0, 255]
///
/// Lossy at the boundaries: once a cell saturates the original value is gone.
pub fn change_brightness(gray: &mut GrayImage, delta: i32) {
    for pixel in gray.pixels_mut() {
        let value = (pixel[0] as i32 + delta).clamp(0, 255);
        pixel[0] = value as u8;
    }
}
