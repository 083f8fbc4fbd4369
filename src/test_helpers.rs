//! Shared test utilities.
//!
//! Synthesizes small real images so backend and pipeline tests run against
//! actual encoders and decoders.

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// Write a gradient image of the given size, encoded in the format implied
/// by `path`'s extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let format = ImageFormat::from_path(path).unwrap();
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(rgb).to_rgba8()),
        _ => DynamicImage::ImageRgb8(rgb),
    };
    img.save_with_format(path, format).unwrap();
}

/// Write a PNG with a varying alpha channel.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    let rgba = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgba8(rgba)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}
