//! Shared test utilities: synthetic in-memory test images.
//!
//! Tests never ship binary fixtures; every source image is generated with
//! `RgbImage::from_fn` and encoded through the same pure-Rust encoders the
//! crate already links.

use image::{DynamicImage, ImageEncoder, RgbImage};

/// A small deterministic gradient bitmap.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    DynamicImage::ImageRgb8(img)
}

/// PNG bytes of a gradient image, as a gallery picker would hand them over.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    gradient_image(width, height)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// JPEG bytes of a gradient image, for large-source decode tests.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_image(width, height).into_rgb8();
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}
