//! The image codec: bounded decode, canonical encode, canonical decode.
//!
//! Everything operates on in-memory byte slices and [`DynamicImage`]s; the
//! codec never touches the filesystem and keeps no state between calls, so
//! every function is pure and reentrant.
//!
//! ## Memory model
//!
//! [`bounded_decode`] never holds a full-resolution pixel buffer longer than
//! it has to. It probes the source's dimensions first (header parse only, no
//! pixel allocation), picks a power-of-two sample factor, and box-downsamples
//! to the coarse size immediately after decoding, before the precise Lanczos3
//! pass. The full-resolution buffer exists only transiently between decode
//! and the coarse downsample (the `image` crate has no subsampled decode);
//! everything retained past that point is O(`max_dimension`²) regardless of
//! source size.
//!
//! ## Canonical form
//!
//! The stored representation is base64 (STANDARD alphabet) over a lossless
//! PNG encoding. The base64 alphabet (`A–Z a–z 0–9 + / =`) is disjoint from
//! the record store's `###`/`@@@` delimiters, so canonical image text can
//! never split a stored record.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use log::debug;
use std::io::Cursor;
use thiserror::Error;

use super::calculations::{fit_within, sample_factor};

/// Longer-side cap applied when an image is ingested into the store.
///
/// Bounds the size of the persisted blob; display contexts request their own
/// (smaller) maximums against the same stored text.
pub const STORED_MAX_DIMENSION: u32 = 2000;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("stored image text is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image has zero width or height")]
    ZeroDimension,
}

/// Decode raw source bytes to a bitmap bounded by `max_dimension`.
///
/// Three phases:
/// 1. **Probe**: read only the dimensions; unparseable bytes or a zero
///    dimension fail here, before any pixel work.
/// 2. **Coarse**: decode, then box-downsample by the power-of-two
///    [`sample_factor`] so at most a <2x overshoot of the bound survives.
/// 3. **Precise**: Lanczos3 scale so the longer side equals exactly
///    `max_dimension`, skipped when the coarse result is already within
///    bounds. Never upscales.
pub fn bounded_decode(bytes: &[u8], max_dimension: u32) -> Result<DynamicImage, CodecError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .into_dimensions()?;
    if width == 0 || height == 0 {
        return Err(CodecError::ZeroDimension);
    }

    let factor = sample_factor(width, height, max_dimension);
    debug!("bounded decode {width}x{height} at max {max_dimension} (sample factor {factor})");

    let decoded = image::load_from_memory(bytes)?;
    let coarse = if factor > 1 {
        decoded.thumbnail((width / factor).max(1), (height / factor).max(1))
    } else {
        decoded
    };
    Ok(scale_to_fit(coarse, max_dimension))
}

/// Encode a bitmap to its canonical stored text form.
///
/// Lossless PNG, then base64. Deterministic: the same bitmap encodes to
/// byte-identical text on every call.
pub fn encode_canonical(bitmap: &DynamicImage) -> Result<String, CodecError> {
    let mut png = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(BASE64.encode(&png))
}

/// Decode canonical stored text back to a bitmap bounded by `max_dimension`.
///
/// Inverse of [`encode_canonical`], followed by the same downscale-only fit
/// as [`bounded_decode`]. Call sites request different `max_dimension`
/// values against the same stored text; the resize is recomputed per call,
/// nothing is cached.
pub fn decode_canonical(text: &str, max_dimension: u32) -> Result<DynamicImage, CodecError> {
    let png = BASE64.decode(text)?;
    let decoded = image::load_from_memory(&png)?;
    Ok(scale_to_fit(decoded, max_dimension))
}

/// Downscale-only precise pass: longer side becomes exactly `max_dimension`.
fn scale_to_fit(bitmap: DynamicImage, max_dimension: u32) -> DynamicImage {
    match fit_within(bitmap.width(), bitmap.height(), max_dimension) {
        Some((w, h)) => bitmap.resize_exact(w, h, FilterType::Lanczos3),
        None => bitmap,
    }
}
