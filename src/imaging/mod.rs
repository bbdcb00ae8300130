//! Image codec — pure Rust, in-memory, stateless.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe dimensions** | `image::ImageReader::into_dimensions` |
//! | **Decode (JPEG, PNG, WebP)** | `image` crate (pure Rust decoders) |
//! | **Coarse downsample** | `DynamicImage::thumbnail` (box filter) |
//! | **Precise resize** | `resize_exact` with Lanczos3 |
//! | **Canonical form** | PNG encode + base64 STANDARD |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Codec**: the operations [`bounded_decode`], [`encode_canonical`],
//!   and [`decode_canonical`]

mod calculations;
pub mod codec;

pub use calculations::{fit_within, sample_factor};
pub use codec::{
    CodecError, STORED_MAX_DIMENSION, bounded_decode, decode_canonical, encode_canonical,
};
