//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Compute the power-of-two coarse sample factor for a bounded decode.
///
/// Starts at 1 and doubles while either dimension, integer-divided by the
/// factor, still exceeds `max_dimension`. The chosen factor overshoots the
/// target by less than 2x; the precise pass driven by [`fit_within`]
/// removes the remainder.
///
/// # Examples
/// ```
/// # use studydeck::imaging::sample_factor;
/// assert_eq!(sample_factor(4000, 3000, 600), 8);
/// assert_eq!(sample_factor(500, 400, 600), 1);
/// ```
pub fn sample_factor(width: u32, height: u32, max_dimension: u32) -> u32 {
    // A zero bound is treated as 1. With zero, the loop only stops once
    // the factor exceeds both dimensions, and the doubling can overflow
    // u32 for pathological source sizes.
    let max_dimension = max_dimension.max(1);
    let mut factor = 1u32;
    while width / factor > max_dimension || height / factor > max_dimension {
        factor *= 2;
    }
    factor
}

/// Target dimensions for the precise downscale pass.
///
/// Returns `None` when the image is already within bounds; the codec never
/// upscales. Otherwise the longer side becomes exactly `max_dimension` and
/// the shorter side follows the aspect ratio, rounded, floored at 1 so
/// extreme aspect ratios can't collapse to zero.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }
    // The shorter side is derived from the integer dimensions in one
    // multiply-then-divide; going through an intermediate ratio loses
    // exact halves to double rounding (300/(1000/755) < 226.5).
    let (w, h) = if width >= height {
        // Landscape or square: width is the longer side
        let short = (max_dimension as f64 * height as f64 / width as f64).round() as u32;
        (max_dimension, short)
    } else {
        // Portrait: height is the longer side
        let short = (max_dimension as f64 * width as f64 / height as f64).round() as u32;
        (short, max_dimension)
    };
    Some((w.max(1), h.max(1)))
}
