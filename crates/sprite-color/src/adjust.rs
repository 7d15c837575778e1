//! Whole-buffer HSV adjustments.
//!
//! Both functions return a new buffer with the source's size and origin;
//! the input is never modified.
//!
//! Note the hue semantics: [`hsv_mod_buffer`] rotates hue additively,
//! while [`crate::hsv_mod_pixel`] replaces it. The two are kept as
//! distinct operations.
//!
//! ```rust
//! use sprite_color::hsv_mod_buffer;
//! use sprite_core::{Color, PixelBuffer};
//!
//! let src = PixelBuffer::filled(2, 2, Color::opaque(255, 0, 0))?;
//! let shifted = hsv_mod_buffer(&src, 120.0, 0.0, 0.0);
//! assert_eq!(shifted.get(1, 1)?, Color::opaque(0, 255, 0));
//! # Ok::<(), sprite_core::Error>(())
//! ```

use sprite_core::PixelBuffer;
use tracing::debug;

use crate::hsv::{hsv_saturate_pixel, hsv_shift_pixel};

/// Rotates hue by `hue_delta` degrees and offsets saturation/value.
///
/// Saturation and value results are clamped to `[0, 100]`; alpha is kept.
pub fn hsv_mod_buffer(
    buffer: &PixelBuffer,
    hue_delta: f64,
    sat_delta: f64,
    val_delta: f64,
) -> PixelBuffer {
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        hue_delta,
        sat_delta,
        val_delta,
        "hsv_mod_buffer"
    );
    buffer.map_pixels(|c| hsv_shift_pixel(c, hue_delta, sat_delta, val_delta))
}

/// Forces every pixel to `hue` and `saturation`, offsetting value.
///
/// Useful for tinting a sprite to a single hue while keeping its shading.
pub fn hsv_saturate(
    buffer: &PixelBuffer,
    hue: f64,
    saturation: f64,
    val_delta: f64,
) -> PixelBuffer {
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        hue,
        saturation,
        val_delta,
        "hsv_saturate"
    );
    buffer.map_pixels(|c| hsv_saturate_pixel(c, hue, saturation, val_delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_core::Color;

    #[test]
    fn test_mod_buffer_preserves_alpha_and_origin() {
        let mut src = PixelBuffer::new(2, 1).unwrap().with_origin(3, 4);
        src.set(0, 0, Color::new(0, 0, 255, 12)).unwrap();
        let out = hsv_mod_buffer(&src, 120.0, 0.0, 0.0);
        assert_eq!(out.origin(), (3, 4));
        assert_eq!(out.get(0, 0).unwrap(), Color::new(255, 0, 0, 12));
        // Transparent black stays transparent black
        assert_eq!(out.get(1, 0).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_mod_buffer_leaves_source_untouched() {
        let src = PixelBuffer::filled(1, 1, Color::opaque(10, 200, 30)).unwrap();
        let _ = hsv_mod_buffer(&src, 45.0, 10.0, -10.0);
        assert_eq!(src.get(0, 0).unwrap(), Color::opaque(10, 200, 30));
    }

    #[test]
    fn test_saturate_tints_grayscale() {
        let mut src = PixelBuffer::new(2, 1).unwrap();
        src.set(0, 0, Color::opaque(255, 255, 255)).unwrap();
        src.set(1, 0, Color::opaque(51, 51, 51)).unwrap();
        let out = hsv_saturate(&src, 0.0, 100.0, 0.0);
        assert_eq!(out.get(0, 0).unwrap(), Color::opaque(255, 0, 0));
        assert_eq!(out.get(1, 0).unwrap(), Color::opaque(51, 0, 0));
    }
}
