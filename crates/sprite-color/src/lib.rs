//! # sprite-color
//!
//! HSV color transforms for sprite pixel buffers.
//!
//! - [`hsv`] - HSV ⇄ RGB conversions and per-pixel adjustments
//! - [`adjust`] - Whole-buffer HSV adjustments
//! - [`preset`] - Named, serializable HSV adjustment presets
//!
//! All functions are pure: buffers are read and new buffers returned.
//! Color math is plain sRGB 8-bit round-tripping; no linearization or
//! gamut handling is attempted.
//!
//! # Dependencies
//!
//! - `sprite-core` - [`Color`](sprite_core::Color), [`PixelBuffer`](sprite_core::PixelBuffer)
//! - `serde` - preset serialization
//! - `tracing` - debug events for buffer transforms

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
pub mod hsv;
pub mod preset;

pub use adjust::{hsv_mod_buffer, hsv_saturate};
pub use hsv::{
    hsv_mod_pixel, hsv_saturate_pixel, hsv_shift_pixel, hsv_to_rgb, hsv_to_rgb_sectored,
    rgb_to_hsv, Hsv,
};
pub use preset::HsvMod;
