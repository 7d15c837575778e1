//! 8-bit and normalized RGBA color types.
//!
//! - [`Color`] - Storage representation, one byte per channel
//! - [`ParamColor`] - Computation representation, channels in `[0, 1]`
//!
//! # Conversion Rules
//!
//! `Color -> ParamColor` divides each channel by 255 and is exact for
//! every byte value. `ParamColor -> Color` multiplies by 255, rounds to
//! the nearest integer and clamps into `[0, 255]`, so out-of-range blend
//! results never wrap.
//!
//! ```rust
//! use sprite_core::{Color, ParamColor};
//!
//! let c = Color::new(10, 128, 255, 64);
//! let p = ParamColor::from(c);
//! assert_eq!(Color::from(p), c);
//!
//! // Out-of-range values clamp
//! let over = ParamColor::new(1.7, -0.2, 0.5, 1.0);
//! assert_eq!(Color::from(over), Color::new(255, 0, 128, 255));
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - per-pixel accessors
//! - `sprite-ops::blend` - all blend math runs on [`ParamColor`]
//! - `sprite-color` - HSV conversions

use std::fmt;

/// An 8-bit straight-alpha RGBA color.
///
/// Memory layout matches one 4-byte group of a [`PixelBuffer`](crate::PixelBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the value of every freshly allocated pixel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a color from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Returns the color channels without alpha.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns a copy with the alpha channel replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Returns `true` if RGB channels are equal, ignoring alpha.
    #[inline]
    pub fn same_rgb(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns `true` if alpha is 0.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Color> for [u8; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A normalized RGBA color with channels nominally in `[0, 1]`.
///
/// Intermediate blend results may leave the nominal range; conversion
/// back to [`Color`] clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParamColor {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel
    pub a: f64,
}

impl ParamColor {
    /// Creates a normalized color.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the RGB channels.
    #[inline]
    pub const fn rgb(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Builds a color from RGB channels and an alpha.
    #[inline]
    pub const fn from_rgb(rgb: [f64; 3], a: f64) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    /// Applies `f` to the RGB channels, keeping alpha.
    #[inline]
    pub fn map_rgb<F: Fn(f64) -> f64>(self, f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }
}

/// Converts a normalized channel to a byte: `round(x * 255)` clamped.
///
/// NaN maps to 0.
#[inline]
pub fn unit_to_byte(x: f64) -> u8 {
    let v = (x * 255.0).round();
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0) as u8
    }
}

/// Converts a byte channel to `[0, 1]`.
#[inline]
pub fn byte_to_unit(x: u8) -> f64 {
    f64::from(x) / 255.0
}

impl From<Color> for ParamColor {
    #[inline]
    fn from(c: Color) -> Self {
        Self::new(
            byte_to_unit(c.r),
            byte_to_unit(c.g),
            byte_to_unit(c.b),
            byte_to_unit(c.a),
        )
    }
}

impl From<ParamColor> for Color {
    #[inline]
    fn from(p: ParamColor) -> Self {
        Self::new(
            unit_to_byte(p.r),
            unit_to_byte(p.g),
            unit_to_byte(p.b),
            unit_to_byte(p.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_param_roundtrip_exact() {
        for v in 0..=255u8 {
            let c = Color::new(v, 255 - v, v / 2, v);
            assert_eq!(Color::from(ParamColor::from(c)), c);
        }
    }

    #[test]
    fn test_param_values() {
        let p = ParamColor::from(Color::new(255, 0, 51, 255));
        assert_relative_eq!(p.r, 1.0);
        assert_relative_eq!(p.g, 0.0);
        assert_relative_eq!(p.b, 0.2);
        assert_relative_eq!(p.a, 1.0);
    }

    #[test]
    fn test_unit_to_byte_clamps() {
        assert_eq!(unit_to_byte(-0.5), 0);
        assert_eq!(unit_to_byte(2.0), 255);
        assert_eq!(unit_to_byte(f64::NAN), 0);
        assert_eq!(unit_to_byte(0.5), 128);
    }

    #[test]
    fn test_same_rgb_ignores_alpha() {
        let a = Color::new(1, 2, 3, 4);
        assert!(a.same_rgb(a.with_alpha(200)));
        assert!(!a.same_rgb(Color::new(1, 2, 4, 4)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::new(1, 2, 3, 4).to_string(), "rgba(1, 2, 3, 4)");
    }
}
