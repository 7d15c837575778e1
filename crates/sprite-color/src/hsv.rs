//! HSV ⇄ RGB conversion and per-pixel HSV adjustments.
//!
//! Ranges follow the sprite tooling convention rather than unit ranges:
//! hue in degrees `[0, 360)`, saturation and value in percent `[0, 100]`.
//!
//! # Conversions
//!
//! - [`rgb_to_hsv`] - max/min/diff hexagonal formula
//! - [`hsv_to_rgb`] - closed form `k = (n + h/60) mod 6`, the canonical inverse
//! - [`hsv_to_rgb_sectored`] - classic `i mod 6` sector switch; agrees with
//!   the closed form within ±1 per 8-bit channel
//!
//! # Adjustments
//!
//! Three adjustments differ in how they treat hue:
//!
//! | Function | Hue | Saturation | Value |
//! |---|---|---|---|
//! | [`hsv_mod_pixel`] | replaced | `+delta`, clamped | `+delta`, clamped |
//! | [`hsv_shift_pixel`] | `+delta` mod 360 | `+delta`, clamped | `+delta`, clamped |
//! | [`hsv_saturate_pixel`] | replaced | replaced, clamped | `+delta`, clamped |
//!
//! All of them preserve the source alpha.
//!
//! ```rust
//! use sprite_color::{hsv_to_rgb, rgb_to_hsv};
//! use sprite_core::Color;
//!
//! let c = Color::opaque(200, 40, 90);
//! let back = hsv_to_rgb(rgb_to_hsv(c));
//! assert!(back.iter().zip(c.rgb()).all(|(a, b)| a.abs_diff(b) <= 1));
//! ```

use serde::{Deserialize, Serialize};
use sprite_core::{unit_to_byte, Color};

/// A color in HSV space: `h` in degrees, `s` and `v` in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    /// Saturation in percent, `[0, 100]`
    pub s: f64,
    /// Value in percent, `[0, 100]`
    pub v: f64,
}

impl Hsv {
    /// Creates an HSV triple.
    #[inline]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Returns `[h, s, v]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.v]
    }
}

impl From<[f64; 3]> for Hsv {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[inline]
fn clamp_percent(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// Converts an 8-bit color to HSV, ignoring alpha.
///
/// Degenerate cases: a gray (`cmax == cmin`) has hue 0, and black
/// (`cmax == 0`) has saturation 0.
pub fn rgb_to_hsv(color: Color) -> Hsv {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let cmax = r.max(g.max(b));
    let cmin = r.min(g.min(b));
    let diff = cmax - cmin;

    let h = if cmax == cmin {
        0.0
    } else if cmax == r {
        (60.0 * ((g - b) / diff) + 360.0) % 360.0
    } else if cmax == g {
        (60.0 * ((b - r) / diff) + 120.0) % 360.0
    } else {
        (60.0 * ((r - g) / diff) + 240.0) % 360.0
    };

    let s = if cmax == 0.0 { 0.0 } else { (diff / cmax) * 100.0 };

    Hsv::new(h, s, cmax * 100.0)
}

/// Converts HSV to 8-bit RGB using the closed-form formula.
///
/// Hue outside `[0, 360)` wraps. Saturation and value are clamped to
/// `[0, 100]` before conversion.
pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let h = hsv.h;
    let s = clamp_percent(hsv.s) / 100.0;
    let v = clamp_percent(hsv.v) / 100.0;

    let f = |n: f64| {
        let k = (n + h / 60.0).rem_euclid(6.0);
        v - v * s * k.min(4.0 - k).min(1.0).max(0.0)
    };

    [unit_to_byte(f(5.0)), unit_to_byte(f(3.0)), unit_to_byte(f(1.0))]
}

/// Converts HSV to 8-bit RGB using the six-sector switch.
///
/// Kept alongside [`hsv_to_rgb`] for callers that want the classic
/// formulation; the two agree within ±1 per channel.
pub fn hsv_to_rgb_sectored(hsv: Hsv) -> [u8; 3] {
    let h = (hsv.h / 360.0).rem_euclid(1.0);
    let s = clamp_percent(hsv.s) / 100.0;
    let v = clamp_percent(hsv.v) / 100.0;

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [unit_to_byte(r), unit_to_byte(g), unit_to_byte(b)]
}

#[inline]
fn with_rgb(rgb: [u8; 3], a: u8) -> Color {
    Color::new(rgb[0], rgb[1], rgb[2], a)
}

/// Replaces hue with `hue`, adds the deltas to saturation and value.
///
/// Hue replacement (not addition) is the single-pixel behavior; see
/// [`hsv_shift_pixel`] for the additive variant used on whole buffers.
pub fn hsv_mod_pixel(color: Color, hue: f64, sat_delta: f64, val_delta: f64) -> Color {
    let hsv = rgb_to_hsv(color);
    let out = Hsv::new(
        hue,
        clamp_percent(hsv.s + sat_delta),
        clamp_percent(hsv.v + val_delta),
    );
    with_rgb(hsv_to_rgb(out), color.a)
}

/// Rotates hue by `hue_delta` (mod 360), adds the other deltas.
pub fn hsv_shift_pixel(color: Color, hue_delta: f64, sat_delta: f64, val_delta: f64) -> Color {
    let hsv = rgb_to_hsv(color);
    let out = Hsv::new(
        (hsv.h + hue_delta).rem_euclid(360.0),
        clamp_percent(hsv.s + sat_delta),
        clamp_percent(hsv.v + val_delta),
    );
    with_rgb(hsv_to_rgb(out), color.a)
}

/// Forces hue and saturation, adds `val_delta` to value.
pub fn hsv_saturate_pixel(color: Color, hue: f64, saturation: f64, val_delta: f64) -> Color {
    let hsv = rgb_to_hsv(color);
    let out = Hsv::new(
        hue,
        clamp_percent(saturation),
        clamp_percent(hsv.v + val_delta),
    );
    with_rgb(hsv_to_rgb(out), color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn close(a: [u8; 3], b: [u8; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let red = rgb_to_hsv(Color::opaque(255, 0, 0));
        assert_relative_eq!(red.h, 0.0);
        assert_relative_eq!(red.s, 100.0);
        assert_relative_eq!(red.v, 100.0);

        let green = rgb_to_hsv(Color::opaque(0, 255, 0));
        assert_relative_eq!(green.h, 120.0);

        let blue = rgb_to_hsv(Color::opaque(0, 0, 255));
        assert_relative_eq!(blue.h, 240.0);
    }

    #[test]
    fn test_rgb_to_hsv_degenerate() {
        let gray = rgb_to_hsv(Color::opaque(128, 128, 128));
        assert_relative_eq!(gray.h, 0.0);
        assert_relative_eq!(gray.s, 0.0);

        let black = rgb_to_hsv(Color::BLACK);
        assert_relative_eq!(black.s, 0.0);
        assert_relative_eq!(black.v, 0.0);
    }

    #[test]
    fn test_roundtrip_within_one() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(51) {
                    let c = Color::opaque(r, g, b);
                    assert!(
                        close(hsv_to_rgb(rgb_to_hsv(c)), c.rgb()),
                        "roundtrip failed for {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_closed_form_matches_sectored() {
        let mut h = 0.0;
        while h < 360.0 {
            for s in [0.0, 12.5, 50.0, 99.0, 100.0] {
                for v in [0.0, 33.0, 75.0, 100.0] {
                    let hsv = Hsv::new(h, s, v);
                    assert!(
                        close(hsv_to_rgb(hsv), hsv_to_rgb_sectored(hsv)),
                        "mismatch at {hsv:?}"
                    );
                }
            }
            h += 7.5;
        }
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(
            hsv_to_rgb(Hsv::new(360.0, 100.0, 100.0)),
            hsv_to_rgb(Hsv::new(0.0, 100.0, 100.0))
        );
        assert_eq!(
            hsv_to_rgb(Hsv::new(-120.0, 100.0, 100.0)),
            [0, 0, 255]
        );
    }

    #[test]
    fn test_mod_pixel_replaces_hue() {
        let red = Color::new(255, 0, 0, 77);
        let out = hsv_mod_pixel(red, 120.0, 0.0, 0.0);
        assert_eq!(out, Color::new(0, 255, 0, 77));
    }

    #[test]
    fn test_shift_pixel_adds_hue() {
        // Green shifted by 120 lands on blue, not on hue 120
        let green = Color::opaque(0, 255, 0);
        assert_eq!(hsv_shift_pixel(green, 120.0, 0.0, 0.0), Color::opaque(0, 0, 255));
        // Wraps past 360
        let blue = Color::opaque(0, 0, 255);
        assert_eq!(hsv_shift_pixel(blue, 120.0, 0.0, 0.0), Color::opaque(255, 0, 0));
    }

    #[test]
    fn test_mod_pixel_clamps_deltas() {
        let c = Color::opaque(200, 100, 100);
        let out = hsv_mod_pixel(c, 0.0, 500.0, -500.0);
        assert_eq!(out, Color::BLACK);
        let bright = hsv_mod_pixel(c, 0.0, -500.0, 500.0);
        assert_eq!(bright, Color::WHITE);
    }

    #[test]
    fn test_saturate_pixel_forces_saturation() {
        let gray = Color::new(128, 128, 128, 10);
        let out = hsv_saturate_pixel(gray, 240.0, 100.0, 0.0);
        assert_eq!(out, Color::new(0, 0, 128, 10));
    }
}
