//! Per-pixel blend operations.
//!
//! Every operation combines a **bottom** and a **top** 8-bit straight-alpha
//! color into one output color. Math runs on [`ParamColor`] (channels in
//! `[0, 1]`) and rounds back to bytes with clamping.
//!
//! # Over
//!
//! The default operation is standard alpha compositing:
//!
//! ```text
//! a_out = a_top + a_bottom * (1 - a_top)
//! c_out = (c_top * a_top + c_bottom * a_bottom * (1 - a_top)) / a_out
//! ```
//!
//! When both inputs are fully transparent `a_out` is zero; the result is
//! then transparent black instead of NaN.
//!
//! # Blend Modes
//!
//! All other modes compute an opaque RGB result from a per-channel formula
//! (`p1` = bottom, `p2` = top):
//!
//! | Mode | Formula |
//! |---|---|
//! | multiply | `p1 * p2` |
//! | screen | `1 - (1 - p1)(1 - p2)` |
//! | difference | `\|p1 - p2\|` |
//! | darken | `min(p1, p2)` |
//! | lighten | `max(p1, p2)` |
//! | soft-light | `(1 - 2 p2) p1² + 2 p2 p1` |
//! | hard-light | `p2 < 0.5 ? 2 p1 p2 : 1 - 2 (1 - p1)(1 - p2)` |
//! | color-dodge | `p2 == 1 ? 1 : min(1, p1 / (1 - p2))` |
//! | color-burn | `p2 == 0 ? 0 : 1 - min(1, (1 - p1) / p2)` |
//! | pin-light | `p2 < 0.5 ? min(p1, 2 p2) : max(p1, 2 p2 - 1)` |
//! | overlay | `p1 > 0.5 ? p2 t + (p1 - (p2 - p1)), t = (p2 - p1) / 0.5 : p2 p1 / 0.5` |
//!
//! The overlay variant is this toolkit's own piecewise formula, not the
//! textbook overlay.
//!
//! If the top alpha is at least [`OPAQUE_THRESHOLD`] (254) the opaque
//! result is returned as-is. Otherwise the opaque result, carrying the
//! top's alpha, is composited over the bottom with [`over`].
//!
//! # Example
//!
//! ```rust
//! use sprite_ops::blend::{blend, over, BlendMode};
//! use sprite_core::Color;
//!
//! let bottom = Color::opaque(200, 100, 50);
//! let top = Color::opaque(128, 255, 0);
//! assert_eq!(blend(bottom, top, BlendMode::Darken), Color::opaque(128, 100, 0));
//! assert_eq!(over(bottom, Color::TRANSPARENT), bottom);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sprite_core::{unit_to_byte, Color, ParamColor};

use crate::{OpsError, OpsResult};

/// Top alpha at or above which blend modes skip the second `over` pass.
pub const OPAQUE_THRESHOLD: u8 = 254;

/// Default multiplier for [`over_custom_alpha`].
pub const DEFAULT_CUSTOM_ALPHA: f64 = 0.5;

/// Blend mode for compositing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BlendMode {
    /// Standard alpha compositing.
    #[default]
    Over,
    /// Piecewise overlay (toolkit-specific formula).
    Overlay,
    /// Screen (lighten).
    Screen,
    /// Multiply (darken).
    Multiply,
    /// Absolute difference.
    Difference,
    /// Channel-wise minimum.
    Darken,
    /// Channel-wise maximum.
    Lighten,
    /// Soft light.
    SoftLight,
    /// Hard light.
    HardLight,
    /// Color dodge.
    ColorDodge,
    /// Color burn.
    ColorBurn,
    /// Pin light.
    PinLight,
}

impl BlendMode {
    /// Every blend mode, `Over` first.
    pub const ALL: [BlendMode; 12] = [
        Self::Over,
        Self::Overlay,
        Self::Screen,
        Self::Multiply,
        Self::Difference,
        Self::Darken,
        Self::Lighten,
        Self::SoftLight,
        Self::HardLight,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::PinLight,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Overlay => "overlay",
            Self::Screen => "screen",
            Self::Multiply => "multiply",
            Self::Difference => "difference",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::PinLight => "pin-light",
        }
    }

    /// Per-channel formula for the non-`Over` modes.
    ///
    /// `Over` has no per-channel form and returns the top channel.
    #[inline]
    pub fn channel(self, p1: f64, p2: f64) -> f64 {
        match self {
            Self::Over => p2,
            Self::Multiply => p1 * p2,
            Self::Screen => 1.0 - (1.0 - p1) * (1.0 - p2),
            Self::Difference => (p1 - p2).abs(),
            Self::Darken => p1.min(p2),
            Self::Lighten => p1.max(p2),
            Self::SoftLight => (1.0 - 2.0 * p2) * p1 * p1 + 2.0 * p2 * p1,
            Self::HardLight => {
                if p2 < 0.5 {
                    2.0 * p1 * p2
                } else {
                    1.0 - 2.0 * (1.0 - p1) * (1.0 - p2)
                }
            }
            Self::ColorDodge => {
                if p2 == 1.0 {
                    1.0
                } else {
                    (p1 / (1.0 - p2)).min(1.0)
                }
            }
            Self::ColorBurn => {
                if p2 == 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - p1) / p2).min(1.0)
                }
            }
            Self::PinLight => {
                if p2 < 0.5 {
                    p1.min(2.0 * p2)
                } else {
                    p1.max(2.0 * p2 - 1.0)
                }
            }
            Self::Overlay => {
                if p1 > 0.5 {
                    let t = (p2 - p1) / 0.5;
                    p2 * t + (p1 - (p2 - p1))
                } else {
                    let t = p1 / 0.5;
                    p2 * t
                }
            }
        }
    }

    /// Blends `top` onto `bottom` with this mode.
    #[inline]
    pub fn apply(self, bottom: Color, top: Color) -> Color {
        blend(bottom, top, self)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = OpsError;

    /// Parses a mode name case-insensitively.
    ///
    /// `normal` is accepted as an alias of `over`, and underscores are
    /// treated as hyphens.
    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        if key == "normal" {
            return Ok(Self::Over);
        }
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| OpsError::UnknownBlendMode(s.to_string()))
    }
}

/// Composites `rgb` with alpha `a2` over `bottom`.
#[inline]
fn over_param(bottom: ParamColor, rgb: [f64; 3], a2: f64) -> Color {
    let a1 = bottom.a;
    let divisor = a2 + a1 * (1.0 - a2);
    if divisor <= 0.0 {
        return Color::TRANSPARENT;
    }
    let mix = |top: f64, bot: f64| (top * a2 + bot * a1 * (1.0 - a2)) / divisor;
    Color::new(
        unit_to_byte(mix(rgb[0], bottom.r)),
        unit_to_byte(mix(rgb[1], bottom.g)),
        unit_to_byte(mix(rgb[2], bottom.b)),
        unit_to_byte(divisor),
    )
}

/// Standard alpha compositing of `top` over `bottom`.
///
/// Two fully transparent inputs yield [`Color::TRANSPARENT`].
#[inline]
pub fn over(bottom: Color, top: Color) -> Color {
    let top_p = ParamColor::from(top);
    over_param(ParamColor::from(bottom), top_p.rgb(), top_p.a)
}

/// [`over`] with the top alpha replaced by `round(top_alpha) * multiplier`.
///
/// `top_alpha` is normalized before rounding, so any top with alpha of at
/// least 128 composites at exactly `multiplier` strength and anything
/// fainter is ignored. This gives a fixed-strength overlay independent of
/// the source's alpha ramp.
///
/// ```rust
/// use sprite_ops::blend::over_custom_alpha;
/// use sprite_core::Color;
///
/// let out = over_custom_alpha(Color::opaque(0, 0, 0), Color::opaque(200, 200, 200), 0.5);
/// assert_eq!(out, Color::opaque(100, 100, 100));
/// ```
#[inline]
pub fn over_custom_alpha(bottom: Color, top: Color, multiplier: f64) -> Color {
    let top_p = ParamColor::from(top);
    let a2 = top_p.a.round() * multiplier;
    over_param(ParamColor::from(bottom), top_p.rgb(), a2)
}

/// Blends `top` onto `bottom` with `mode`.
pub fn blend(bottom: Color, top: Color, mode: BlendMode) -> Color {
    if mode == BlendMode::Over {
        return over(bottom, top);
    }

    let p1 = ParamColor::from(bottom);
    let p2 = ParamColor::from(top);
    let opaque = Color::from(ParamColor::new(
        mode.channel(p1.r, p2.r),
        mode.channel(p1.g, p2.g),
        mode.channel(p1.b, p2.b),
        1.0,
    ));

    if top.a >= OPAQUE_THRESHOLD {
        opaque
    } else {
        over(bottom, opaque.with_alpha(top.a))
    }
}

/// Shared, thread-safe custom blend function.
pub type BlendFn = Arc<dyn Fn(Color, Color) -> Color + Send + Sync>;

/// A resolved blend operation, ready for a pixel loop.
#[derive(Clone)]
pub enum BlendOp {
    /// A built-in mode.
    Mode(BlendMode),
    /// A caller-supplied function `(bottom, top) -> out`.
    Custom(BlendFn),
}

impl BlendOp {
    /// Wraps a closure as a custom blend operation.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Color, Color) -> Color + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Builds an [`over_custom_alpha`] operation with a fixed multiplier.
    pub fn over_custom_alpha(multiplier: f64) -> Self {
        Self::custom(move |b, t| over_custom_alpha(b, t, multiplier))
    }

    /// Applies the operation.
    #[inline]
    pub fn apply(&self, bottom: Color, top: Color) -> Color {
        match self {
            Self::Mode(mode) => blend(bottom, top, *mode),
            Self::Custom(f) => f(bottom, top),
        }
    }
}

impl Default for BlendOp {
    fn default() -> Self {
        Self::Mode(BlendMode::Over)
    }
}

impl From<BlendMode> for BlendOp {
    fn from(mode: BlendMode) -> Self {
        Self::Mode(mode)
    }
}

impl fmt::Debug for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(mode) => f.debug_tuple("Mode").field(mode).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Caller-side blend selection, resolved once into a [`BlendOp`].
///
/// ```rust
/// use sprite_ops::blend::{BlendMode, BlendSelector};
///
/// let op = BlendSelector::from("Screen").resolve()?;
/// assert!(matches!(op, sprite_ops::BlendOp::Mode(BlendMode::Screen)));
/// assert!(BlendSelector::from("sparkle").resolve().is_err());
/// # Ok::<(), sprite_ops::OpsError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub enum BlendSelector {
    /// No preference: [`BlendMode::Over`].
    #[default]
    Default,
    /// A mode name, parsed case-insensitively.
    Named(String),
    /// An already-resolved operation.
    Op(BlendOp),
}

impl BlendSelector {
    /// Resolves the selector.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::UnknownBlendMode`] for names that match no mode.
    pub fn resolve(&self) -> OpsResult<BlendOp> {
        match self {
            Self::Default => Ok(BlendOp::default()),
            Self::Named(name) => name.parse::<BlendMode>().map(BlendOp::Mode),
            Self::Op(op) => Ok(op.clone()),
        }
    }
}

impl From<&str> for BlendSelector {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for BlendSelector {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<BlendMode> for BlendSelector {
    fn from(mode: BlendMode) -> Self {
        Self::Op(BlendOp::Mode(mode))
    }
}

impl From<BlendOp> for BlendSelector {
    fn from(op: BlendOp) -> Self {
        Self::Op(op)
    }
}

impl From<Option<BlendMode>> for BlendSelector {
    fn from(mode: Option<BlendMode>) -> Self {
        mode.map_or(Self::Default, Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_over_transparent_top_is_identity() {
        for c in [
            Color::new(10, 20, 30, 255),
            Color::new(200, 1, 77, 128),
            Color::new(5, 5, 5, 1),
        ] {
            assert_eq!(over(c, Color::TRANSPARENT), c);
            assert_eq!(over(c, Color::new(255, 255, 255, 0)), c);
        }
    }

    #[test]
    fn test_over_transparent_bottom_is_identity() {
        for c in [
            Color::new(10, 20, 30, 255),
            Color::new(200, 1, 77, 128),
            Color::new(5, 5, 5, 1),
        ] {
            assert_eq!(over(Color::TRANSPARENT, c), c);
        }
    }

    #[test]
    fn test_over_both_transparent_is_transparent_black() {
        let out = over(Color::new(9, 9, 9, 0), Color::new(200, 100, 50, 0));
        assert_eq!(out, Color::TRANSPARENT);
    }

    #[test]
    fn test_over_opaque_top_replaces() {
        let top = Color::opaque(1, 2, 3);
        assert_eq!(over(Color::opaque(200, 200, 200), top), top);
    }

    #[test]
    fn test_over_half_alpha() {
        // 0.5 red over opaque blue
        let out = over(Color::opaque(0, 0, 255), Color::new(255, 0, 0, 128));
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.b, 127);
    }

    #[test]
    fn test_opaque_top_uses_formula_directly() {
        let bottom = Color::new(180, 60, 20, 90);
        let top = Color::opaque(100, 200, 255);
        let p1 = ParamColor::from(bottom);
        let p2 = ParamColor::from(top);
        for mode in BlendMode::ALL.into_iter().skip(1) {
            let expected = Color::from(ParamColor::new(
                mode.channel(p1.r, p2.r),
                mode.channel(p1.g, p2.g),
                mode.channel(p1.b, p2.b),
                1.0,
            ));
            assert_eq!(blend(bottom, top, mode), expected, "{mode}");
        }
    }

    #[test]
    fn test_channel_formulas_unit_range() {
        assert_relative_eq!(BlendMode::SoftLight.channel(0.5, 0.25), 0.375);
        assert_relative_eq!(BlendMode::HardLight.channel(0.5, 0.75), 0.75);
        assert_relative_eq!(BlendMode::ColorDodge.channel(0.25, 0.5), 0.5);
        assert_relative_eq!(BlendMode::ColorBurn.channel(0.75, 0.5), 0.5);
        assert_relative_eq!(BlendMode::Overlay.channel(0.75, 1.0), 1.0);
        assert_relative_eq!(BlendMode::Overlay.channel(0.25, 0.5), 0.25);
    }

    #[test]
    fn test_near_opaque_threshold_is_254() {
        let bottom = Color::opaque(0, 0, 0);
        let top = Color::new(255, 255, 255, 254);
        // Fast path: treated as fully opaque
        assert_eq!(blend(bottom, top, BlendMode::Screen), Color::opaque(255, 255, 255));
        // Below threshold: second pass over the bottom
        let partial = blend(bottom, top.with_alpha(128), BlendMode::Screen);
        assert_eq!(partial, Color::opaque(128, 128, 128));
    }

    #[test]
    fn test_mode_formulas() {
        let b = Color::opaque(204, 51, 128);
        let t = Color::opaque(102, 153, 255);
        assert_eq!(blend(b, t, BlendMode::Multiply), Color::opaque(82, 31, 128));
        assert_eq!(blend(b, t, BlendMode::Screen), Color::opaque(224, 173, 255));
        assert_eq!(blend(b, t, BlendMode::Difference), Color::opaque(102, 102, 127));
        assert_eq!(blend(b, t, BlendMode::Darken), Color::opaque(102, 51, 128));
        assert_eq!(blend(b, t, BlendMode::Lighten), Color::opaque(204, 153, 255));
    }

    #[test]
    fn test_dodge_and_burn_edges() {
        let b = Color::opaque(51, 51, 51);
        assert_eq!(
            blend(b, Color::opaque(255, 255, 255), BlendMode::ColorDodge),
            Color::opaque(255, 255, 255)
        );
        assert_eq!(
            blend(b, Color::opaque(0, 0, 0), BlendMode::ColorBurn),
            Color::opaque(0, 0, 0)
        );
        // Burn with a white top leaves the bottom unchanged
        assert_eq!(blend(b, Color::opaque(255, 255, 255), BlendMode::ColorBurn), b);
    }

    #[test]
    fn test_pin_light_and_hard_light() {
        let b = Color::opaque(128, 128, 128);
        let dark = Color::opaque(25, 25, 25);
        let light = Color::opaque(230, 230, 230);
        assert_eq!(blend(b, dark, BlendMode::PinLight), Color::opaque(50, 50, 50));
        assert_eq!(blend(b, light, BlendMode::PinLight), Color::opaque(205, 205, 205));
        assert_eq!(blend(b, dark, BlendMode::HardLight), Color::opaque(25, 25, 25));
    }

    #[test]
    fn test_overlay_piecewise() {
        // p1 <= 0.5: p2 * p1 / 0.5
        let low = blend(Color::opaque(51, 51, 51), Color::opaque(255, 255, 255), BlendMode::Overlay);
        assert_eq!(low, Color::opaque(102, 102, 102));
        // p1 > 0.5 with p2 == p1 is the identity
        let c = Color::opaque(204, 204, 204);
        assert_eq!(blend(c, c, BlendMode::Overlay), c);
    }

    #[test]
    fn test_over_custom_alpha() {
        let bottom = Color::opaque(0, 0, 0);
        let top = Color::opaque(200, 100, 0);
        assert_eq!(over_custom_alpha(bottom, top, 0.5), Color::opaque(100, 50, 0));
        // Faint top rounds to zero alpha and is ignored
        assert_eq!(over_custom_alpha(bottom, top.with_alpha(100), 0.5), bottom);
        // Alpha 128 rounds up to full strength
        assert_eq!(
            over_custom_alpha(bottom, top.with_alpha(128), DEFAULT_CUSTOM_ALPHA),
            Color::opaque(100, 50, 0)
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("OVERLAY".parse::<BlendMode>().unwrap(), BlendMode::Overlay);
        assert_eq!("normal".parse::<BlendMode>().unwrap(), BlendMode::Over);
        assert_eq!("soft_light".parse::<BlendMode>().unwrap(), BlendMode::SoftLight);
        for mode in BlendMode::ALL {
            assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        }
        let err = "glow".parse::<BlendMode>().unwrap_err();
        assert!(matches!(err, OpsError::UnknownBlendMode(ref n) if n == "glow"));
    }

    #[test]
    fn test_selector_resolution() {
        assert!(matches!(
            BlendSelector::Default.resolve().unwrap(),
            BlendOp::Mode(BlendMode::Over)
        ));
        assert!(matches!(
            BlendSelector::from("Multiply").resolve().unwrap(),
            BlendOp::Mode(BlendMode::Multiply)
        ));
        assert!(BlendSelector::from("nope").resolve().is_err());

        let custom = BlendSelector::from(BlendOp::custom(|b, _| b)).resolve().unwrap();
        let b = Color::opaque(1, 2, 3);
        assert_eq!(custom.apply(b, Color::WHITE), b);
    }

    #[test]
    fn test_over_custom_alpha_op() {
        let op = BlendOp::over_custom_alpha(0.5);
        assert_eq!(
            op.apply(Color::opaque(0, 0, 0), Color::opaque(200, 200, 200)),
            Color::opaque(100, 100, 100)
        );
        assert_eq!(format!("{op:?}"), "Custom(..)");
    }
}
