//! Named HSV adjustment presets.
//!
//! An [`HsvMod`] bundles an HSV triple with a display name and free-form
//! tags, so palettes of adjustments can be stored as JSON and applied to
//! sprites later.
//!
//! ```rust
//! use sprite_color::HsvMod;
//!
//! let json = r#"{"name": "dusk", "hsv": {"h": 270.0, "s": -10.0, "v": -25.0}, "tags": ["night"]}"#;
//! let preset: HsvMod = serde_json::from_str(json).unwrap();
//! assert!(preset.has_tag("night"));
//! ```

use serde::{Deserialize, Serialize};
use sprite_core::{Color, PixelBuffer};

use crate::adjust::hsv_mod_buffer;
use crate::hsv::{hsv_mod_pixel, Hsv};

/// A named HSV adjustment.
///
/// `hsv.h` is a hue (replacement for pixels, rotation for buffers);
/// `hsv.s` and `hsv.v` are deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsvMod {
    /// Display name
    pub name: String,
    /// Hue and saturation/value deltas
    pub hsv: Hsv,
    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl HsvMod {
    /// Creates a preset from `[h, s, v]` values.
    pub fn new(name: impl Into<String>, values: [f64; 3], tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            hsv: Hsv::from(values),
            tags,
        }
    }

    /// Returns `true` if the preset carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Applies the preset to one pixel, replacing its hue.
    pub fn apply_to_pixel(&self, color: Color) -> Color {
        hsv_mod_pixel(color, self.hsv.h, self.hsv.s, self.hsv.v)
    }

    /// Applies the preset to a buffer, rotating hue.
    pub fn apply_to_buffer(&self, buffer: &PixelBuffer) -> PixelBuffer {
        hsv_mod_buffer(buffer, self.hsv.h, self.hsv.s, self.hsv.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_serde_roundtrip() {
        let preset = HsvMod::new("warm", [30.0, 5.0, 0.0], vec!["day".into()]);
        let json = serde_json::to_string(&preset).unwrap();
        let back: HsvMod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preset);
    }

    #[test]
    fn test_preset_tags_default_empty() {
        let preset: HsvMod =
            serde_json::from_str(r#"{"name": "x", "hsv": {"h": 0.0, "s": 0.0, "v": 0.0}}"#).unwrap();
        assert!(preset.tags.is_empty());
        assert!(!preset.has_tag("x"));
    }

    #[test]
    fn test_preset_pixel_vs_buffer_hue() {
        let preset = HsvMod::new("shift", [120.0, 0.0, 0.0], vec![]);
        let green = Color::opaque(0, 255, 0);
        // Replacement: already at hue 120
        assert_eq!(preset.apply_to_pixel(green), green);
        // Rotation: 120 + 120 = 240
        let buf = PixelBuffer::filled(1, 1, green).unwrap();
        assert_eq!(
            preset.apply_to_buffer(&buf).get(0, 0).unwrap(),
            Color::opaque(0, 0, 255)
        );
    }
}
