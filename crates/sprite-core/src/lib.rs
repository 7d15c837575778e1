//! # sprite-core
//!
//! Core types for client-side sprite and pixel-art manipulation.
//!
//! This crate provides the foundational types used throughout the
//! sprite-rs workspace:
//!
//! - [`PixelBuffer`] - Positioned RGBA8 buffer, the unit every operation works on
//! - [`Color`], [`ParamColor`] - 8-bit storage and normalized computation colors
//! - [`Rect`] - Half-open regions with signed origins
//! - [`Error`] - Bounds and construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! sprite-core (this crate)
//!    ^
//!    |
//!    +-- sprite-color (HSV transforms)
//!    +-- sprite-ops (blending, compositing, islands)
//!    +-- sprite-io (decoding, snapshots, rendering)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Derive serialization for [`Color`] and [`Rect`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod color;
pub mod error;
pub mod rect;

pub use buffer::{PixelBuffer, CHANNELS};
pub use color::{byte_to_unit, unit_to_byte, Color, ParamColor};
pub use error::{Error, Result};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use sprite_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::color::{Color, ParamColor};
    pub use crate::error::{Error, Result};
    pub use crate::rect::Rect;
}
