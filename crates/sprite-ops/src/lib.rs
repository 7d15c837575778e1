//! # sprite-ops
//!
//! Pixel operations for sprite sheets and layered pixel art.
//!
//! # Modules
//!
//! - [`blend`] - Per-pixel blend modes and blend selection
//! - [`composite`] - Two-buffer compositing with positional offsets
//! - [`island`] - Connected-component extraction and cropping
//! - [`mask`] - Alpha masking
//! - [`transform`] - Canvas padding and wrap-around shifts
//!
//! # Example
//!
//! Split a sprite sheet into islands, then put it back together:
//!
//! ```rust
//! use sprite_core::{Color, PixelBuffer};
//! use sprite_ops::{extract_island_buffers, flatten, BlendSelector, IslandOptions};
//!
//! let mut sheet = PixelBuffer::new(8, 8)?;
//! sheet.fill_rect(Color::opaque(255, 0, 0), 0, 2, 0, 2)?;
//! sheet.fill_rect(Color::opaque(0, 0, 255), 5, 8, 5, 8)?;
//!
//! let sprites = extract_island_buffers(&sheet, &IslandOptions::default())?;
//! assert_eq!(sprites.len(), 2);
//!
//! let blank = PixelBuffer::new(8, 8)?;
//! let rebuilt = flatten(&blank, &sprites, BlendSelector::Default)?;
//! assert_eq!(rebuilt, sheet);
//! # Ok::<(), sprite_ops::OpsError>(())
//! ```
//!
//! # Errors
//!
//! Everything fallible returns [`OpsResult`]. Failing operations leave
//! their target buffer untouched.
//!
//! # Feature Flags
//!
//! - `serde` - Derive serialization for [`BlendMode`], [`IslandOptions`]
//!   and [`CompositeOptions`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod composite;
pub mod island;
pub mod mask;
pub mod transform;

pub use error::{OpsError, OpsResult};
pub use blend::{blend, over, over_custom_alpha, BlendFn, BlendMode, BlendOp, BlendSelector};
pub use composite::{composite, composite_in_place, composite_into, flatten, CompositeOptions};
pub use island::{
    bounds_of, extract_island_buffers, extract_islands, fill_island, fill_island_new,
    flood_fill_select, group_by_size, materialize, Island, IslandBounds, IslandOptions,
    VisitMap, VisitState,
};
pub use mask::{alpha_mask, alpha_mask_in_place};
pub use transform::{enlarge_canvas, offset_wrap};
