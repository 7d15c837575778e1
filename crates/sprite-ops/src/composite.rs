//! Two-buffer compositing with positional offsets.
//!
//! Buffers live in a shared logical space through their origins. The
//! compositor finds where the **top** buffer (at its origin plus the
//! [`CompositeOptions`] move) overlaps the **bottom** buffer and blends
//! only that rectangle; every other bottom pixel is carried over
//! byte-for-byte.
//!
//! ```text
//!   bottom origin
//!   +----------------------+
//!   |                      |
//!   |        +-------------+------+
//!   |        |   overlap   |      |
//!   |        |  (blended)  |      |
//!   +--------+-------------+      |
//!            |         top        |
//!            +--------------------+
//! ```
//!
//! # Operations
//!
//! - [`composite`] - new buffer, bottom untouched
//! - [`composite_into`] - same, written into a caller-owned scratch buffer
//! - [`composite_in_place`] - accumulate onto a target
//! - [`flatten`] - recombine many positioned layers onto a base
//!
//! The blend selector is resolved before any pixel is touched, so an
//! unknown mode name never leaves a half-written buffer behind.
//!
//! # Example
//!
//! ```rust
//! use sprite_core::{Color, PixelBuffer};
//! use sprite_ops::composite::{composite, CompositeOptions};
//!
//! let bottom = PixelBuffer::filled(4, 4, Color::opaque(0, 0, 255))?;
//! let top = PixelBuffer::filled(2, 2, Color::opaque(255, 0, 0))?.with_origin(3, 3);
//!
//! let out = composite(&bottom, &top, "over", CompositeOptions::default())?;
//! assert_eq!(out.get(3, 3)?, Color::opaque(255, 0, 0));
//! assert_eq!(out.get(2, 2)?, Color::opaque(0, 0, 255));
//! # Ok::<(), sprite_ops::OpsError>(())
//! ```

use sprite_core::{Error, PixelBuffer, Rect};
use tracing::{debug, trace};

use crate::blend::{BlendOp, BlendSelector};
use crate::OpsResult;

/// Extra placement of the top layer relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeOptions {
    /// Horizontal shift of the top layer
    pub x_move: i32,
    /// Vertical shift of the top layer
    pub y_move: i32,
}

impl CompositeOptions {
    /// Creates options with the given move.
    pub const fn new(x_move: i32, y_move: i32) -> Self {
        Self { x_move, y_move }
    }

    /// Sets the horizontal shift.
    pub const fn with_x_move(mut self, x_move: i32) -> Self {
        self.x_move = x_move;
        self
    }

    /// Sets the vertical shift.
    pub const fn with_y_move(mut self, y_move: i32) -> Self {
        self.y_move = y_move;
        self
    }
}

/// Top-layer origin after applying the move, widened to avoid overflow.
#[inline]
fn top_origin(top: &PixelBuffer, options: CompositeOptions) -> (i64, i64) {
    let (tx, ty) = top.origin();
    (
        i64::from(tx) + i64::from(options.x_move),
        i64::from(ty) + i64::from(options.y_move),
    )
}

/// Computes the overlap rectangle in **bottom-local** coordinates.
///
/// Returns `None` when the layers do not overlap.
///
/// ```rust
/// use sprite_core::{PixelBuffer, Rect};
/// use sprite_ops::composite::{overlap, CompositeOptions};
///
/// let bottom = PixelBuffer::new(4, 4)?;
/// let top = PixelBuffer::new(3, 3)?.with_origin(2, -1);
/// let r = overlap(&bottom, &top, CompositeOptions::default());
/// assert_eq!(r, Some(Rect::new(2, 0, 2, 2)));
/// # Ok::<(), sprite_core::Error>(())
/// ```
pub fn overlap(bottom: &PixelBuffer, top: &PixelBuffer, options: CompositeOptions) -> Option<Rect> {
    let (bx, by) = bottom.origin();
    let (bx, by) = (i64::from(bx), i64::from(by));
    let (tx, ty) = top_origin(top, options);

    let start_x = (tx - bx).max(0);
    let start_y = (ty - by).max(0);
    let end_x = (bx + i64::from(bottom.width())).min(tx + i64::from(top.width())) - bx;
    let end_y = (by + i64::from(bottom.height())).min(ty + i64::from(top.height())) - by;

    let width = (end_x - start_x).max(0);
    let height = (end_y - start_y).max(0);
    if width == 0 || height == 0 {
        return None;
    }
    // start < end <= bottom size, so everything fits the buffer's types
    Some(Rect::new(
        start_x as i32,
        start_y as i32,
        width as u32,
        height as u32,
    ))
}

/// Blends `top` into `target` over their overlap.
fn blend_region(
    target: &mut PixelBuffer,
    top: &PixelBuffer,
    op: &BlendOp,
    options: CompositeOptions,
) -> OpsResult<()> {
    let Some(region) = overlap(target, top, options) else {
        trace!("composite: layers do not overlap");
        return Ok(());
    };
    let (bx, by) = target.origin();
    let (tx, ty) = top_origin(top, options);
    let dx = (i64::from(bx) - tx) as i32;
    let dy = (i64::from(by) - ty) as i32;

    trace!(
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        "composite region"
    );

    for (x, y) in region.iter_coords() {
        let bottom_px = target.get(x, y)?;
        let top_px = top.get(x + dx, y + dy)?;
        target.set(x, y, op.apply(bottom_px, top_px))?;
    }
    Ok(())
}

/// Composites `top` onto a copy of `bottom`.
///
/// Pixels outside the overlap are identical to `bottom`. The result keeps
/// `bottom`'s size and origin.
///
/// # Errors
///
/// Returns [`OpsError::UnknownBlendMode`](crate::OpsError::UnknownBlendMode)
/// if `op` names no known mode.
pub fn composite(
    bottom: &PixelBuffer,
    top: &PixelBuffer,
    op: impl Into<BlendSelector>,
    options: CompositeOptions,
) -> OpsResult<PixelBuffer> {
    let op = op.into().resolve()?;
    let mut out = bottom.clone();
    blend_region(&mut out, top, &op, options)?;
    Ok(out)
}

/// Composites into a caller-owned scratch buffer.
///
/// `scratch` is overwritten with `bottom` (pixels and origin) before
/// blending, so it can be reused across calls without reallocating.
///
/// # Errors
///
/// Returns an error if the op does not resolve or `scratch` is not the
/// same size as `bottom`. `scratch` is untouched on error.
pub fn composite_into(
    bottom: &PixelBuffer,
    top: &PixelBuffer,
    op: impl Into<BlendSelector>,
    options: CompositeOptions,
    scratch: &mut PixelBuffer,
) -> OpsResult<()> {
    let op = op.into().resolve()?;
    if scratch.dimensions() != bottom.dimensions() {
        return Err(Error::dimension_mismatch(scratch.dimensions(), bottom.dimensions()).into());
    }
    scratch.data_mut().copy_from_slice(bottom.data());
    let (x, y) = bottom.origin();
    scratch.set_origin(x, y);
    blend_region(scratch, top, &op, options)
}

/// Composites `top` directly onto `target`.
///
/// # Errors
///
/// Returns an error if the op does not resolve; `target` is then untouched.
pub fn composite_in_place(
    target: &mut PixelBuffer,
    top: &PixelBuffer,
    op: impl Into<BlendSelector>,
    options: CompositeOptions,
) -> OpsResult<()> {
    let op = op.into().resolve()?;
    blend_region(target, top, &op, options)
}

/// Composites every layer, in order, onto a copy of `base`.
///
/// Each layer is placed at its own origin. Typical use is recombining
/// extracted islands into one image.
pub fn flatten(
    base: &PixelBuffer,
    layers: &[PixelBuffer],
    op: impl Into<BlendSelector>,
) -> OpsResult<PixelBuffer> {
    let op = op.into().resolve()?;
    debug!(
        width = base.width(),
        height = base.height(),
        layers = layers.len(),
        "flatten"
    );
    let mut out = base.clone();
    for layer in layers {
        blend_region(&mut out, layer, &op, CompositeOptions::default())?;
    }
    Ok(out)
}
