//! Canvas-level transforms that produce new buffers.

use sprite_core::{Error, PixelBuffer, CHANNELS};
use tracing::debug;

use crate::OpsResult;

/// Pads `buffer` with transparent margins.
///
/// The source lands at `(left, top)` in the new canvas. The origin moves
/// by `(-left, -top)` so the content keeps its logical position.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] if the padded size overflows.
///
/// ```rust
/// use sprite_core::{Color, PixelBuffer};
/// use sprite_ops::transform::enlarge_canvas;
///
/// let src = PixelBuffer::filled(1, 1, Color::WHITE)?;
/// let big = enlarge_canvas(&src, 2, 1, 0, 3)?;
/// assert_eq!(big.dimensions(), (4, 4));
/// assert_eq!(big.get(2, 3)?, Color::WHITE);
/// assert_eq!(big.origin(), (-2, -3));
/// # Ok::<(), sprite_ops::OpsError>(())
/// ```
pub fn enlarge_canvas(
    buffer: &PixelBuffer,
    left: u32,
    right: u32,
    bottom: u32,
    top: u32,
) -> OpsResult<PixelBuffer> {
    let (w, h) = buffer.dimensions();
    let width = w
        .checked_add(left)
        .and_then(|v| v.checked_add(right))
        .ok_or_else(|| Error::invalid_dimensions(w, h, "padded width overflows"))?;
    let height = h
        .checked_add(top)
        .and_then(|v| v.checked_add(bottom))
        .ok_or_else(|| Error::invalid_dimensions(w, h, "padded height overflows"))?;
    let (dx, dy) = match (i32::try_from(left), i32::try_from(top)) {
        (Ok(dx), Ok(dy)) => (dx, dy),
        _ => return Err(Error::invalid_dimensions(w, h, "margin exceeds i32").into()),
    };

    debug!(width, height, left, top, "enlarge_canvas");

    let (ox, oy) = buffer.origin();
    let mut out = PixelBuffer::new(width, height)?
        .with_origin(ox.saturating_sub(dx), oy.saturating_sub(dy));
    out.copy_from(buffer, buffer.local_bounds(), dx, dy)?;
    Ok(out)
}

/// Shifts contents with wrap-around.
///
/// Output pixel `(x, y)` is read from `((x + dx) mod w, (y + dy) mod h)`,
/// so positive offsets move the image left and up. Negative offsets wrap
/// the other way.
pub fn offset_wrap(buffer: &PixelBuffer, dx: i32, dy: i32) -> PixelBuffer {
    let (w, h) = (i64::from(buffer.width()), i64::from(buffer.height()));
    let src = buffer.data();
    let mut out = buffer.clone();
    for (i, px) in out.data_mut().chunks_exact_mut(CHANNELS).enumerate() {
        let (x, y) = (i as i64 % w, i as i64 / w);
        let sx = (x + i64::from(dx)).rem_euclid(w);
        let sy = (y + i64::from(dy)).rem_euclid(h);
        let at = (sy * w + sx) as usize * CHANNELS;
        px.copy_from_slice(&src[at..at + CHANNELS]);
    }
    out
}
