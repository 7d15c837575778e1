//! Alpha masking.
//!
//! Both operations read the alpha channel of a same-sized mask buffer.
//! Their comparisons are asymmetric:
//!
//! | Function | Keeps pixel when |
//! |---|---|
//! | [`alpha_mask_in_place`] | `mask.a > min_alpha` |
//! | [`alpha_mask`] | `mask.a >= min_alpha` |
//!
//! With the default threshold of 254 the in-place form keeps only fully
//! opaque mask pixels, while the copying form also keeps alpha 254.

use sprite_core::{Color, Error, PixelBuffer};
use tracing::trace;

use crate::OpsResult;

/// Default mask alpha threshold.
pub const DEFAULT_MASK_ALPHA: u8 = 254;

fn check_dims(buffer: &PixelBuffer, mask: &PixelBuffer) -> OpsResult<()> {
    if buffer.dimensions() != mask.dimensions() {
        return Err(Error::dimension_mismatch(buffer.dimensions(), mask.dimensions()).into());
    }
    Ok(())
}

/// Clears every pixel whose mask alpha is `<= min_alpha`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the sizes differ; `buffer` is
/// then untouched.
pub fn alpha_mask_in_place(buffer: &mut PixelBuffer, mask: &PixelBuffer, min_alpha: u8) -> OpsResult<()> {
    check_dims(buffer, mask)?;
    let mut cleared = 0usize;
    for (x, y, m) in mask.pixels() {
        if m.a <= min_alpha {
            buffer.set(x, y, Color::TRANSPARENT)?;
            cleared += 1;
        }
    }
    trace!(cleared, min_alpha, "alpha_mask_in_place");
    Ok(())
}

/// Returns a copy keeping only pixels whose mask alpha is `>= min_alpha`.
///
/// The result has `buffer`'s size and origin; dropped pixels are
/// transparent.
///
/// ```rust
/// use sprite_core::{Color, PixelBuffer};
/// use sprite_ops::mask::{alpha_mask, DEFAULT_MASK_ALPHA};
///
/// let src = PixelBuffer::filled(2, 1, Color::opaque(9, 9, 9))?;
/// let mut mask = PixelBuffer::new(2, 1)?;
/// mask.set(1, 0, Color::new(0, 0, 0, 254))?;
///
/// let out = alpha_mask(&src, &mask, DEFAULT_MASK_ALPHA)?;
/// assert_eq!(out.get(0, 0)?, Color::TRANSPARENT);
/// assert_eq!(out.get(1, 0)?, Color::opaque(9, 9, 9));
/// # Ok::<(), sprite_ops::OpsError>(())
/// ```
pub fn alpha_mask(buffer: &PixelBuffer, mask: &PixelBuffer, min_alpha: u8) -> OpsResult<PixelBuffer> {
    check_dims(buffer, mask)?;
    let (ox, oy) = buffer.origin();
    let mut out = PixelBuffer::new(buffer.width(), buffer.height())?.with_origin(ox, oy);
    for (x, y, m) in mask.pixels() {
        if m.a >= min_alpha {
            out.set(x, y, buffer.get(x, y)?)?;
        }
    }
    Ok(out)
}
