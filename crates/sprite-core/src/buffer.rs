//! Positioned RGBA pixel buffer.
//!
//! [`PixelBuffer`] is the data structure every other crate in the
//! workspace operates on: a flat `width * height * 4` byte vector of
//! straight-alpha `[r, g, b, a]` groups, plus an origin that places the
//! buffer in a shared logical coordinate space for compositing.
//!
//! # Memory Layout
//!
//! Pixels are stored row-major, top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! # Lifecycle
//!
//! A buffer is created zero-filled (fully transparent) or from existing
//! bytes, mutated in place, and never resized. Operations that change the
//! size return a new buffer. `Clone` is a deep copy; clones never alias.
//!
//! # Usage
//!
//! ```rust
//! use sprite_core::{Color, PixelBuffer};
//!
//! let mut buf = PixelBuffer::new(4, 4)?.with_origin(10, -2);
//! buf.set(1, 2, Color::opaque(255, 0, 0))?;
//! assert_eq!(buf.get(1, 2)?, Color::opaque(255, 0, 0));
//! assert!(buf.get(4, 0).is_err());
//! # Ok::<(), sprite_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`crate::color::Color`] - pixel values
//! - [`crate::rect::Rect`] - region arguments and bounds
//! - [`crate::error::Error`] - bounds and construction errors
//!
//! # Used By
//!
//! - `sprite-color` - HSV buffer transforms
//! - `sprite-ops` - blending, compositing, island extraction
//! - `sprite-io` - decoding, snapshots, rendering

use crate::{Color, Error, Rect, Result};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA8 buffer with a logical origin.
///
/// # Invariants
///
/// - `data.len() == width * height * 4`
/// - `width > 0` and `height > 0`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    origin_x: i32,
    origin_y: i32,
}

/// Computes `width * height * 4`, rejecting zero and overflowing sizes.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::empty_input(format!(
            "zero-sized buffer {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

impl PixelBuffer {
    /// Creates a fully transparent buffer at origin (0, 0).
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if either dimension is zero
    /// - [`Error::InvalidDimensions`] if the byte size overflows
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            origin_x: 0,
            origin_y: 0,
        })
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut buf = Self::new(width, height)?;
        buf.fill(color);
        Ok(buf)
    }

    /// Wraps existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            origin_x: 0,
            origin_y: 0,
        })
    }

    /// Wraps RGBA bytes, deriving the height from the byte length.
    ///
    /// ```rust
    /// use sprite_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_rgba(vec![0; 2 * 3 * 4], 2)?;
    /// assert_eq!(buf.dimensions(), (2, 3));
    /// # Ok::<(), sprite_core::Error>(())
    /// ```
    pub fn from_rgba(data: Vec<u8>, width: u32) -> Result<Self> {
        if width == 0 {
            return Err(Error::empty_input("zero-width buffer"));
        }
        let row = width as usize * CHANNELS;
        if data.len() % row != 0 {
            return Err(Error::invalid_dimensions(
                width,
                0,
                format!("{} bytes is not a whole number of {}-byte rows", data.len(), row),
            ));
        }
        let height = u32::try_from(data.len() / row)
            .map_err(|_| Error::invalid_dimensions(width, u32::MAX, "height overflows"))?;
        Self::from_raw(width, height, data)
    }

    /// Returns this buffer placed at the given logical origin.
    #[inline]
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Moves the buffer's logical origin.
    #[inline]
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Returns the logical origin as (x, y).
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the buffer's footprint in the logical coordinate space.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin_x, self.origin_y, self.width, self.height)
    }

    /// Returns the buffer's own coordinate rectangle, at (0, 0).
    #[inline]
    pub fn local_bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns the raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw RGBA bytes mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns `true` if (x, y) addresses a pixel of this buffer.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Result<usize> {
        if !self.in_bounds(x, y) {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Reads the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `x < 0 || x >= width || y < 0 || y >= height`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Result<Color> {
        let i = self.offset(x, y)?;
        Ok(Color::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Writes the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] under the same contract as [`get`](Self::get).
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        let i = self.offset(x, y)?;
        self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
        Ok(())
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Fills the half-open box `[x1, x2) × [y1, y2)` with `color`.
    ///
    /// Nothing is clamped: the whole box must lie inside the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] before writing anything if the box
    /// is inverted or leaves the buffer.
    pub fn fill_rect(&mut self, color: Color, x1: i32, x2: i32, y1: i32, y2: i32) -> Result<()> {
        if x1 > x2 || y1 > y2 {
            return Err(Error::invalid_region(x1, y1, 0, 0, self.width, self.height));
        }
        let region = Rect::from_corners(x1, y1, x2, y2);
        if !self.local_bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }
        let px = color.to_array();
        let stride = self.width as usize * CHANNELS;
        for y in y1..y2 {
            let row = y as usize * stride;
            let start = row + x1 as usize * CHANNELS;
            let end = row + x2 as usize * CHANNELS;
            for chunk in self.data[start..end].chunks_exact_mut(CHANNELS) {
                chunk.copy_from_slice(&px);
            }
        }
        Ok(())
    }

    /// Repaints every pixel whose alpha is strictly greater than `alpha_min`.
    pub fn fill_where_alpha(&mut self, color: Color, alpha_min: u8) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            if chunk[3] > alpha_min {
                chunk.copy_from_slice(&px);
            }
        }
    }

    /// Clears to transparent every pixel outside `[x1, x2) × [y1, y2)`.
    ///
    /// The rectangle may extend past the buffer; only pixels are affected.
    pub fn clip(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let stride = self.width as usize * CHANNELS;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x < x1 || x >= x2 || y < y1 || y >= y2 {
                    let i = y as usize * stride + x as usize * CHANNELS;
                    self.data[i..i + CHANNELS].fill(0);
                }
            }
        }
    }

    /// Copies `region` of `other` into this buffer, shifted by the offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region does not fit in
    /// `other`, or its shifted image does not fit in `self` (including an
    /// offset that overflows `i32`). Nothing is written on error.
    pub fn copy_from(
        &mut self,
        other: &PixelBuffer,
        region: Rect,
        x_offset: i32,
        y_offset: i32,
    ) -> Result<()> {
        if !other.local_bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                other.width,
                other.height,
            ));
        }
        let shifted = region
            .x
            .checked_add(x_offset)
            .zip(region.y.checked_add(y_offset));
        let Some((tx, ty)) = shifted else {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        };
        let target = Rect::new(tx, ty, region.width, region.height);
        if !self.local_bounds().contains_rect(&target) {
            return Err(Error::invalid_region(
                target.x,
                target.y,
                target.width,
                target.height,
                self.width,
                self.height,
            ));
        }
        for ((sx, sy), (dx, dy)) in region.iter_coords().zip(target.iter_coords()) {
            let color = other.get(sx, sy)?;
            self.set(dx, dy, color)?;
        }
        Ok(())
    }

    /// Returns the first pixel with non-zero alpha, scanning column by column.
    pub fn first_opaque_color(&self) -> Option<Color> {
        self.local_bounds()
            .iter_coords()
            .filter_map(|(x, y)| self.get(x, y).ok())
            .find(|c| c.a >= 1)
    }

    /// Iterates over `(x, y, color)` in memory (row-major) order.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32, Color)> + '_ {
        let w = self.width as usize;
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, px)| {
                (
                    (i % w) as i32,
                    (i / w) as i32,
                    Color::new(px[0], px[1], px[2], px[3]),
                )
            })
    }

    /// Returns a new buffer with `f` applied to every pixel.
    ///
    /// The result keeps this buffer's size and origin.
    pub fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn(Color) -> Color,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(CHANNELS) {
            data.extend_from_slice(&f(Color::new(px[0], px[1], px[2], px[3])).to_array());
        }
        Self {
            data,
            width: self.width,
            height: self.height,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
        }
    }

    /// Nearest-neighbour integer upscale.
    ///
    /// Each source pixel becomes a `factor × factor` block. The origin is
    /// scaled along with the content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `factor` is zero or the
    /// scaled size overflows.
    pub fn scale_nearest(&self, factor: u32) -> Result<PixelBuffer> {
        if factor == 0 {
            return Err(Error::invalid_dimensions(
                self.width,
                self.height,
                "scale factor must be > 0",
            ));
        }
        let (w, h) = match (self.width.checked_mul(factor), self.height.checked_mul(factor)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(Error::invalid_dimensions(
                    self.width,
                    self.height,
                    format!("scaling by {factor} overflows"),
                ));
            }
        };
        let mut out = PixelBuffer::new(w, h)?;
        let f = factor as usize;
        let src_stride = self.width as usize * CHANNELS;
        let dst_stride = w as usize * CHANNELS;
        for row in 0..self.height as usize {
            // Expand one source row horizontally, then repeat it `factor` times
            let src = &self.data[row * src_stride..(row + 1) * src_stride];
            let mut line = Vec::with_capacity(dst_stride);
            for px in src.chunks_exact(CHANNELS) {
                for _ in 0..f {
                    line.extend_from_slice(px);
                }
            }
            for k in 0..f {
                let dst_row = row * f + k;
                out.data[dst_row * dst_stride..(dst_row + 1) * dst_stride].copy_from_slice(&line);
            }
        }
        Ok(out.with_origin(
            self.origin_x.saturating_mul(factor as i32),
            self.origin_y.saturating_mul(factor as i32),
        ))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("origin", &(self.origin_x, self.origin_y))
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(255, 0, 0);

    #[test]
    fn test_buffer_new_is_transparent() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.data().len(), 3 * 2 * 4);
        assert!(buf.data().iter().all(|&b| b == 0));
        assert_eq!(buf.origin(), (0, 0));
    }

    #[test]
    fn test_buffer_zero_sized_rejected() {
        assert!(PixelBuffer::new(0, 4).unwrap_err().is_empty_input());
        assert!(PixelBuffer::new(4, 0).unwrap_err().is_empty_input());
        assert!(PixelBuffer::from_rgba(vec![], 4).unwrap_err().is_empty_input());
    }

    #[test]
    fn test_buffer_from_raw_wrong_size() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_buffer_from_rgba_partial_row() {
        assert!(PixelBuffer::from_rgba(vec![0; 10], 2).is_err());
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.set(3, 1, RED).unwrap();
        assert_eq!(buf.get(3, 1).unwrap(), RED);
        // Row-major layout
        let i = (4 + 3) * 4;
        assert_eq!(&buf.data()[i..i + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_buffer_out_of_bounds_never_clamps() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
            assert!(buf.get(x, y).unwrap_err().is_bounds_error());
            assert!(buf.set(x, y, RED).unwrap_err().is_bounds_error());
        }
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_fill_rect_half_open() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.fill_rect(RED, 1, 3, 0, 2).unwrap();
        assert_eq!(buf.get(1, 0).unwrap(), RED);
        assert_eq!(buf.get(2, 1).unwrap(), RED);
        assert_eq!(buf.get(3, 0).unwrap(), Color::TRANSPARENT);
        assert_eq!(buf.get(1, 2).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_buffer_fill_rect_invalid_is_atomic() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        assert!(buf.fill_rect(RED, 2, 5, 0, 1).is_err());
        assert!(buf.fill_rect(RED, 3, 1, 0, 1).is_err());
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_clone_is_deep() {
        let mut a = PixelBuffer::new(2, 2).unwrap().with_origin(5, 6);
        let b = a.clone();
        a.set(0, 0, RED).unwrap();
        assert_eq!(b.get(0, 0).unwrap(), Color::TRANSPARENT);
        assert_eq!(b.origin(), (5, 6));
    }

    #[test]
    fn test_buffer_clip() {
        let mut buf = PixelBuffer::filled(4, 4, RED).unwrap();
        buf.clip(1, 1, 3, 3);
        for (x, y, c) in buf.pixels() {
            let inside = (1..3).contains(&x) && (1..3).contains(&y);
            assert_eq!(c, if inside { RED } else { Color::TRANSPARENT });
        }
    }

    #[test]
    fn test_buffer_fill_where_alpha() {
        let mut buf = PixelBuffer::new(2, 1).unwrap();
        buf.set(0, 0, Color::new(1, 1, 1, 200)).unwrap();
        buf.set(1, 0, Color::new(1, 1, 1, 201)).unwrap();
        buf.fill_where_alpha(RED, 200);
        assert_eq!(buf.get(0, 0).unwrap(), Color::new(1, 1, 1, 200));
        assert_eq!(buf.get(1, 0).unwrap(), RED);
    }

    #[test]
    fn test_buffer_copy_from() {
        let src = PixelBuffer::filled(2, 2, RED).unwrap();
        let mut dst = PixelBuffer::new(4, 4).unwrap();
        dst.copy_from(&src, Rect::new(0, 0, 2, 2), 2, 1).unwrap();
        assert_eq!(dst.get(2, 1).unwrap(), RED);
        assert_eq!(dst.get(3, 2).unwrap(), RED);
        assert_eq!(dst.get(1, 1).unwrap(), Color::TRANSPARENT);

        assert!(dst.copy_from(&src, Rect::new(0, 0, 2, 2), 3, 3).is_err());
    }

    #[test]
    fn test_buffer_copy_from_offset_overflow() {
        let src = PixelBuffer::filled(2, 1, RED).unwrap();
        let mut dst = PixelBuffer::new(2, 1).unwrap();
        let before = dst.clone();
        let err = dst.copy_from(&src, Rect::new(1, 0, 1, 1), i32::MAX, 0).unwrap_err();
        assert!(err.is_bounds_error());
        assert!(dst.copy_from(&src, Rect::new(0, 0, 1, 1), 0, i32::MIN).is_err());
        assert_eq!(dst, before);
    }

    #[test]
    fn test_buffer_first_opaque_color_column_major() {
        let mut buf = PixelBuffer::new(3, 3).unwrap();
        buf.set(2, 0, Color::opaque(0, 0, 9)).unwrap();
        buf.set(0, 2, Color::opaque(0, 9, 0)).unwrap();
        // Column 0 is scanned before column 2
        assert_eq!(buf.first_opaque_color(), Some(Color::opaque(0, 9, 0)));
        assert_eq!(PixelBuffer::new(1, 1).unwrap().first_opaque_color(), None);
    }

    #[test]
    fn test_buffer_scale_nearest() {
        let mut buf = PixelBuffer::new(2, 1).unwrap().with_origin(1, 2);
        buf.set(1, 0, RED).unwrap();
        let scaled = buf.scale_nearest(3).unwrap();
        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(scaled.origin(), (3, 6));
        assert_eq!(scaled.get(2, 2).unwrap(), Color::TRANSPARENT);
        assert_eq!(scaled.get(3, 0).unwrap(), RED);
        assert_eq!(scaled.get(5, 2).unwrap(), RED);
        assert!(buf.scale_nearest(0).is_err());
    }

    #[test]
    fn test_buffer_map_pixels_keeps_origin() {
        let buf = PixelBuffer::new(2, 2).unwrap().with_origin(-1, 4);
        let mapped = buf.map_pixels(|c| c.with_alpha(9));
        assert_eq!(mapped.origin(), (-1, 4));
        assert!(mapped.pixels().all(|(_, _, c)| c.a == 9));
    }
}
