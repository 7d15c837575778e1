//! Rectangle type for buffer regions and positioned layers.
//!
//! [`Rect`] describes a half-open region: the left/top edges are
//! inclusive, the right/bottom edges exclusive. Origins are signed so the
//! same type covers both buffer-local regions and the placement of a
//! buffer in the shared compositing space, where negative origins are
//! legal.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Buffer  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use sprite_core::Rect;
//!
//! let bottom = Rect::new(0, 0, 4, 4);
//! let top = Rect::new(2, -1, 4, 4);
//! assert_eq!(bottom.intersect(&top), Some(Rect::new(2, 0, 2, 3)));
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - `bounds()`, region validation, `clip`
//! - `sprite-ops::composite` - overlap computation

/// A rectangle defined by a signed origin and unsigned dimensions.
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at (0, 0) with the given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle from the half-open span `[x1, x2) × [y1, y2)`.
    ///
    /// Swapped corners are normalized.
    ///
    /// ```rust
    /// use sprite_core::Rect;
    ///
    /// assert_eq!(Rect::from_corners(3, 1, 1, 4), Rect::new(1, 1, 2, 3));
    /// ```
    #[inline]
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (min_x, max_x) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (min_y, max_y) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(
            min_x,
            min_y,
            max_x.abs_diff(min_x),
            max_y.abs_diff(min_y),
        )
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Returns the area of the rectangle in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    ///
    /// ```rust
    /// use sprite_core::Rect;
    ///
    /// let rect = Rect::new(-2, -2, 4, 4);
    /// assert!(rect.contains(-2, -2));
    /// assert!(rect.contains(1, 1));
    /// assert!(!rect.contains(2, 0));
    /// ```
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && (px as i64) < self.right()
            && py >= self.y
            && (py as i64) < self.bottom()
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles share no pixel.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if (x as i64) < right && (y as i64) < bottom {
            Some(Rect::new(
                x,
                y,
                (right - x as i64) as u32,
                (bottom - y as i64) as u32,
            ))
        } else {
            None
        }
    }

    /// Returns this rectangle translated by (dx, dy), saturating at the
    /// `i32` limits.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Iterates over all coordinates in the rectangle, column by column.
    ///
    /// The outer loop walks X and the inner loop walks Y, which is the
    /// scan order used throughout the workspace.
    pub fn iter_coords(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x0, y0) = (self.x, self.y);
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |dx| (0..h).map(move |dy| (x0 + dx, y0 + dy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(-10, 20, 100, 50);
        assert_eq!(rect.right(), 90);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.area(), 5000);
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(0, 0, 0, 5).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));

        let c = Rect::new(200, 200, 10, 10);
        assert_eq!(a.intersect(&c), None);

        // Touching edges share no pixel
        let d = Rect::new(100, 0, 10, 10);
        assert_eq!(a.intersect(&d), None);
    }

    #[test]
    fn test_rect_intersect_negative_origin() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(-2, -3, 4, 4);
        assert_eq!(a.intersect(&b), Some(Rect::new(0, 0, 2, 1)));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!outer.contains_rect(&Rect::new(2, 2, 9, 8)));
        assert!(!outer.contains_rect(&Rect::new(-1, 0, 2, 2)));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.translate(-15, 10), Rect::new(-5, 30, 100, 50));
        assert_eq!(rect.translate(i32::MAX, i32::MIN), Rect::new(i32::MAX, i32::MIN, 100, 50));
    }

    #[test]
    fn test_rect_iter_coords_x_major() {
        let coords: Vec<_> = Rect::new(1, 1, 2, 2).iter_coords().collect();
        assert_eq!(coords, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }
}
