//! Connected-component ("island") extraction.
//!
//! An island is a maximal 8-connected set of pixels that share a membership
//! predicate with a seed pixel. Extraction partitions every pixel with
//! `alpha >= min_alpha` into disjoint islands; each island can then be
//! materialized as its own cropped, positioned [`PixelBuffer`].
//!
//! # Algorithm
//!
//! ```text
//! for x in 0..width            (x-major scan)
//!   for y in 0..height
//!     if unvisited and alpha >= min_alpha:
//!       BFS from (x, y) over the 3x3 neighbourhood
//! ```
//!
//! Each pixel moves through `Unvisited -> Queued -> Visited` in a
//! [`VisitMap`] owned by the top-level call. The BFS queue is FIFO, so an
//! island's points are listed seed first in breadth-first order.
//!
//! # Membership
//!
//! - **exact-match** (default): same RGB as the seed, and the same alpha
//!   too when `test_alpha` is set
//! - **any-color**: any pixel with `alpha >= min_alpha`
//!
//! In both modes a member must have `alpha >= min_alpha`.
//!
//! # Example
//!
//! ```rust
//! use sprite_core::{Color, PixelBuffer};
//! use sprite_ops::island::{extract_islands, materialize, IslandOptions};
//!
//! let mut buf = PixelBuffer::new(4, 4)?;
//! buf.set(0, 0, Color::opaque(255, 0, 0))?;
//! buf.set(1, 1, Color::opaque(255, 0, 0))?;
//! buf.set(3, 3, Color::opaque(0, 0, 255))?;
//!
//! let islands = extract_islands(&buf, &IslandOptions::default());
//! assert_eq!(islands.len(), 2);
//!
//! let sprite = materialize(&islands[0], &buf)?;
//! assert_eq!(sprite.dimensions(), (2, 2));
//! # Ok::<(), sprite_ops::OpsError>(())
//! ```

use std::collections::VecDeque;

use sprite_core::{Color, Error, PixelBuffer, Rect};
use tracing::{debug, trace, warn};

use crate::{OpsError, OpsResult};

/// Default per-island BFS iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000_000;

/// 3x3 neighbourhood without the center.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Island extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IslandOptions {
    /// Group by alpha connectivity only, ignoring color
    pub any_color: bool,
    /// In exact-match mode, also require equal alpha
    pub test_alpha: bool,
    /// Minimum alpha for a pixel to belong to any island
    pub min_alpha: u8,
    /// BFS dequeue limit per island; the island is truncated past it.
    /// The seed is always admitted, so 0 behaves like 1.
    pub max_iterations: usize,
}

impl Default for IslandOptions {
    fn default() -> Self {
        Self {
            any_color: false,
            test_alpha: true,
            min_alpha: 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IslandOptions {
    /// Sets any-color mode.
    pub fn with_any_color(mut self, any_color: bool) -> Self {
        self.any_color = any_color;
        self
    }

    /// Sets alpha matching in exact-match mode.
    pub fn with_test_alpha(mut self, test_alpha: bool) -> Self {
        self.test_alpha = test_alpha;
        self
    }

    /// Sets the minimum member alpha.
    pub fn with_min_alpha(mut self, min_alpha: u8) -> Self {
        self.min_alpha = min_alpha;
        self
    }

    /// Sets the per-island iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns `true` if `candidate` joins an island seeded with `seed`.
    #[inline]
    pub fn is_member(&self, seed: Color, candidate: Color) -> bool {
        if candidate.a < self.min_alpha {
            return false;
        }
        if self.any_color {
            return true;
        }
        seed.same_rgb(candidate) && (!self.test_alpha || seed.a == candidate.a)
    }
}

/// Traversal state of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet
    #[default]
    Unvisited,
    /// In the BFS queue
    Queued,
    /// Dequeued and assigned to an island
    Visited,
}

/// Per-pixel traversal state for one extraction pass.
#[derive(Debug, Clone)]
pub struct VisitMap {
    width: u32,
    height: u32,
    states: Vec<VisitState>,
}

impl VisitMap {
    /// Creates an all-`Unvisited` map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            states: vec![VisitState::Unvisited; width as usize * height as usize],
        }
    }

    /// Creates a map sized for `buffer`.
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        Self::new(buffer.width(), buffer.height())
    }

    /// Map dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// State at (x, y). Caller guarantees bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> VisitState {
        self.states[self.index(x, y)]
    }

    /// Sets the state at (x, y). Caller guarantees bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, state: VisitState) {
        let i = self.index(x, y);
        self.states[i] = state;
    }

    /// Number of pixels in `Visited` state.
    pub fn visited_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == VisitState::Visited)
            .count()
    }
}

/// Ordered coordinates of one connected region, seed first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Island {
    points: Vec<(i32, i32)>,
}

impl Island {
    /// Points in discovery order.
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the island has no pixels.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The seed pixel, if any.
    pub fn seed(&self) -> Option<(i32, i32)> {
        self.points.first().copied()
    }

    /// Returns `true` if (x, y) belongs to the island. Linear scan.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.points.contains(&(x, y))
    }

    /// Inclusive bounding box.
    pub fn bounds(&self) -> OpsResult<IslandBounds> {
        bounds_of(self)
    }

    /// Consumes the island, returning its points.
    pub fn into_points(self) -> Vec<(i32, i32)> {
        self.points
    }
}

impl From<Vec<(i32, i32)>> for Island {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }
}

/// Inclusive bounding box of an island.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IslandBounds {
    /// Leftmost column
    pub x_min: i32,
    /// Rightmost column
    pub x_max: i32,
    /// Top row
    pub y_min: i32,
    /// Bottom row
    pub y_max: i32,
}

impl IslandBounds {
    /// Box width in pixels.
    pub fn width(&self) -> u32 {
        (i64::from(self.x_max) - i64::from(self.x_min) + 1) as u32
    }

    /// Box height in pixels.
    pub fn height(&self) -> u32 {
        (i64::from(self.y_max) - i64::from(self.y_min) + 1) as u32
    }

    /// The box as a half-open [`Rect`].
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.width(), self.height())
    }
}

/// BFS from `seed`. `seed` must be in bounds and `visited` sized to `buffer`.
fn fill_from(
    buffer: &PixelBuffer,
    seed: (i32, i32),
    options: &IslandOptions,
    visited: &mut VisitMap,
) -> Island {
    let Ok(seed_color) = buffer.get(seed.0, seed.1) else {
        return Island::default();
    };

    let mut points = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    visited.set(seed.0, seed.1, VisitState::Queued);

    let cap = options.max_iterations.max(1);
    let mut iterations = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        if iterations >= cap {
            warn!(
                seed_x = seed.0,
                seed_y = seed.1,
                max_iterations = options.max_iterations,
                "island truncated at iteration cap"
            );
            // Release pending pixels so later seeds can claim them
            visited.set(x, y, VisitState::Unvisited);
            for (qx, qy) in queue.drain(..) {
                visited.set(qx, qy, VisitState::Unvisited);
            }
            break;
        }
        iterations += 1;

        visited.set(x, y, VisitState::Visited);
        points.push((x, y));

        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (x + dx, y + dy);
            if !buffer.in_bounds(nx, ny) || visited.get(nx, ny) != VisitState::Unvisited {
                continue;
            }
            let Ok(color) = buffer.get(nx, ny) else {
                continue;
            };
            if options.is_member(seed_color, color) {
                visited.set(nx, ny, VisitState::Queued);
                queue.push_back((nx, ny));
            }
        }
    }

    trace!(seed_x = seed.0, seed_y = seed.1, pixels = points.len(), "island");
    Island { points }
}

/// Flood-fills one island from `seed`, updating `visited`.
///
/// The seed itself is always included; neighbours must pass
/// [`IslandOptions::is_member`] against the seed's color.
///
/// # Errors
///
/// Returns an error if `seed` is outside `buffer` or `visited` has a
/// different size than `buffer`.
pub fn flood_fill_select(
    buffer: &PixelBuffer,
    seed: (i32, i32),
    options: &IslandOptions,
    visited: &mut VisitMap,
) -> OpsResult<Island> {
    if visited.dimensions() != buffer.dimensions() {
        return Err(Error::dimension_mismatch(visited.dimensions(), buffer.dimensions()).into());
    }
    if !buffer.in_bounds(seed.0, seed.1) {
        return Err(Error::out_of_bounds(seed.0, seed.1, buffer.width(), buffer.height()).into());
    }
    Ok(fill_from(buffer, seed, options, visited))
}

/// Partitions `buffer` into islands.
///
/// Every pixel with `alpha >= min_alpha` lands in exactly one island
/// (unless the iteration cap truncates one, in which case the released
/// pixels seed islands of their own).
pub fn extract_islands(buffer: &PixelBuffer, options: &IslandOptions) -> Vec<Island> {
    let mut visited = VisitMap::for_buffer(buffer);
    let mut islands = Vec::new();

    for x in 0..buffer.width() as i32 {
        for y in 0..buffer.height() as i32 {
            if visited.get(x, y) != VisitState::Unvisited {
                continue;
            }
            let Ok(color) = buffer.get(x, y) else {
                continue;
            };
            if color.a < options.min_alpha {
                continue;
            }
            let island = fill_from(buffer, (x, y), options, &mut visited);
            if !island.is_empty() {
                islands.push(island);
            }
        }
    }

    debug!(
        width = buffer.width(),
        height = buffer.height(),
        islands = islands.len(),
        pixels = visited.visited_count(),
        "extract_islands"
    );
    islands
}

/// Inclusive bounding box of `island`.
///
/// # Errors
///
/// Returns [`OpsError::EmptyInput`] for an empty island.
pub fn bounds_of(island: &Island) -> OpsResult<IslandBounds> {
    let mut points = island.points.iter();
    let &(x0, y0) = points
        .next()
        .ok_or_else(|| OpsError::EmptyInput("island has no points".into()))?;
    let init = IslandBounds {
        x_min: x0,
        x_max: x0,
        y_min: y0,
        y_max: y0,
    };
    Ok(points.fold(init, |b, &(x, y)| IslandBounds {
        x_min: b.x_min.min(x),
        x_max: b.x_max.max(x),
        y_min: b.y_min.min(y),
        y_max: b.y_max.max(y),
    }))
}

/// Crops `island` out of `source` into its own buffer.
///
/// The result spans the island's bounding box and has its origin at
/// `(x_min, y_min)`. Pixels not in the island stay transparent.
///
/// # Errors
///
/// Returns [`OpsError::EmptyInput`] for an empty island and a bounds error
/// if a point lies outside `source`.
pub fn materialize(island: &Island, source: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let b = bounds_of(island)?;
    check_island_bounds(source, island)?;
    let mut out = PixelBuffer::new(b.width(), b.height())?.with_origin(b.x_min, b.y_min);
    for &(x, y) in &island.points {
        out.set(x - b.x_min, y - b.y_min, source.get(x, y)?)?;
    }
    Ok(out)
}

/// Extracts islands and materializes each one.
pub fn extract_island_buffers(
    buffer: &PixelBuffer,
    options: &IslandOptions,
) -> OpsResult<Vec<PixelBuffer>> {
    extract_islands(buffer, options)
        .iter()
        .map(|island| materialize(island, buffer))
        .collect()
}

/// Groups buffers by `(width, height)`.
///
/// Groups appear in first-seen order of their size; buffers keep their
/// input order inside a group. Repeated shapes in a sprite sheet end up
/// in the same group.
pub fn group_by_size<I>(buffers: I) -> Vec<Vec<PixelBuffer>>
where
    I: IntoIterator<Item = PixelBuffer>,
{
    let mut sizes: Vec<(u32, u32)> = Vec::new();
    let mut groups: Vec<Vec<PixelBuffer>> = Vec::new();
    for buf in buffers {
        let dims = buf.dimensions();
        match sizes.iter().position(|s| *s == dims) {
            Some(i) => groups[i].push(buf),
            None => {
                sizes.push(dims);
                groups.push(vec![buf]);
            }
        }
    }
    groups
}

fn check_island_bounds(buffer: &PixelBuffer, island: &Island) -> OpsResult<()> {
    match island.points.iter().find(|(x, y)| !buffer.in_bounds(*x, *y)) {
        Some(&(x, y)) => Err(Error::out_of_bounds(x, y, buffer.width(), buffer.height()).into()),
        None => Ok(()),
    }
}

/// Paints every island pixel with `color`.
///
/// # Errors
///
/// Returns a bounds error, without writing, if any point is outside `buffer`.
pub fn fill_island(buffer: &mut PixelBuffer, island: &Island, color: Color) -> OpsResult<()> {
    check_island_bounds(buffer, island)?;
    for &(x, y) in &island.points {
        buffer.set(x, y, color)?;
    }
    Ok(())
}

/// Like [`fill_island`], but returns a painted copy.
pub fn fill_island_new(buffer: &PixelBuffer, island: &Island, color: Color) -> OpsResult<PixelBuffer> {
    let mut out = buffer.clone();
    fill_island(&mut out, island, color)?;
    Ok(out)
}
