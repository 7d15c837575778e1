//! One-way rendering of buffers onto drawable surfaces.
//!
//! Rendering only ever writes: nothing in the workspace reads pixels back
//! from a [`Surface`]. Zoom is integer nearest-neighbour, which keeps
//! pixel-art edges sharp.
//!
//! ```rust
//! use sprite_core::{Color, PixelBuffer};
//! use sprite_io::render::{render_to_surface, ImageSurface};
//!
//! let sprite = PixelBuffer::filled(2, 2, Color::opaque(255, 0, 0))?;
//! let mut surface = ImageSurface::new();
//! render_to_surface(&sprite, &mut surface, 4)?;
//! assert_eq!(surface.image().dimensions(), (8, 8));
//! # Ok::<(), sprite_io::IoError>(())
//! ```

use std::path::Path;

use image::{Rgba, RgbaImage};
use sprite_core::PixelBuffer;
use tracing::debug;

use crate::{IoError, IoResult};

/// A write-only drawing target.
pub trait Surface {
    /// Resizes the surface, discarding its contents.
    fn resize(&mut self, width: u32, height: u32) -> IoResult<()>;

    /// Writes one straight-alpha RGBA pixel. Out-of-range writes are ignored.
    fn put_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]);
}

/// Draws `buffer` onto `surface`, scaled by `zoom`.
///
/// The surface is resized to `width * zoom` by `height * zoom`.
///
/// # Errors
///
/// Returns a core error if `zoom` is zero or the scaled size overflows,
/// and propagates surface resize failures.
pub fn render_to_surface<S: Surface + ?Sized>(
    buffer: &PixelBuffer,
    surface: &mut S,
    zoom: u32,
) -> IoResult<()> {
    let scaled = if zoom == 1 {
        buffer.clone()
    } else {
        buffer.scale_nearest(zoom)?
    };
    debug!(width = scaled.width(), height = scaled.height(), zoom, "render_to_surface");
    surface.resize(scaled.width(), scaled.height())?;
    for (x, y, color) in scaled.pixels() {
        surface.put_rgba(x as u32, y as u32, color.to_array());
    }
    Ok(())
}

/// In-memory surface backed by an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
        }
    }

    /// The rendered image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the surface, returning the image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Saves the image; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Encode`] if writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        self.image
            .save(path.as_ref())
            .map_err(|e| IoError::Encode(e.to_string()))
    }
}

impl Default for ImageSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ImageSurface {
    fn resize(&mut self, width: u32, height: u32) -> IoResult<()> {
        self.image = RgbaImage::new(width, height);
        Ok(())
    }

    fn put_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, Rgba(rgba));
        }
    }
}
