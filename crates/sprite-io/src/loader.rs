//! Image loading into [`PixelBuffer`]s.
//!
//! Loading is split in two steps:
//!
//! 1. An [`ImageSource`] fetches raw encoded bytes for a URL
//! 2. [`decode_image`] turns them into a straight-alpha RGBA buffer
//!
//! [`Loader::load`] runs both and wraps any failure in
//! [`IoError::Load`], tagged with the URL. [`Loader::load_all`] loads a
//! batch on the rayon pool and settles every slot independently: one bad
//! URL never affects the others, and results come back in input order.
//!
//! # Example
//!
//! ```rust,no_run
//! use sprite_io::loader::{load_all, load_to_pixel_buffer};
//!
//! let sheet = load_to_pixel_buffer("assets/sheet.png")?;
//! println!("{}x{}", sheet.width(), sheet.height());
//!
//! let results = load_all(&["a.png", "file:///tmp/b.gif"]);
//! for r in &results {
//!     if let Err(e) = r {
//!         eprintln!("{e}");
//!     }
//! }
//! # Ok::<(), sprite_io::IoError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sprite_core::PixelBuffer;
use tracing::{debug, warn};

use crate::{IoError, IoResult};

/// Fetches encoded image bytes for a URL.
///
/// Implementations must be shareable across threads so batches can be
/// fetched in parallel.
pub trait ImageSource: Send + Sync {
    /// Returns the raw bytes behind `url`.
    fn fetch(&self, url: &str) -> IoResult<Vec<u8>>;
}

/// Reads images from the local filesystem.
///
/// Accepts plain paths and `file://` URLs. Relative paths resolve against
/// the optional base directory, or the working directory without one.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base: Option<PathBuf>,
}

impl FileSource {
    /// Source resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source resolving relative paths against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// Maps a URL to a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedScheme`] for any scheme other than `file`.
    pub fn resolve(&self, url: &str) -> IoResult<PathBuf> {
        let raw = match url.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => return Err(IoError::UnsupportedScheme(scheme.to_string())),
            None => url,
        };
        let path = Path::new(raw);
        Ok(match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl ImageSource for FileSource {
    fn fetch(&self, url: &str) -> IoResult<Vec<u8>> {
        let path = self.resolve(url)?;
        Ok(fs::read(path)?)
    }
}

/// Decodes any supported format into an RGBA buffer at origin (0, 0).
///
/// Pixels are straight (non-premultiplied) alpha.
///
/// # Errors
///
/// Returns [`IoError::Decode`] for unreadable data and a core error for
/// zero-sized images.
pub fn decode_image(bytes: &[u8]) -> IoResult<PixelBuffer> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgba.into_raw())?)
}

/// Loads images through an [`ImageSource`].
#[derive(Debug, Clone, Default)]
pub struct Loader<S = FileSource> {
    source: S,
}

impl<S: ImageSource> Loader<S> {
    /// Creates a loader over `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches and decodes one image.
    ///
    /// # Errors
    ///
    /// Every failure is reported as [`IoError::Load`] carrying `url`.
    pub fn load(&self, url: &str) -> IoResult<PixelBuffer> {
        let result = self
            .source
            .fetch(url)
            .and_then(|bytes| decode_image(&bytes));
        match result {
            Ok(buffer) => {
                debug!(url, width = buffer.width(), height = buffer.height(), "loaded image");
                Ok(buffer)
            }
            Err(err) => {
                warn!(url, error = %err, "image load failed");
                Err(IoError::load(url, err))
            }
        }
    }

    /// Loads every URL in parallel, one result per input, in input order.
    pub fn load_all<U>(&self, urls: &[U]) -> Vec<IoResult<PixelBuffer>>
    where
        U: AsRef<str> + Sync,
    {
        let results: Vec<_> = urls.par_iter().map(|u| self.load(u.as_ref())).collect();
        debug!(
            total = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch load settled"
        );
        results
    }
}

/// Loads one image from a path or `file://` URL.
pub fn load_to_pixel_buffer(url: &str) -> IoResult<PixelBuffer> {
    Loader::new(FileSource::new()).load(url)
}

/// Loads a batch of paths or `file://` URLs, settling each independently.
pub fn load_all<U>(urls: &[U]) -> Vec<IoResult<PixelBuffer>>
where
    U: AsRef<str> + Sync,
{
    Loader::new(FileSource::new()).load_all(urls)
}
