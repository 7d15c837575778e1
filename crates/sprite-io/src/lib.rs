//! # sprite-io
//!
//! Getting pixels into and out of the sprite workspace.
//!
//! # Modules
//!
//! - [`loader`] - Fetch and decode images (single and batch)
//! - [`snapshot`] - Color-array JSON snapshots
//! - [`render`] - One-way rendering onto surfaces, PNG output
//!
//! # Example
//!
//! ```rust,no_run
//! use sprite_io::{load_to_pixel_buffer, write_snapshot};
//!
//! let sheet = load_to_pixel_buffer("sheet.png")?;
//! write_snapshot("sheet.json", &sheet)?;
//! # Ok::<(), sprite_io::IoError>(())
//! ```
//!
//! # Dependencies
//!
//! - `image` - decoding and PNG output
//! - `rayon` - parallel batch loading
//! - `serde`, `serde_json` - snapshot format

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod loader;
pub mod render;
pub mod snapshot;

pub use error::{IoError, IoResult};
pub use loader::{decode_image, load_all, load_to_pixel_buffer, FileSource, ImageSource, Loader};
pub use render::{render_to_surface, ImageSurface, Surface};
pub use snapshot::{
    from_json, from_snapshot, read_snapshot, to_json, to_snapshot, write_snapshot, Snapshot,
    SnapshotDocument,
};
