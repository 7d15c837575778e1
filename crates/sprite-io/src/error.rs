//! Error types for loading, snapshots and rendering.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An image could not be fetched or decoded.
    ///
    /// The loader wraps every per-URL failure in this variant so callers
    /// see which source failed.
    #[error("failed to load '{url}': {reason}")]
    Load {
        /// Source that failed.
        url: String,
        /// Underlying cause.
        reason: String,
    },

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed snapshot document.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL scheme the source cannot fetch.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Underlying buffer error.
    #[error(transparent)]
    Core(#[from] sprite_core::Error),
}

impl IoError {
    /// Creates a load error.
    pub fn load(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for [`IoError::Load`].
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}

impl From<image::ImageError> for IoError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
