//! Error types for sprite operations.

use thiserror::Error;

/// Error type for blending, compositing and island operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// A blend mode name did not resolve to a known mode.
    #[error("unknown blend mode: {0}")]
    UnknownBlendMode(String),

    /// An operation received nothing to work on.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Underlying buffer error.
    #[error(transparent)]
    Core(#[from] sprite_core::Error),
}

/// Result type for sprite operations.
pub type OpsResult<T> = Result<T, OpsError>;
