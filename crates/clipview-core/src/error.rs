//! Error types for clipview.

use thiserror::Error;

/// Main error type for engine-side clipview operations.
///
/// The adapter itself never fails; these errors come from loading
/// configuration, analyzing audio and building producers.
#[derive(Error, Debug)]
pub enum ClipviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Audio error: {0}")]
    Audio(String),
}

/// Result type alias for clipview operations.
pub type Result<T> = std::result::Result<T, ClipviewError>;
