//! Error types for camp-io

use thiserror::Error;

/// Errors that can occur while reading or writing images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] camp_core::Error),

    /// Underlying file system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoder or encoder failure reported by the `image` crate
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Encoding failure detected before the encoder ran
    #[error("encode error: {0}")]
    Encode(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
