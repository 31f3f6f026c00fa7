//! Error types for camp-recog

use thiserror::Error;

/// Errors that can occur during recognition stages
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] camp_core::Error),

    /// Segmentation or grouping error
    #[error("region error: {0}")]
    Region(#[from] camp_region::RegionError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage ran before the stage it depends on
    #[error("{stage}: missing output of required stage {required}")]
    MissingStageOutput {
        stage: &'static str,
        required: &'static str,
    },

    /// Figure recognition was started with an empty registry
    #[error("no figure recognizers registered")]
    NoRecognizers,
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
