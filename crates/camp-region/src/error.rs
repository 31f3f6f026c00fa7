//! Error types for camp-region

use crate::segment::SegmentId;
use thiserror::Error;

/// Errors that can occur during segmentation and grouping
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] camp_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Image without pixels
    #[error("empty image: no pixels to process")]
    EmptyImage,

    /// A grouping stage was handed nothing to group
    #[error("{stage}: empty candidate set")]
    EmptyCandidates { stage: &'static str },

    /// A segment id that is not in the arena
    #[error("{stage}: unknown segment {id}")]
    UnknownSegment { stage: &'static str, id: SegmentId },

    /// A segment claims a pixel outside the image
    #[error("segment {id} owns pixel ({x}, {y}) outside the image")]
    PixelOutOfBounds { id: SegmentId, x: u32, y: u32 },

    /// Two segments claim the same pixel
    #[error("pixel ({x}, {y}) claimed by segments {first} and {second}")]
    OverlappingSegments {
        x: u32,
        y: u32,
        first: SegmentId,
        second: SegmentId,
    },

    /// An image does not match the segmentation it is used with
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// No segment claims this pixel
    #[error("pixel ({x}, {y}) is not owned by any segment")]
    UnlabeledPixel { x: u32, y: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
