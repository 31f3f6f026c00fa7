//! camp - Chart image segmentation and recognition
//!
//! Splits a chart raster into same-color connected segments, builds their
//! adjacency graph and groups them into text and figures.
//!
//! # Overview
//!
//! - Image I/O through the `image` crate ([`io`])
//! - Segmentation, adjacency and grouping ([`region`])
//! - Text and figure recognition stages ([`recog`])
//! - JSON pipeline configuration ([`PipelineConfig`])
//!
//! # Example
//!
//! ```
//! use camp::{Pix, Rgb};
//! use camp::region::{SegmentationOptions, segmentize};
//!
//! let pix = Pix::new_filled(8, 4, Rgb::WHITE).unwrap();
//! let seg = segmentize(&pix, &SegmentationOptions::default()).unwrap();
//! assert_eq!(seg.len(), 1);
//! ```

pub mod config;

pub use config::{ConfigError, ConfigResult, PipelineConfig};

// Re-export core types (primary data structures used everywhere)
pub use camp_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use camp_io as io;
pub use camp_recog as recog;
pub use camp_region as region;
