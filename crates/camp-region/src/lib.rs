//! camp-region - Segmentation and region grouping for chart images
//!
//! This crate turns a raster into a graph of colored regions and provides
//! the grouping algorithms used by text and figure recognition:
//!
//! - **Color index** - Mapping from each color to the pixels carrying it
//! - **Connected components** - Maximal 8-connected same-color segments
//! - **Label map** - Per-pixel segment ownership
//! - **Adjacency graph** - Symmetric neighbour sets between segments
//! - **Grouping** - Transitive neighbour closure and directional proximity
//!   sweeps producing [`SegmentGroup`]s
//!
//! # Examples
//!
//! ## Segmenting an image
//!
//! ```
//! use camp_core::{Box, Pix, Rgb};
//! use camp_region::{Region, SegmentationOptions, segmentize};
//!
//! let pix = Pix::new_filled(6, 4, Rgb::WHITE).unwrap();
//! let mut pm = pix.to_mut();
//! pm.fill_rect(&Box::new(1, 1, 2, 2).unwrap(), Rgb::BLACK);
//! let pix: Pix = pm.into();
//!
//! let seg = segmentize(&pix, &SegmentationOptions::default()).unwrap();
//! assert_eq!(seg.len(), 2);
//!
//! let black = seg.segment_at(1, 1).unwrap();
//! assert_eq!(black.pixel_count(), 4);
//! assert_eq!(black.neighbour_ids().len(), 1);
//! ```
//!
//! ## Grouping by proximity
//!
//! ```
//! use camp_core::Box;
//! use camp_region::{Axis, Interval, IntervalOptions, group_by_proximity};
//!
//! let boxes = vec![
//!     Interval::new(Box::from_extent(0, 0, 5, 4), "a"),
//!     Interval::new(Box::from_extent(8, 0, 12, 4), "b"),
//!     Interval::new(Box::from_extent(20, 0, 25, 4), "c"),
//! ];
//! let groups = group_by_proximity(boxes, &IntervalOptions::new(Axis::Horizontal, 4)).unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].items, vec!["a", "b"]);
//! ```

pub mod adjacency;
pub mod conncomp;
pub mod error;
pub mod group;
pub mod interval;
pub mod label;
pub mod segment;
pub mod segmentize;
pub mod select;

// Re-export core types
pub use camp_core;

pub use error::{RegionError, RegionResult};

pub use adjacency::build_adjacency;
pub use conncomp::{ColorIndex, ConnectivityType, extract_color_components, extract_segments};
pub use group::{GroupView, Member, SegmentGroup, group_by_adjacency};
pub use interval::{Axis, Interval, IntervalGroup, IntervalOptions, group_by_proximity};
pub use label::LabelMap;
pub use segment::{FigureKind, Genre, Region, Segment, SegmentArena, SegmentId, bounds_of};
pub use segmentize::{Segmentation, SegmentationOptions, segmentize};
pub use select::{
    SizeSelectRelation, SizeSelectType, find_background, select_by_pixel_count, select_by_size,
};
