//! Segmentation driver
//!
//! Runs the full pipeline over one image: color index, connected
//! components, label map, adjacency graph. Adjacency is only built once
//! every segment has its final id and the label map is complete.

use crate::adjacency::build_adjacency;
use crate::conncomp::{ColorIndex, ConnectivityType, extract_segments};
use crate::error::{RegionError, RegionResult};
use crate::label::LabelMap;
use crate::segment::{Segment, SegmentArena, SegmentId};
use crate::select::find_background;
use camp_core::Raster;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Options for [`segmentize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationOptions {
    /// Pixel neighbourhood used to discover adjacent segments
    pub adjacency: ConnectivityType,
    /// Fill colors concurrently (needs the `parallel` feature)
    pub parallel: bool,
}

impl SegmentationOptions {
    pub fn with_adjacency(mut self, adjacency: ConnectivityType) -> Self {
        self.adjacency = adjacency;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Segments of one image with their label map and adjacency graph.
#[derive(Debug, Clone)]
pub struct Segmentation {
    width: u32,
    height: u32,
    ncolors: usize,
    arena: SegmentArena,
    labels: LabelMap,
    edges: usize,
}

impl Segmentation {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of distinct colors in the source image.
    #[inline]
    pub fn ncolors(&self) -> usize {
        self.ncolors
    }

    #[inline]
    pub fn arena(&self) -> &SegmentArena {
        &self.arena
    }

    /// Mutable access, used by later stages to allocate group ids and tag
    /// segments.
    #[inline]
    pub fn arena_mut(&mut self) -> &mut SegmentArena {
        &mut self.arena
    }

    #[inline]
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Number of undirected adjacency edges.
    #[inline]
    pub fn edges(&self) -> usize {
        self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn segments(&self) -> std::slice::Iter<'_, Segment> {
        self.arena.iter()
    }

    /// Segment owning pixel `(x, y)`.
    pub fn segment_at(&self, x: u32, y: u32) -> Option<&Segment> {
        self.labels.get(x, y).and_then(|id| self.arena.get(id))
    }

    /// Segments forming the image background; see [`find_background`].
    pub fn background(&self) -> BTreeSet<SegmentId> {
        find_background(&self.arena, self.width, self.height)
    }

    /// Check that `raster` has the size this segmentation was built from.
    pub fn check_dimensions<R: Raster + ?Sized>(&self, raster: &R) -> RegionResult<()> {
        let actual = (raster.width(), raster.height());
        if actual != (self.width, self.height) {
            return Err(RegionError::DimensionMismatch {
                expected: (self.width, self.height),
                actual,
            });
        }
        Ok(())
    }
}

/// Split `raster` into segments and build their adjacency graph.
///
/// # Errors
///
/// Returns [`RegionError::EmptyImage`] for an image without pixels.
pub fn segmentize<R: Raster + ?Sized>(
    raster: &R,
    options: &SegmentationOptions,
) -> RegionResult<Segmentation> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(RegionError::EmptyImage);
    }
    info!(width, height, ?options, "segmentation started");

    let index = ColorIndex::build(raster);
    let ncolors = index.len();
    let mut arena = extract_segments(&index, options.parallel)?;
    drop(index);
    debug!(nsegments = arena.len(), "extraction finished");

    let labels = LabelMap::build(width, height, &arena)?;
    let edges = build_adjacency(&labels, &mut arena, options.adjacency)?;

    info!(
        ncolors,
        nsegments = arena.len(),
        edges,
        "segmentation finished"
    );
    Ok(Segmentation {
        width,
        height,
        ncolors,
        arena,
        labels,
        edges,
    })
}
