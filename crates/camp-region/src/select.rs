//! Segment selection
//!
//! Filters over segment ids: by bounding box size, by pixel count, and the
//! background heuristic that picks, per color, the outermost segments
//! touching the image border.

use crate::error::RegionResult;
use crate::segment::{Region, Segment, SegmentArena, SegmentId};
use camp_core::{Box, Rgb};
use std::collections::{BTreeMap, BTreeSet};

/// How width and height thresholds are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectType {
    /// Select if BOTH width and height satisfy the relation
    IfBoth,
    /// Select if EITHER width or height satisfies the relation
    IfEither,
}

/// Comparison used against the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectRelation {
    /// Select if greater than or equal to threshold
    Gte,
    /// Select if less than or equal to threshold
    Lte,
}

/// Keep the segments whose bounding box satisfies a size constraint.
///
/// Output preserves the order of `ids`. Segments without bounds are never
/// selected.
///
/// # Errors
///
/// Returns [`RegionError::UnknownSegment`](crate::RegionError::UnknownSegment)
/// for ids not in `arena`.
pub fn select_by_size(
    arena: &SegmentArena,
    ids: &[SegmentId],
    width_thresh: u32,
    height_thresh: u32,
    select_type: SizeSelectType,
    relation: SizeSelectRelation,
) -> RegionResult<Vec<SegmentId>> {
    let mut out = Vec::new();
    for &id in ids {
        let seg = arena.segment("select_by_size", id)?;
        let (Some(w), Some(h)) = (seg.width(), seg.height()) else {
            continue;
        };
        let keep = match (select_type, relation) {
            (SizeSelectType::IfBoth, SizeSelectRelation::Gte) => {
                w >= width_thresh && h >= height_thresh
            }
            (SizeSelectType::IfBoth, SizeSelectRelation::Lte) => {
                w <= width_thresh && h <= height_thresh
            }
            (SizeSelectType::IfEither, SizeSelectRelation::Gte) => {
                w >= width_thresh || h >= height_thresh
            }
            (SizeSelectType::IfEither, SizeSelectRelation::Lte) => {
                w <= width_thresh || h <= height_thresh
            }
        };
        if keep {
            out.push(id);
        }
    }
    Ok(out)
}

/// Keep the segments with `min <= pixel count <= max`.
pub fn select_by_pixel_count(
    arena: &SegmentArena,
    ids: &[SegmentId],
    min: usize,
    max: usize,
) -> RegionResult<Vec<SegmentId>> {
    let mut out = Vec::new();
    for &id in ids {
        let n = arena.segment("select_by_pixel_count", id)?.pixel_count();
        if (min..=max).contains(&n) {
            out.push(id);
        }
    }
    Ok(out)
}

/// Background segments of a `width` x `height` image.
///
/// For each color, the left-most, right-most, top-most and bottom-most
/// segments are taken if they reach the matching image edge. Ties go to
/// the lowest id.
pub fn find_background(arena: &SegmentArena, width: u32, height: u32) -> BTreeSet<SegmentId> {
    let mut by_color: BTreeMap<Rgb, Vec<(&Segment, Box)>> = BTreeMap::new();
    for seg in arena {
        if let Some(b) = seg.bounds() {
            by_color.entry(seg.rgb()).or_default().push((seg, b));
        }
    }

    let (right_edge, bottom_edge) = (width as i32 - 1, height as i32 - 1);
    let mut result = BTreeSet::new();

    let probes: [(fn(&Box) -> i32, bool, i32); 4] = [
        (|b| b.x, false, 0),
        (|b| b.x_max(), true, right_edge),
        (|b| b.y, false, 0),
        (|b| b.y_max(), true, bottom_edge),
    ];
    for segs in by_color.values() {
        for &(key, want_max, edge) in &probes {
            if let Some((seg, k)) = extreme(segs, key, want_max) {
                if k == edge {
                    result.insert(seg.id());
                }
            }
        }
    }

    result
}

/// First segment with the smallest (or largest) key.
fn extreme<'a>(
    segs: &[(&'a Segment, Box)],
    key: fn(&Box) -> i32,
    want_max: bool,
) -> Option<(&'a Segment, i32)> {
    let mut best: Option<(&'a Segment, i32)> = None;
    for (seg, b) in segs {
        let k = key(b);
        let better = match best {
            None => true,
            Some((_, bk)) if want_max => k > bk,
            Some((_, bk)) => k < bk,
        };
        if better {
            best = Some((*seg, k));
        }
    }
    best
}
