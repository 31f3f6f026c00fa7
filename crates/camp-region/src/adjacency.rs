//! Region adjacency graph
//!
//! Two segments are neighbours iff some pixel of one is adjacent to some
//! pixel of the other. Adjacency is discovered with a single pass over the
//! label map, comparing each pixel with its forward neighbours only
//! (E and S, plus SE and SW for 8-way); every differing pair is recorded in
//! both directions, so the graph is symmetric and never reflexive.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use crate::label::LabelMap;
use crate::segment::{SegmentArena, SegmentId};
use tracing::debug;

const FORWARD_FOUR: [(i32, i32); 2] = [(1, 0), (0, 1)];
const FORWARD_EIGHT: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Populate the neighbour set of every segment in `arena`.
///
/// Existing neighbour sets are cleared first, so rebuilding with a
/// different connectivity is safe. Returns the number of undirected edges.
///
/// # Errors
///
/// Returns [`RegionError::UnknownSegment`] if the label map refers to a
/// segment the arena does not hold.
pub fn build_adjacency(
    labels: &LabelMap,
    arena: &mut SegmentArena,
    connectivity: ConnectivityType,
) -> RegionResult<usize> {
    let forward: &[(i32, i32)] = match connectivity {
        ConnectivityType::FourWay => &FORWARD_FOUR,
        ConnectivityType::EightWay => &FORWARD_EIGHT,
    };

    let ids: Vec<SegmentId> = arena.ids().collect();
    for id in ids {
        if let Some(seg) = arena.get_mut(id) {
            seg.neighbours_mut().clear();
        }
    }

    let (width, height) = (labels.width(), labels.height());
    let mut edges = 0usize;

    for y in 0..height {
        for x in 0..width {
            let a = labels.get_unchecked(x, y);
            for &(dx, dy) in forward {
                let Some(nx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let ny = y + dy as u32;
                if nx >= width || ny >= height {
                    continue;
                }
                let b = labels.get_unchecked(nx, ny);
                if a != b && link(arena, a, b)? {
                    edges += 1;
                }
            }
        }
    }

    debug!(
        edges,
        nsegments = arena.len(),
        ?connectivity,
        "built adjacency graph"
    );
    Ok(edges)
}

/// Record `a <-> b`; returns whether the edge is new.
fn link(arena: &mut SegmentArena, a: SegmentId, b: SegmentId) -> RegionResult<bool> {
    let fresh = arena
        .get_mut(a)
        .ok_or(RegionError::UnknownSegment {
            stage: "AdjacencyGraphBuilder",
            id: a,
        })?
        .neighbours_mut()
        .insert(b);
    arena
        .get_mut(b)
        .ok_or(RegionError::UnknownSegment {
            stage: "AdjacencyGraphBuilder",
            id: b,
        })?
        .neighbours_mut()
        .insert(a);
    Ok(fresh)
}
