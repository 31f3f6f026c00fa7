//! Proximity grouping along one axis
//!
//! Greedy sweep that chains bounding boxes into groups: starting from the
//! box closest to the top-left corner, it repeatedly steps to the next box
//! that starts at most `delta` past the current one on the primary axis
//! and overlaps the seed's span on the secondary axis.
//!
//! The sweep is first-fit and order dependent. Ties are broken as follows:
//!
//! * seed: smallest `primary_start + secondary_start`, then lowest input
//!   index;
//! * candidates: largest secondary end first, then lowest input index.

use crate::error::{RegionError, RegionResult};
use camp_core::Box;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// Primary sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left to right; rows are the secondary axis
    #[default]
    Horizontal,
    /// Top to bottom; columns are the secondary axis
    Vertical,
}

/// Parameters of one proximity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalOptions {
    pub axis: Axis,
    /// Largest accepted gap between consecutive boxes (inclusive)
    pub delta: u32,
}

impl Default for IntervalOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            delta: 0,
        }
    }
}

impl IntervalOptions {
    pub fn new(axis: Axis, delta: u32) -> Self {
        Self { axis, delta }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_delta(mut self, delta: u32) -> Self {
        self.delta = delta;
        self
    }
}

/// A bounding box tagged with the entity it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<T> {
    pub bounds: Box,
    pub item: T,
}

impl<T> Interval<T> {
    pub fn new(bounds: Box, item: T) -> Self {
        Self { bounds, item }
    }
}

/// Output of a sweep: items in the order they were chained.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalGroup<T> {
    /// Union of the member boxes
    pub bounds: Box,
    pub items: Vec<T>,
}

impl<T> IntervalGroup<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Chain `intervals` into groups along `options.axis`.
///
/// Every input ends up in exactly one group. Groups are returned in the
/// order their seeds were picked.
///
/// # Errors
///
/// Returns [`RegionError::EmptyCandidates`] if `intervals` is empty.
pub fn group_by_proximity<T>(
    intervals: Vec<Interval<T>>,
    options: &IntervalOptions,
) -> RegionResult<Vec<IntervalGroup<T>>> {
    if intervals.is_empty() {
        return Err(RegionError::EmptyCandidates {
            stage: "IntervalProximityGrouper",
        });
    }

    // Sweep in (primary, secondary) space
    let keys: Vec<Box> = intervals
        .iter()
        .map(|iv| match options.axis {
            Axis::Horizontal => iv.bounds,
            Axis::Vertical => iv.bounds.transposed(),
        })
        .collect();
    let delta = i64::from(options.delta);

    let mut remaining: Vec<usize> = (0..keys.len()).collect();
    let mut chains: Vec<Vec<usize>> = Vec::new();

    while !remaining.is_empty() {
        let Some(seed_pos) = remaining
            .iter()
            .enumerate()
            .min_by_key(|&(_, &i)| (i64::from(keys[i].x) + i64::from(keys[i].y), i))
            .map(|(pos, _)| pos)
        else {
            break;
        };
        let seed = remaining.remove(seed_pos);
        let band = (keys[seed].y, keys[seed].y_max());
        let mut chain = vec![seed];
        let mut current = seed;

        loop {
            let cur = keys[current];
            let mut candidates: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| {
                    let b = keys[i];
                    b.x >= cur.x && i64::from(b.x) - i64::from(cur.x_max()) <= delta
                })
                .collect();
            // Stable: equal ends keep ascending index order
            candidates.sort_by_key(|&i| Reverse(keys[i].y_max()));

            let accepted = candidates
                .into_iter()
                .find(|&i| keys[i].y <= band.1 && keys[i].y_max() >= band.0);
            let Some(next) = accepted else {
                break;
            };
            remaining.retain(|&i| i != next);
            chain.push(next);
            current = next;
        }
        chains.push(chain);
    }

    // Hand the items out in chain order
    let mut slots: Vec<Option<Interval<T>>> = intervals.into_iter().map(Some).collect();
    let mut groups = Vec::with_capacity(chains.len());
    for chain in chains {
        let mut bounds: Option<Box> = None;
        let mut items = Vec::with_capacity(chain.len());
        for i in chain {
            if let Some(iv) = slots[i].take() {
                bounds = Some(match bounds {
                    Some(b) => b.union(&iv.bounds),
                    None => iv.bounds,
                });
                items.push(iv.item);
            }
        }
        if let Some(bounds) = bounds {
            groups.push(IntervalGroup { bounds, items });
        }
    }

    debug!(
        axis = ?options.axis,
        delta = options.delta,
        ngroups = groups.len(),
        "grouped intervals by proximity"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(x0: i32, x1: i32, y0: i32, y1: i32) -> Box {
        Box::from_extent(x0, y0, x1, y1)
    }

    fn items<T: Clone>(groups: &[IntervalGroup<T>]) -> Vec<Vec<T>> {
        groups.iter().map(|g| g.items.clone()).collect()
    }

    #[test]
    fn test_gap_within_delta_merges() {
        let ivs = vec![
            Interval::new(span(0, 5, 0, 4), 'a'),
            Interval::new(span(8, 12, 0, 4), 'b'),
            Interval::new(span(20, 25, 0, 4), 'c'),
        ];
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 4)).unwrap();
        assert_eq!(items(&groups), vec![vec!['a', 'b'], vec!['c']]);
        assert_eq!(groups[0].bounds.extent(), (0, 0, 12, 4));
    }

    #[test]
    fn test_delta_is_inclusive() {
        let ivs = vec![
            Interval::new(span(0, 5, 0, 0), 1),
            Interval::new(span(9, 10, 0, 0), 2),
        ];
        let groups = group_by_proximity(ivs.clone(), &IntervalOptions::new(Axis::Horizontal, 4));
        assert_eq!(groups.unwrap().len(), 1);
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 3));
        assert_eq!(groups.unwrap().len(), 2);
    }

    #[test]
    fn test_secondary_band_must_overlap() {
        let ivs = vec![
            Interval::new(span(0, 5, 0, 4), 'a'),
            Interval::new(span(6, 9, 10, 14), 'b'),
        ];
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 4)).unwrap();
        assert_eq!(items(&groups), vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn test_boxes_behind_current_are_skipped() {
        // 'b' starts left of 'a', so 'a' cannot step back to it
        let ivs = vec![
            Interval::new(span(3, 5, 0, 2), 'a'),
            Interval::new(span(0, 1, 5, 7), 'b'),
        ];
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 10)).unwrap();
        assert_eq!(items(&groups), vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn test_candidate_tie_break() {
        // Both candidates qualify; the one reaching lowest is taken first
        let ivs = vec![
            Interval::new(span(0, 2, 0, 10), 's'),
            Interval::new(span(4, 5, 0, 3), 'x'),
            Interval::new(span(4, 5, 2, 8), 'y'),
        ];
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 2)).unwrap();
        assert_eq!(groups[0].items, vec!['s', 'y', 'x']);

        // Equal ends: lower input index first
        let ivs = vec![
            Interval::new(span(0, 2, 0, 10), 's'),
            Interval::new(span(4, 5, 1, 5), 'x'),
            Interval::new(span(4, 5, 2, 5), 'y'),
        ];
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 2)).unwrap();
        assert_eq!(groups[0].items, vec!['s', 'x', 'y']);
    }

    #[test]
    fn test_vertical_axis() {
        // A column of three boxes stacked top to bottom
        let ivs = vec![
            Interval::new(span(0, 4, 20, 25), 'c'),
            Interval::new(span(0, 4, 0, 5), 'a'),
            Interval::new(span(0, 4, 8, 12), 'b'),
        ];
        let opts = IntervalOptions::default()
            .with_axis(Axis::Vertical)
            .with_delta(4);
        let groups = group_by_proximity(ivs, &opts).unwrap();
        assert_eq!(items(&groups), vec![vec!['a', 'b'], vec!['c']]);
        assert_eq!(groups[0].bounds.extent(), (0, 0, 4, 12));
    }

    #[test]
    fn test_partition() {
        let ivs: Vec<Interval<usize>> = (0..20)
            .map(|i| {
                let x = (i as i32 * 7) % 50;
                let y = (i as i32 * 13) % 30;
                Interval::new(span(x, x + 3, y, y + 4), i)
            })
            .collect();
        let groups = group_by_proximity(ivs, &IntervalOptions::new(Axis::Horizontal, 5)).unwrap();
        let mut all: Vec<usize> = groups.iter().flat_map(|g| g.items.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let ivs: Vec<Interval<u8>> = Vec::new();
        assert!(matches!(
            group_by_proximity(ivs, &IntervalOptions::default()),
            Err(RegionError::EmptyCandidates { .. })
        ));
    }
}
