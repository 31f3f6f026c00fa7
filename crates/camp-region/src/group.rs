//! Segment groups and transitive neighbour grouping
//!
//! A [`SegmentGroup`] aggregates leaf segments and nested groups. It never
//! copies member pixels: area and neighbours are recomputed from the arena
//! on every access through a [`GroupView`], so a group stays correct while
//! its membership is still being assembled.

use crate::error::{RegionError, RegionResult};
use crate::segment::{Genre, Region, SegmentArena, SegmentId};
use camp_core::{Coord, Rgb};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// One entry of a group: a leaf segment or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Segment(SegmentId),
    Group(SegmentGroup),
}

/// Composite region made of segments and other groups.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGroup {
    id: SegmentId,
    members: Vec<Member>,
    genre: Option<Arc<Genre>>,
}

impl SegmentGroup {
    /// Create an empty group; take `id` from [`SegmentArena::allocate_id`].
    pub fn new(id: SegmentId) -> Self {
        Self {
            id,
            members: Vec::new(),
            genre: None,
        }
    }

    /// Create a group holding the given leaf segments.
    pub fn from_segments<I>(id: SegmentId, segments: I) -> Self
    where
        I: IntoIterator<Item = SegmentId>,
    {
        Self {
            id,
            members: segments.into_iter().map(Member::Segment).collect(),
            genre: None,
        }
    }

    /// Create a group holding the given groups.
    pub fn from_groups<I>(id: SegmentId, groups: I) -> Self
    where
        I: IntoIterator<Item = SegmentGroup>,
    {
        Self {
            id,
            members: groups.into_iter().map(Member::Group).collect(),
            genre: None,
        }
    }

    #[inline]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn push_segment(&mut self, id: SegmentId) {
        self.members.push(Member::Segment(id));
    }

    pub fn push_group(&mut self, group: SegmentGroup) {
        self.members.push(Member::Group(group));
    }

    /// Direct members in insertion order.
    #[inline]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Consume the group, returning its direct members.
    pub fn into_members(self) -> Vec<Member> {
        self.members
    }

    /// Number of direct members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every leaf segment reachable through nested groups.
    pub fn leaf_ids(&self) -> BTreeSet<SegmentId> {
        let mut out = BTreeSet::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut BTreeSet<SegmentId>) {
        for m in &self.members {
            match m {
                Member::Segment(id) => {
                    out.insert(*id);
                }
                Member::Group(g) => g.collect_leaves(out),
            }
        }
    }

    /// Classification tag of the group itself.
    pub fn genre(&self) -> Option<Arc<Genre>> {
        self.genre.clone()
    }

    /// Tag this group, every nested group and every leaf with the same genre.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownSegment`] if a leaf is not in `arena`.
    pub fn set_genre(&mut self, genre: Arc<Genre>, arena: &mut SegmentArena) -> RegionResult<()> {
        self.genre = Some(Arc::clone(&genre));
        for m in &mut self.members {
            match m {
                Member::Segment(id) => arena.set_genre(*id, Some(Arc::clone(&genre)))?,
                Member::Group(g) => g.set_genre(Arc::clone(&genre), arena)?,
            }
        }
        Ok(())
    }

    /// Borrow the group together with the arena holding its leaves.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownSegment`] if a leaf is not in `arena`.
    pub fn view<'a>(&'a self, arena: &'a SegmentArena) -> RegionResult<GroupView<'a>> {
        let leaves = self.leaf_ids();
        for &id in &leaves {
            arena.segment("SegmentGroup", id)?;
        }
        Ok(GroupView {
            group: self,
            arena,
            leaves,
        })
    }
}

/// A group resolved against its arena; implements [`Region`].
#[derive(Debug, Clone)]
pub struct GroupView<'a> {
    group: &'a SegmentGroup,
    arena: &'a SegmentArena,
    leaves: BTreeSet<SegmentId>,
}

impl GroupView<'_> {
    /// Leaf segments of the viewed group.
    pub fn leaves(&self) -> &BTreeSet<SegmentId> {
        &self.leaves
    }

    pub fn group(&self) -> &SegmentGroup {
        self.group
    }

    /// Neighbours of the group that are not among its own leaves.
    pub fn external_neighbours(&self) -> BTreeSet<SegmentId> {
        let mut out = self.neighbours().into_owned();
        out.retain(|n| !self.leaves.contains(n));
        out
    }
}

impl Region for GroupView<'_> {
    fn id(&self) -> SegmentId {
        self.group.id
    }

    fn area(&self) -> Cow<'_, HashSet<Coord>> {
        let mut area = HashSet::new();
        for seg in self.leaves.iter().filter_map(|&id| self.arena.get(id)) {
            area.extend(seg.pixels().iter().copied());
        }
        Cow::Owned(area)
    }

    /// Union of member neighbours. Members adjacent to each other appear
    /// here too; see [`GroupView::external_neighbours`].
    fn neighbours(&self) -> Cow<'_, BTreeSet<SegmentId>> {
        let mut out = BTreeSet::new();
        for seg in self.leaves.iter().filter_map(|&id| self.arena.get(id)) {
            out.extend(seg.neighbour_ids().iter().copied());
        }
        Cow::Owned(out)
    }

    fn color(&self) -> Option<Rgb> {
        None
    }

    fn genre(&self) -> Option<Arc<Genre>> {
        self.group.genre()
    }

    fn pixel_count(&self) -> usize {
        self.leaves
            .iter()
            .filter_map(|&id| self.arena.get(id))
            .map(|s| s.pixels().len())
            .sum()
    }
}

/// Partition `candidates` into groups connected through neighbour edges
/// that stay inside the candidate set.
///
/// Groups are emitted in order of their first candidate; members of each
/// group are sorted by id. A candidate without candidate neighbours becomes
/// a one-member group. Duplicate ids are ignored.
///
/// # Errors
///
/// Returns [`RegionError::EmptyCandidates`] for an empty candidate list and
/// [`RegionError::UnknownSegment`] for ids not in `arena`.
pub fn group_by_adjacency(
    arena: &mut SegmentArena,
    candidates: &[SegmentId],
) -> RegionResult<Vec<SegmentGroup>> {
    const STAGE: &str = "RegionGrouper";

    if candidates.is_empty() {
        return Err(RegionError::EmptyCandidates { stage: STAGE });
    }
    for &id in candidates {
        arena.segment(STAGE, id)?;
    }

    let mut remaining: HashSet<SegmentId> = candidates.iter().copied().collect();
    let mut components: Vec<BTreeSet<SegmentId>> = Vec::new();

    for &seed in candidates {
        if !remaining.remove(&seed) {
            continue;
        }
        let mut members = BTreeSet::from([seed]);
        let mut stack = vec![seed];
        while let Some(id) = stack.pop() {
            let seg = arena.segment(STAGE, id)?;
            for &n in seg.neighbour_ids() {
                if remaining.remove(&n) {
                    members.insert(n);
                    stack.push(n);
                }
            }
        }
        components.push(members);
    }

    let groups: Vec<SegmentGroup> = components
        .into_iter()
        .map(|members| SegmentGroup::from_segments(arena.allocate_id(), members))
        .collect();

    debug!(
        ncandidates = candidates.len(),
        ngroups = groups.len(),
        "grouped candidates by adjacency"
    );
    Ok(groups)
}
