//! Segments and the segment arena
//!
//! A [`Segment`] is a maximal 8-connected region of same-colored pixels.
//! Segments live in a [`SegmentArena`] and refer to each other only by
//! [`SegmentId`], so the adjacency graph never forms ownership cycles.
//!
//! Geometry shared by segments and groups (bounds, barycenter, coverage,
//! aspect factors) is provided by the [`Region`] trait and always computed
//! from the current area, never cached.

use crate::error::{RegionError, RegionResult};
use crate::label::LabelMap;
use camp_core::{Box, Coord, Rgb};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// Identifier of a segment or a segment group, unique within one run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SegmentId(pub u32);

impl SegmentId {
    /// Position of a leaf segment in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Known geometric figure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    Rectangle,
}

/// Classification tag attached to a segment or group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Genre {
    /// Recognized text and its reading orientation
    Text { text: String, horizontal: bool },
    /// A geometric figure
    Figure(FigureKind),
}

impl Genre {
    /// Recognized text, if this is a text genre.
    pub fn text(&self) -> Option<&str> {
        match self {
            Genre::Text { text, .. } => Some(text),
            Genre::Figure(_) => None,
        }
    }
}

/// Bounding box of a set of pixels, `None` if the set is empty.
pub fn bounds_of<'a, I>(coords: I) -> Option<Box>
where
    I: IntoIterator<Item = &'a Coord>,
{
    let mut iter = coords.into_iter();
    let first = iter.next()?;
    let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
    for c in iter {
        x0 = x0.min(c.x);
        y0 = y0.min(c.y);
        x1 = x1.max(c.x);
        y1 = y1.max(c.y);
    }
    Some(Box::from_extent(x0 as i32, y0 as i32, x1 as i32, y1 as i32))
}

/// Common interface of segments and segment groups.
pub trait Region {
    /// Identifier of the region.
    fn id(&self) -> SegmentId;

    /// Pixels of the region.
    fn area(&self) -> Cow<'_, HashSet<Coord>>;

    /// Ids of adjacent regions.
    fn neighbours(&self) -> Cow<'_, BTreeSet<SegmentId>>;

    /// Originating pixel color; `None` for synthetic groups.
    fn color(&self) -> Option<Rgb>;

    /// Classification tag, if any.
    fn genre(&self) -> Option<Arc<Genre>>;

    /// Number of pixels in the region.
    fn pixel_count(&self) -> usize {
        self.area().len()
    }

    /// Bounding box; `None` for an empty area.
    fn bounds(&self) -> Option<Box> {
        bounds_of(self.area().iter())
    }

    /// Bounding box width (span + 1).
    fn width(&self) -> Option<u32> {
        self.bounds().map(|b| b.w as u32)
    }

    /// Bounding box height (span + 1).
    fn height(&self) -> Option<u32> {
        self.bounds().map(|b| b.h as u32)
    }

    /// Mean pixel coordinate.
    fn barycenter(&self) -> Option<(f64, f64)> {
        let area = self.area();
        if area.is_empty() {
            return None;
        }
        let (sx, sy) = area.iter().fold((0u64, 0u64), |(sx, sy), c| {
            (sx + c.x as u64, sy + c.y as u64)
        });
        let n = area.len() as f64;
        Some((sx as f64 / n, sy as f64 / n))
    }

    /// Fraction of bounding box pixels that belong to the region, in `(0, 1]`.
    fn coverage(&self) -> Option<f64> {
        let area = self.area();
        let b = bounds_of(area.iter())?;
        Some(area.len() as f64 / b.area() as f64)
    }

    /// Height to width ratio.
    fn vfactor(&self) -> Option<f64> {
        self.bounds().map(|b| b.h as f64 / b.w as f64)
    }

    /// Width to height ratio.
    fn hfactor(&self) -> Option<f64> {
        self.bounds().map(|b| b.w as f64 / b.h as f64)
    }
}

/// A maximal 8-connected region of one color.
#[derive(Debug, Clone)]
pub struct Segment {
    id: SegmentId,
    color: Rgb,
    area: HashSet<Coord>,
    neighbours: BTreeSet<SegmentId>,
    genre: Option<Arc<Genre>>,
}

impl Segment {
    /// Create a segment with the given pixels and no neighbours.
    pub fn new(id: SegmentId, color: Rgb, area: HashSet<Coord>) -> Self {
        Self {
            id,
            color,
            area,
            neighbours: BTreeSet::new(),
            genre: None,
        }
    }

    /// Originating pixel color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.color
    }

    /// Pixels owned by the segment.
    #[inline]
    pub fn pixels(&self) -> &HashSet<Coord> {
        &self.area
    }

    /// Ids of adjacent segments.
    #[inline]
    pub fn neighbour_ids(&self) -> &BTreeSet<SegmentId> {
        &self.neighbours
    }

    /// Whether `other` is adjacent to this segment.
    #[inline]
    pub fn is_neighbour(&self, other: SegmentId) -> bool {
        self.neighbours.contains(&other)
    }

    pub(crate) fn neighbours_mut(&mut self) -> &mut BTreeSet<SegmentId> {
        &mut self.neighbours
    }

    /// Attach a classification tag.
    pub fn set_genre(&mut self, genre: Option<Arc<Genre>>) {
        self.genre = genre;
    }

    /// Area pixels that touch the image border or a pixel of another segment
    /// (8-neighbourhood).
    pub fn edge_pixels(&self, labels: &LabelMap) -> HashSet<Coord> {
        self.area
            .iter()
            .copied()
            .filter(|&c| {
                crate::conncomp::EIGHT_WAY.iter().any(|&(dx, dy)| {
                    match c.offset(dx, dy, labels.width(), labels.height()) {
                        Some(n) => labels.get(n.x, n.y) != Some(self.id),
                        None => true,
                    }
                })
            })
            .collect()
    }
}

impl Region for Segment {
    fn id(&self) -> SegmentId {
        self.id
    }

    fn area(&self) -> Cow<'_, HashSet<Coord>> {
        Cow::Borrowed(&self.area)
    }

    fn neighbours(&self) -> Cow<'_, BTreeSet<SegmentId>> {
        Cow::Borrowed(&self.neighbours)
    }

    fn color(&self) -> Option<Rgb> {
        Some(self.color)
    }

    fn genre(&self) -> Option<Arc<Genre>> {
        self.genre.clone()
    }

    fn pixel_count(&self) -> usize {
        self.area.len()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            Some(b) => write!(
                f,
                "Segment({}, color={}, npixels={}, bounds={:?})",
                self.id,
                self.color,
                self.area.len(),
                b.extent()
            ),
            None => write!(f, "Segment({}, color={}, empty)", self.id, self.color),
        }
    }
}

/// Owner of all leaf segments of one run, indexed by [`SegmentId`].
///
/// Leaf ids are dense, `0..len()`. Group ids are handed out by
/// [`SegmentArena::allocate_id`] above that range so they never collide
/// with leaves.
#[derive(Debug, Clone, Default)]
pub struct SegmentArena {
    segments: Vec<Segment>,
    next_id: u32,
}

impl SegmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new leaf segment and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] once group ids have been
    /// allocated, since leaf ids must stay dense.
    pub fn push(&mut self, color: Rgb, area: HashSet<Coord>) -> RegionResult<SegmentId> {
        if self.next_id as usize != self.segments.len() {
            return Err(RegionError::InvalidParameters(
                "cannot add leaf segments after group ids were allocated".to_string(),
            ));
        }
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(Segment::new(id, color, area));
        self.next_id += 1;
        Ok(id)
    }

    /// Reserve a fresh id for a synthetic group.
    pub fn allocate_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of leaf segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Look up a leaf segment.
    #[inline]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.index())
    }

    /// Look up a leaf segment, failing with stage context.
    pub fn segment(&self, stage: &'static str, id: SegmentId) -> RegionResult<&Segment> {
        self.get(id)
            .ok_or(RegionError::UnknownSegment { stage, id })
    }

    pub fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(id.index())
    }

    /// All leaf segments in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// All leaf ids in order.
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.iter().map(|s| s.id)
    }

    /// Set the genre of a leaf segment.
    pub fn set_genre(&mut self, id: SegmentId, genre: Option<Arc<Genre>>) -> RegionResult<()> {
        match self.get_mut(id) {
            Some(seg) => {
                seg.set_genre(genre);
                Ok(())
            }
            None => Err(RegionError::UnknownSegment {
                stage: "set_genre",
                id,
            }),
        }
    }

    /// Total number of pixels over all segments.
    pub fn total_pixels(&self) -> usize {
        self.segments.iter().map(|s| s.area.len()).sum()
    }
}

impl<'a> IntoIterator for &'a SegmentArena {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
