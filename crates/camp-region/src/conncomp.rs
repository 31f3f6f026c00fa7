//! Connected component extraction
//!
//! Splits an image into segments in two steps:
//!
//! 1. [`ColorIndex::build`] maps every color to the coordinates carrying it.
//! 2. [`extract_segments`] flood-fills each color's coordinates into maximal
//!    8-connected components, each becoming one [`Segment`].
//!
//! Colors are processed in ascending order and each color's seeds are taken
//! in raster order, so segment ids are reproducible from run to run.
//!
//! [`Segment`]: crate::segment::Segment

use crate::error::RegionResult;
use crate::segment::SegmentArena;
use camp_core::{Coord, Raster, Rgb};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Connectivity type for neighbour discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbour offsets for this connectivity.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }
}

/// W, N, E, S
pub const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// W, NW, N, NE, E, SE, S, SW
pub const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Mapping from each color to the pixels carrying it.
///
/// Every pixel of the source image appears under exactly one color. The
/// coordinates of a color are kept in raster order (row-major).
#[derive(Debug, Clone)]
pub struct ColorIndex {
    width: u32,
    height: u32,
    entries: BTreeMap<Rgb, Vec<Coord>>,
}

impl ColorIndex {
    /// Index every pixel of `raster` by its color.
    pub fn build<R: Raster + ?Sized>(raster: &R) -> Self {
        let width = raster.width();
        let height = raster.height();
        let mut entries: BTreeMap<Rgb, Vec<Coord>> = BTreeMap::new();
        for y in 0..height {
            for x in 0..width {
                entries
                    .entry(raster.pixel(x, y))
                    .or_default()
                    .push(Coord::new(x, y));
            }
        }
        debug!(ncolors = entries.len(), width, height, "built color index");
        Self {
            width,
            height,
            entries,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pixels of one color, in raster order.
    pub fn get(&self, color: &Rgb) -> Option<&[Coord]> {
        self.entries.get(color).map(Vec::as_slice)
    }

    /// `(color, pixels)` pairs in ascending color order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, &[Coord])> + '_ {
        self.entries.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Total number of indexed pixels.
    pub fn npixels(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Split one color's pixels into maximal 8-connected components.
///
/// Seeds are taken in the order of `coords`; the fill is an explicit-stack
/// depth-first search, so arbitrarily large regions do not recurse.
pub fn extract_color_components(coords: &[Coord]) -> Vec<HashSet<Coord>> {
    let mut remaining: HashSet<Coord> = coords.iter().copied().collect();
    let mut components = Vec::new();

    for &seed in coords {
        if !remaining.remove(&seed) {
            continue;
        }
        let mut area = HashSet::from([seed]);
        let mut stack = vec![seed];

        while let Some(p) = stack.pop() {
            for &(dx, dy) in &EIGHT_WAY {
                let Some(n) = p.offset_unbounded(dx, dy) else {
                    continue;
                };
                if remaining.remove(&n) {
                    area.insert(n);
                    stack.push(n);
                }
            }
        }
        components.push(area);
    }

    components
}

/// Extract every segment of an indexed image.
///
/// With the `parallel` feature enabled and `parallel` set, colors are
/// filled concurrently; ids are assigned afterwards in color order, so the
/// result is identical to the sequential run.
pub fn extract_segments(index: &ColorIndex, parallel: bool) -> RegionResult<SegmentArena> {
    let per_color = fill_all_colors(index, parallel);

    let mut arena = SegmentArena::new();
    for (color, components) in per_color {
        debug!(%color, nsegments = components.len(), "extracted segments for color");
        for area in components {
            arena.push(color, area)?;
        }
    }
    Ok(arena)
}

#[cfg(feature = "parallel")]
fn fill_all_colors(index: &ColorIndex, parallel: bool) -> Vec<(Rgb, Vec<HashSet<Coord>>)> {
    use rayon::prelude::*;

    if parallel {
        let entries: Vec<(Rgb, &[Coord])> = index.iter().collect();
        entries
            .into_par_iter()
            .map(|(color, coords)| (color, extract_color_components(coords)))
            .collect()
    } else {
        fill_sequential(index)
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_all_colors(index: &ColorIndex, _parallel: bool) -> Vec<(Rgb, Vec<HashSet<Coord>>)> {
    fill_sequential(index)
}

fn fill_sequential(index: &ColorIndex) -> Vec<(Rgb, Vec<HashSet<Coord>>)> {
    index
        .iter()
        .map(|(color, coords)| (color, extract_color_components(coords)))
        .collect()
}
