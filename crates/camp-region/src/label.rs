//! Pixel label map
//!
//! A width x height table holding, for every pixel, the id of the segment
//! that owns it. Built once after extraction and read-only afterwards.

use crate::error::{RegionError, RegionResult};
use crate::segment::{Region, SegmentArena, SegmentId};
use camp_core::{Pix, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const UNLABELED: u32 = u32::MAX;

/// Per-pixel segment ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
}

impl LabelMap {
    /// Label every pixel of a `width` x `height` image from the segment areas.
    ///
    /// # Errors
    ///
    /// Fails if a segment owns a pixel outside the image, if two segments
    /// claim the same pixel, or if any pixel is left without an owner.
    pub fn build(width: u32, height: u32, arena: &SegmentArena) -> RegionResult<Self> {
        if width == 0 || height == 0 {
            return Err(RegionError::EmptyImage);
        }
        let mut labels = vec![UNLABELED; width as usize * height as usize];

        for seg in arena {
            for c in seg.pixels() {
                if c.x >= width || c.y >= height {
                    return Err(RegionError::PixelOutOfBounds {
                        id: seg.id(),
                        x: c.x,
                        y: c.y,
                    });
                }
                let slot = &mut labels[c.y as usize * width as usize + c.x as usize];
                if *slot != UNLABELED {
                    return Err(RegionError::OverlappingSegments {
                        x: c.x,
                        y: c.y,
                        first: SegmentId(*slot),
                        second: seg.id(),
                    });
                }
                *slot = seg.id().0;
            }
        }

        if let Some(pos) = labels.iter().position(|&l| l == UNLABELED) {
            return Err(RegionError::UnlabeledPixel {
                x: (pos % width as usize) as u32,
                y: (pos / width as usize) as u32,
            });
        }

        Ok(Self {
            width,
            height,
            labels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Owner of pixel `(x, y)`; `None` outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<SegmentId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Owner of pixel `(x, y)` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> SegmentId {
        SegmentId(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Paint each segment in a pseudo-random color for inspection.
    ///
    /// The same `seed` always yields the same palette.
    pub fn render(&self, seed: u64) -> RegionResult<Pix> {
        let nlabels = self.labels.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut rng = StdRng::seed_from_u64(seed);
        let palette: Vec<Rgb> = (0..nlabels)
            .map(|_| Rgb::new(rng.random(), rng.random(), rng.random()))
            .collect();

        let mut pm = Pix::new(self.width, self.height)?.to_mut();
        for y in 0..self.height {
            for x in 0..self.width {
                let id = self.get_unchecked(x, y);
                pm.set_rgb(x, y, palette[id.index()])?;
            }
        }
        Ok(pm.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::Coord;
    use std::collections::HashSet;

    fn area(coords: &[(u32, u32)]) -> HashSet<Coord> {
        coords.iter().map(|&c| Coord::from(c)).collect()
    }

    #[test]
    fn test_build_and_lookup() {
        let mut arena = SegmentArena::new();
        arena.push(Rgb::BLACK, area(&[(0, 0), (1, 0)])).unwrap();
        arena.push(Rgb::WHITE, area(&[(0, 1), (1, 1)])).unwrap();

        let labels = LabelMap::build(2, 2, &arena).unwrap();
        assert_eq!(labels.get(1, 0), Some(SegmentId(0)));
        assert_eq!(labels.get(0, 1), Some(SegmentId(1)));
        assert_eq!(labels.get(2, 0), None);
    }

    #[test]
    fn test_missing_pixel_is_reported() {
        let mut arena = SegmentArena::new();
        arena.push(Rgb::BLACK, area(&[(0, 0)])).unwrap();
        assert!(matches!(
            LabelMap::build(2, 1, &arena),
            Err(RegionError::UnlabeledPixel { x: 1, y: 0 })
        ));
    }

    #[test]
    fn test_overlap_is_reported() {
        let mut arena = SegmentArena::new();
        arena.push(Rgb::BLACK, area(&[(0, 0)])).unwrap();
        arena.push(Rgb::WHITE, area(&[(0, 0)])).unwrap();
        assert!(matches!(
            LabelMap::build(1, 1, &arena),
            Err(RegionError::OverlappingSegments { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_is_reported() {
        let mut arena = SegmentArena::new();
        arena.push(Rgb::BLACK, area(&[(0, 0), (3, 0)])).unwrap();
        assert!(matches!(
            LabelMap::build(2, 1, &arena),
            Err(RegionError::PixelOutOfBounds { x: 3, .. })
        ));
    }

    #[test]
    fn test_render_is_seeded() {
        let mut arena = SegmentArena::new();
        arena.push(Rgb::BLACK, area(&[(0, 0)])).unwrap();
        arena.push(Rgb::WHITE, area(&[(1, 0)])).unwrap();
        let labels = LabelMap::build(2, 1, &arena).unwrap();

        let a = labels.render(7).unwrap();
        let b = labels.render(7).unwrap();
        assert_eq!(a, b);
        assert_eq!((a.width(), a.height()), (2, 1));
    }
}
