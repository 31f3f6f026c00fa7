//! Figure recognition
//!
//! Each graphical segment is scored by every registered recognizer; the
//! best strictly positive score decides its figure kind.

use crate::error::{RecogError, RecogResult};
use crate::pipeline::Stage;
use crate::store::{FIGURE_RECOGNITOR, FigureMatch, FigureOutput, StageStore};
use camp_core::Pix;
use camp_region::{FigureKind, Genre, Region};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Scores how well a region matches one figure kind.
pub trait FigureRecognizer {
    /// Kind assigned when this recognizer wins.
    fn kind(&self) -> FigureKind;

    /// Lower values run first; among equal scores the first wins.
    fn priority(&self) -> i32 {
        0
    }

    /// Confidence that `region` is this figure; `0.0` means no match.
    fn test(&self, region: &dyn Region) -> f64;
}

/// Axis-aligned filled rectangle: nearly all of the bounding box is covered.
#[derive(Debug, Clone, Copy)]
pub struct RectangleRecognizer {
    /// Smallest accepted coverage
    pub min_coverage: f64,
    /// Smallest accepted side length
    pub min_side: u32,
}

impl Default for RectangleRecognizer {
    fn default() -> Self {
        Self {
            min_coverage: 0.95,
            min_side: 2,
        }
    }
}

impl FigureRecognizer for RectangleRecognizer {
    fn kind(&self) -> FigureKind {
        FigureKind::Rectangle
    }

    fn test(&self, region: &dyn Region) -> f64 {
        let (Some(w), Some(h), Some(coverage)) = (region.width(), region.height(), region.coverage())
        else {
            return 0.0;
        };
        if w < self.min_side || h < self.min_side || coverage < self.min_coverage {
            return 0.0;
        }
        coverage
    }
}

/// Recognizers ordered by priority.
#[derive(Default)]
pub struct RecognizerRegistry {
    recognizers: Vec<Box<dyn FigureRecognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the recognizers shipped in this crate.
    pub fn builtin() -> Self {
        Self::new().with(RectangleRecognizer::default())
    }

    pub fn with<R: FigureRecognizer + 'static>(mut self, recognizer: R) -> Self {
        self.register(recognizer);
        self
    }

    /// Insert keeping priority order; equal priorities keep insertion order.
    pub fn register<R: FigureRecognizer + 'static>(&mut self, recognizer: R) {
        let pos = self
            .recognizers
            .partition_point(|r| r.priority() <= recognizer.priority());
        self.recognizers.insert(pos, Box::new(recognizer));
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Kinds in evaluation order.
    pub fn kinds(&self) -> Vec<FigureKind> {
        self.recognizers.iter().map(|r| r.kind()).collect()
    }

    /// Best strictly positive match for `region`.
    pub fn best_match(&self, region: &dyn Region) -> Option<(FigureKind, f64)> {
        let mut best: Option<(FigureKind, f64)> = None;
        for r in &self.recognizers {
            let score = r.test(region);
            if score.is_nan() {
                warn!(id = %region.id(), kind = ?r.kind(), "recognizer returned NaN");
                continue;
            }
            if score <= 0.0 {
                continue;
            }
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((r.kind(), score));
            }
        }
        best
    }
}

/// Stage tagging graphical segments with figure kinds.
pub struct FigureRecognitor {
    registry: RecognizerRegistry,
}

impl FigureRecognitor {
    pub fn new(registry: RecognizerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RecognizerRegistry {
        &self.registry
    }
}

impl Stage for FigureRecognitor {
    fn name(&self) -> &'static str {
        FIGURE_RECOGNITOR
    }

    fn process(&mut self, _image: &Pix, store: &mut StageStore) -> RecogResult<()> {
        if self.registry.is_empty() {
            return Err(RecogError::NoRecognizers);
        }
        let graphical = store.text(FIGURE_RECOGNITOR)?.graphical.clone();
        let arena = store.segmentation_mut(FIGURE_RECOGNITOR)?.arena_mut();
        debug!(
            ncandidates = graphical.len(),
            nrecognizers = self.registry.len(),
            "figure recognition started"
        );

        let mut figures = Vec::new();
        for id in graphical {
            let seg = arena.segment(FIGURE_RECOGNITOR, id)?;
            let Some((kind, score)) = self.registry.best_match(seg) else {
                continue;
            };
            arena.set_genre(id, Some(Arc::new(Genre::Figure(kind))))?;
            figures.push(FigureMatch { id, kind, score });
        }

        info!(nfigures = figures.len(), "figure recognition finished");
        store.set_figures(FigureOutput { figures });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::{Coord, Rgb};
    use camp_region::{Segment, SegmentId};
    use std::collections::HashSet;

    fn rect(w: u32, h: u32) -> Segment {
        let mut area = HashSet::new();
        for y in 0..h {
            for x in 0..w {
                area.insert(Coord::new(x, y));
            }
        }
        Segment::new(SegmentId(0), Rgb::BLACK, area)
    }

    struct Fixed(FigureKind, i32, f64);

    impl FigureRecognizer for Fixed {
        fn kind(&self) -> FigureKind {
            self.0
        }
        fn priority(&self) -> i32 {
            self.1
        }
        fn test(&self, _region: &dyn Region) -> f64 {
            self.2
        }
    }

    #[test]
    fn test_rectangle_recognizer() {
        let r = RectangleRecognizer::default();
        assert_eq!(r.test(&rect(4, 3)), 1.0);
        assert_eq!(r.test(&rect(1, 5)), 0.0);

        // An L shape covers 3 of 4 pixels
        let area: HashSet<Coord> = [(0, 0), (0, 1), (1, 1)]
            .iter()
            .map(|&c| Coord::from(c))
            .collect();
        let ell = Segment::new(SegmentId(1), Rgb::BLACK, area);
        assert_eq!(r.test(&ell), 0.0);
    }

    #[test]
    fn test_registry_order_and_best_match() {
        let registry = RecognizerRegistry::new()
            .with(Fixed(FigureKind::Rectangle, 5, 0.4))
            .with(Fixed(FigureKind::Rectangle, -1, f64::NAN))
            .with(Fixed(FigureKind::Rectangle, 0, 0.9));
        assert_eq!(registry.len(), 3);

        let (kind, score) = registry.best_match(&rect(2, 2)).unwrap();
        assert_eq!(kind, FigureKind::Rectangle);
        assert_eq!(score, 0.9);
    }

    #[test]
    fn test_no_positive_score() {
        let registry = RecognizerRegistry::new().with(Fixed(FigureKind::Rectangle, 0, 0.0));
        assert!(registry.best_match(&rect(2, 2)).is_none());
    }

    #[test]
    fn test_empty_registry_fails() {
        let pix = Pix::new(2, 2).unwrap();
        let mut stage = FigureRecognitor::new(RecognizerRegistry::new());
        assert!(matches!(
            stage.process(&pix, &mut StageStore::new()),
            Err(RecogError::NoRecognizers)
        ));
    }
}
