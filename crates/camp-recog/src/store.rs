//! Hand-off between pipeline stages
//!
//! Each producing stage owns one slot. A stage reading a slot that has not
//! been filled yet gets [`RecogError::MissingStageOutput`].

use crate::error::{RecogError, RecogResult};
use camp_core::Box;
use camp_region::{FigureKind, SegmentGroup, SegmentId, Segmentation};
use std::collections::BTreeSet;

/// Name of the segmentation stage.
pub const SEGMENTIZER: &str = "Segmentizer";
/// Name of the text assembly stage.
pub const TEXT_RECOGNITOR: &str = "TextRecognitor";
/// Name of the figure recognition stage.
pub const FIGURE_RECOGNITOR: &str = "FigureRecognitor";

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    /// Sentence group; its leaves carry the text genre
    pub group: SegmentGroup,
    pub text: String,
    /// `false` for text read top to bottom or bottom to top
    pub horizontal: bool,
    pub bounds: Box,
}

/// Output of the text stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOutput {
    pub text: Vec<TextEntry>,
    /// Leaf segments left for figure recognition, sorted
    pub graphical: Vec<SegmentId>,
    /// Background segments, excluded from both text and figures
    pub background: BTreeSet<SegmentId>,
}

/// A segment matched by a figure recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureMatch {
    pub id: SegmentId,
    pub kind: FigureKind,
    pub score: f64,
}

/// Output of the figure stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureOutput {
    pub figures: Vec<FigureMatch>,
}

/// Results of all stages run so far.
#[derive(Debug, Default)]
pub struct StageStore {
    segmentizer: Option<Segmentation>,
    text_recognitor: Option<TextOutput>,
    figure_recognitor: Option<FigureOutput>,
}

impl StageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_segmentation(&mut self, seg: Segmentation) {
        self.segmentizer = Some(seg);
    }

    pub fn set_text(&mut self, out: TextOutput) {
        self.text_recognitor = Some(out);
    }

    pub fn set_figures(&mut self, out: FigureOutput) {
        self.figure_recognitor = Some(out);
    }

    /// Segmentation result, as required by `stage`.
    pub fn segmentation(&self, stage: &'static str) -> RecogResult<&Segmentation> {
        self.segmentizer.as_ref().ok_or(RecogError::MissingStageOutput {
            stage,
            required: SEGMENTIZER,
        })
    }

    pub fn segmentation_mut(&mut self, stage: &'static str) -> RecogResult<&mut Segmentation> {
        self.segmentizer.as_mut().ok_or(RecogError::MissingStageOutput {
            stage,
            required: SEGMENTIZER,
        })
    }

    /// Text stage result, as required by `stage`.
    pub fn text(&self, stage: &'static str) -> RecogResult<&TextOutput> {
        self.text_recognitor
            .as_ref()
            .ok_or(RecogError::MissingStageOutput {
                stage,
                required: TEXT_RECOGNITOR,
            })
    }

    /// Figure stage result, as required by `stage`.
    pub fn figures(&self, stage: &'static str) -> RecogResult<&FigureOutput> {
        self.figure_recognitor
            .as_ref()
            .ok_or(RecogError::MissingStageOutput {
                stage,
                required: FIGURE_RECOGNITOR,
            })
    }

    /// Take ownership of the segmentation, emptying its slot.
    pub fn take_segmentation(&mut self) -> Option<Segmentation> {
        self.segmentizer.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slots() {
        let store = StageStore::new();
        assert!(matches!(
            store.segmentation("TextRecognitor"),
            Err(RecogError::MissingStageOutput {
                stage: "TextRecognitor",
                required: SEGMENTIZER
            })
        ));
        assert!(matches!(
            store.text("FigureRecognitor"),
            Err(RecogError::MissingStageOutput {
                required: TEXT_RECOGNITOR,
                ..
            })
        ));
        assert!(store.figures("Parser").is_err());
    }

    #[test]
    fn test_filled_slot() {
        let mut store = StageStore::new();
        store.set_figures(FigureOutput::default());
        assert!(store.figures("Parser").unwrap().figures.is_empty());
    }
}
