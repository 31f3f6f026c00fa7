//! Text assembly
//!
//! Letter-sized segments are merged into glyphs by adjacency, chained into
//! words and sentences by proximity, and handed to an [`OcrEngine`].
//! Horizontal text is tried first; glyphs of sentences the engine could not
//! read are regrouped top to bottom and tried again rotated.
//!
//! Every non-background segment that does not end up in recognized text is
//! reported as graphical for the figure stage.

use crate::error::{RecogError, RecogResult};
use crate::ocr::{OcrEngine, recognize_region};
use crate::pipeline::Stage;
use crate::store::{StageStore, TEXT_RECOGNITOR, TextEntry, TextOutput};
use camp_core::Pix;
use camp_region::{
    Axis, Genre, Interval, IntervalOptions, Member, Region, SegmentArena, SegmentGroup, SegmentId,
    SizeSelectRelation, SizeSelectType, group_by_adjacency, group_by_proximity,
    select_by_pixel_count, select_by_size,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Largest accepted [`TextOptions::border`].
pub const MAX_BORDER: u32 = 4096;

/// Parameters of the text stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Largest gap between glyphs of one word
    pub letter_delta: u32,
    /// Largest gap between words of one sentence
    pub word_delta: u32,
    /// Height to width ratio above which a regrouped sentence is read as
    /// vertical text
    pub vertical_ratio: f64,
    /// Smallest letter segment, in pixels
    pub min_letter_pixels: usize,
    /// Largest letter segment side, as a fraction of the image side
    pub max_letter_fraction: f64,
    /// White margin around regions handed to OCR
    pub border: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            letter_delta: 3,
            word_delta: 10,
            vertical_ratio: 1.5,
            min_letter_pixels: 2,
            max_letter_fraction: 0.1,
            border: 4,
        }
    }
}

impl TextOptions {
    pub fn with_letter_delta(mut self, delta: u32) -> Self {
        self.letter_delta = delta;
        self
    }

    pub fn with_word_delta(mut self, delta: u32) -> Self {
        self.word_delta = delta;
        self
    }

    pub fn with_vertical_ratio(mut self, ratio: f64) -> Self {
        self.vertical_ratio = ratio;
        self
    }

    pub fn with_min_letter_pixels(mut self, n: usize) -> Self {
        self.min_letter_pixels = n;
        self
    }

    pub fn with_max_letter_fraction(mut self, fraction: f64) -> Self {
        self.max_letter_fraction = fraction;
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> RecogResult<()> {
        if !(self.vertical_ratio > 0.0) {
            return Err(RecogError::InvalidParameter(format!(
                "vertical_ratio must be positive, got {}",
                self.vertical_ratio
            )));
        }
        if !(self.max_letter_fraction > 0.0 && self.max_letter_fraction <= 1.0) {
            return Err(RecogError::InvalidParameter(format!(
                "max_letter_fraction must be in (0, 1], got {}",
                self.max_letter_fraction
            )));
        }
        if self.border > MAX_BORDER {
            return Err(RecogError::InvalidParameter(format!(
                "border must be at most {}, got {}",
                MAX_BORDER, self.border
            )));
        }
        Ok(())
    }
}

/// Size limits a segment must satisfy to be a letter candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterFilter {
    pub min_pixels: usize,
    pub max_width: u32,
    pub max_height: u32,
}

impl LetterFilter {
    /// Limits for a `width` x `height` image.
    pub fn new(options: &TextOptions, width: u32, height: u32) -> Self {
        let side = |n: u32| ((n as f64 * options.max_letter_fraction).ceil() as u32).max(1);
        Self {
            min_pixels: options.min_letter_pixels,
            max_width: side(width),
            max_height: side(height),
        }
    }

    /// Keep the `ids` within the limits, in input order.
    pub fn select(&self, arena: &SegmentArena, ids: &[SegmentId]) -> RecogResult<Vec<SegmentId>> {
        let dense = select_by_pixel_count(arena, ids, self.min_pixels, usize::MAX)?;
        let small = select_by_size(
            arena,
            &dense,
            self.max_width,
            self.max_height,
            SizeSelectType::IfBoth,
            SizeSelectRelation::Lte,
        )?;
        Ok(small)
    }
}

/// Stage assembling and reading text.
pub struct TextRecognitor<E> {
    engine: E,
    options: TextOptions,
}

impl<E: OcrEngine> TextRecognitor<E> {
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `options` are out of range.
    pub fn new(engine: E, options: TextOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self { engine, options })
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    fn read(
        &self,
        group: &SegmentGroup,
        arena: &SegmentArena,
        angles: &[u32],
    ) -> RecogResult<Option<(String, u32)>> {
        let view = group.view(arena)?;
        recognize_region(&self.engine, &view, self.options.border, angles)
    }

    /// Glyphs to words to sentences along `axis`.
    fn assemble(
        &self,
        glyphs: Vec<SegmentGroup>,
        arena: &mut SegmentArena,
        axis: Axis,
    ) -> RecogResult<Vec<SegmentGroup>> {
        let words = chain(
            glyphs,
            arena,
            &IntervalOptions::new(axis, self.options.letter_delta),
        )?;
        let sentences = chain(
            words,
            arena,
            &IntervalOptions::new(axis, self.options.word_delta),
        )?;
        debug!(?axis, nsentences = sentences.len(), "assembled sentences");
        Ok(sentences)
    }
}

impl<E: OcrEngine> Stage for TextRecognitor<E> {
    fn name(&self) -> &'static str {
        TEXT_RECOGNITOR
    }

    fn process(&mut self, image: &Pix, store: &mut StageStore) -> RecogResult<()> {
        let seg = store.segmentation_mut(TEXT_RECOGNITOR)?;
        seg.check_dimensions(image)?;

        let background = seg.background();
        let filter = LetterFilter::new(&self.options, seg.width(), seg.height());
        let foreground: Vec<SegmentId> = seg
            .arena()
            .ids()
            .filter(|id| !background.contains(id))
            .collect();
        let letters = filter.select(seg.arena(), &foreground)?;
        info!(nletters = letters.len(), "letter candidates selected");

        let mut text = Vec::new();
        if !letters.is_empty() {
            let arena = seg.arena_mut();
            let glyphs = group_by_adjacency(arena, &letters)?;

            let mut leftover = Vec::new();
            for sentence in self.assemble(glyphs, arena, Axis::Horizontal)? {
                match self.read(&sentence, arena, &[0])? {
                    Some((t, _)) => text.push(tag(sentence, t, true, arena)?),
                    None => leftover.extend(glyphs_of(sentence)),
                }
            }

            if !leftover.is_empty() {
                for sentence in self.assemble(leftover, arena, Axis::Vertical)? {
                    let tall = sentence
                        .view(arena)?
                        .vfactor()
                        .is_some_and(|v| v >= self.options.vertical_ratio);
                    if !tall {
                        continue;
                    }
                    if let Some((t, _)) = self.read(&sentence, arena, &[90, 270])? {
                        text.push(tag(sentence, t, false, arena)?);
                    }
                }
            }
        }

        let claimed: BTreeSet<SegmentId> = text.iter().flat_map(|t| t.group.leaf_ids()).collect();
        let graphical: Vec<SegmentId> = seg
            .arena()
            .ids()
            .filter(|id| !background.contains(id) && !claimed.contains(id))
            .collect();

        info!(
            ntext = text.len(),
            ngraphical = graphical.len(),
            nbackground = background.len(),
            "text recognition finished"
        );
        store.set_text(TextOutput {
            text,
            graphical,
            background,
        });
        Ok(())
    }
}

/// One proximity sweep over groups, wrapping each chain in a new group.
fn chain(
    groups: Vec<SegmentGroup>,
    arena: &mut SegmentArena,
    options: &IntervalOptions,
) -> RecogResult<Vec<SegmentGroup>> {
    let mut intervals = Vec::with_capacity(groups.len());
    for g in groups {
        let bounds = g.view(arena)?.bounds();
        match bounds {
            Some(b) => intervals.push(Interval::new(b, g)),
            None => warn!(id = %g.id(), "group without pixels dropped"),
        }
    }
    if intervals.is_empty() {
        return Ok(Vec::new());
    }

    Ok(group_by_proximity(intervals, options)?
        .into_iter()
        .map(|ig| SegmentGroup::from_groups(arena.allocate_id(), ig.items))
        .collect())
}

/// Glyph groups of a sentence (sentence -> words -> glyphs).
fn glyphs_of(sentence: SegmentGroup) -> Vec<SegmentGroup> {
    let mut out = Vec::new();
    for word in sentence.into_members() {
        if let Member::Group(word) = word {
            out.extend(word.into_members().into_iter().filter_map(|m| match m {
                Member::Group(g) => Some(g),
                Member::Segment(_) => None,
            }));
        }
    }
    out
}

fn tag(
    mut sentence: SegmentGroup,
    text: String,
    horizontal: bool,
    arena: &mut SegmentArena,
) -> RecogResult<TextEntry> {
    let genre = Arc::new(Genre::Text {
        text: text.clone(),
        horizontal,
    });
    sentence.set_genre(genre, arena)?;
    let bounds = sentence.view(arena)?.bounds().unwrap_or_default();
    info!(%text, horizontal, id = %sentence.id(), "text found");
    Ok(TextEntry {
        group: sentence,
        text,
        horizontal,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::NoOcr;
    use camp_core::{Coord, Rgb};
    use std::collections::HashSet;

    #[test]
    fn test_letter_filter() {
        let opts = TextOptions::default()
            .with_max_letter_fraction(0.25)
            .with_min_letter_pixels(3);
        let filter = LetterFilter::new(&opts, 20, 8);
        assert_eq!((filter.max_width, filter.max_height), (5, 2));

        let mut arena = SegmentArena::new();
        let row = |xs: std::ops::Range<u32>, y: u32| -> HashSet<Coord> {
            xs.map(|x| Coord::new(x, y)).collect()
        };
        let bar = arena.push(Rgb::BLACK, row(0..4, 0)).unwrap();
        let dot = arena.push(Rgb::BLACK, row(0..2, 2)).unwrap();
        let wide = arena.push(Rgb::BLACK, row(0..6, 4)).unwrap();
        let tall = arena
            .push(Rgb::BLACK, (0..3).map(|y| Coord::new(10, y)).collect())
            .unwrap();

        // The dot is too sparse, the others exceed one side limit
        let kept = filter.select(&arena, &[tall, wide, dot, bar]).unwrap();
        assert_eq!(kept, vec![bar]);
        assert!(filter.select(&arena, &[SegmentId(9)]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(TextOptions::default().validate().is_ok());
        assert!(TextOptions::default().with_vertical_ratio(0.0).validate().is_err());
        assert!(TextOptions::default().with_max_letter_fraction(1.5).validate().is_err());
        assert!(TextRecognitor::new(NoOcr, TextOptions::default().with_vertical_ratio(f64::NAN)).is_err());
        assert!(TextOptions::default().with_border(MAX_BORDER).validate().is_ok());
        assert!(matches!(
            TextOptions::default().with_border(u32::MAX).validate(),
            Err(RecogError::InvalidParameter(_))
        ));

        // A border read from JSON goes through the same check
        let opts: TextOptions = serde_json::from_str(r#"{"border": 4294967295}"#).unwrap();
        assert!(TextRecognitor::new(NoOcr, opts).is_err());
    }

    #[test]
    fn test_requires_segmentation() {
        let pix = Pix::new(2, 2).unwrap();
        let mut stage = TextRecognitor::new(NoOcr, TextOptions::default()).unwrap();
        let mut store = StageStore::new();
        assert!(matches!(
            stage.process(&pix, &mut store),
            Err(RecogError::MissingStageOutput { .. })
        ));
    }

    #[test]
    fn test_options_from_json() {
        let opts: TextOptions = serde_json::from_str(r#"{"word_delta": 20}"#).unwrap();
        assert_eq!(opts.word_delta, 20);
        assert_eq!(opts.letter_delta, TextOptions::default().letter_delta);
    }
}
