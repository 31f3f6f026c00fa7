//! camp-recog - Text and figure recognition stages
//!
//! This crate builds on the segmentation in `camp-region`:
//!
//! - **Pipeline**: Ordered [`Stage`]s sharing a [`StageStore`]
//! - **Text assembly**: Letters to glyphs, words and sentences in both
//!   orientations, read through an [`OcrEngine`]
//! - **Figure recognition**: Graphical segments scored by a
//!   [`RecognizerRegistry`]
//!
//! # Quick Start
//!
//! ```
//! use camp_core::{Box, Pix, Rgb};
//! use camp_recog::{
//!     FigureRecognitor, NoOcr, Pipeline, RecognizerRegistry, Segmentizer, TextOptions,
//!     TextRecognitor,
//! };
//!
//! let mut pm = Pix::new_filled(20, 20, Rgb::WHITE).unwrap().to_mut();
//! pm.fill_rect(&Box::new(5, 5, 6, 8).unwrap(), Rgb::new(0, 0, 255));
//! let pix: Pix = pm.into();
//!
//! let mut pipeline = Pipeline::new()
//!     .with_stage(Segmentizer::default())
//!     .with_stage(TextRecognitor::new(NoOcr, TextOptions::default()).unwrap())
//!     .with_stage(FigureRecognitor::new(RecognizerRegistry::builtin()));
//! let store = pipeline.run(&pix).unwrap();
//!
//! let figures = &store.figures("example").unwrap().figures;
//! assert_eq!(figures.len(), 1);
//! ```

mod error;
pub mod figure;
pub mod ocr;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod text;

pub use error::{RecogError, RecogResult};

pub use figure::{FigureRecognitor, FigureRecognizer, RecognizerRegistry, RectangleRecognizer};
pub use ocr::{NoOcr, OcrEngine, recognize_region};
pub use pipeline::{Pipeline, Segmentizer, Stage};
pub use render::render_region;
pub use store::{
    FIGURE_RECOGNITOR, FigureMatch, FigureOutput, SEGMENTIZER, StageStore, TEXT_RECOGNITOR,
    TextEntry, TextOutput,
};
pub use text::{LetterFilter, MAX_BORDER, TextOptions, TextRecognitor};

// Re-export lower layers for convenience
pub use camp_core;
pub use camp_region;
