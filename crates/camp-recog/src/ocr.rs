//! OCR capability
//!
//! Text recognition itself happens outside this crate. An [`OcrEngine`]
//! receives a rendered region and answers with its text, if any.

use crate::error::RecogResult;
use crate::render::render_region;
use camp_core::Pix;
use camp_region::Region;
use tracing::{debug, warn};

/// External text recognizer.
pub trait OcrEngine {
    /// Recognize the text in a black-on-white image.
    ///
    /// Returns `None` when nothing meaningful was read.
    fn recognize(&self, image: &Pix) -> Option<String>;
}

impl<F> OcrEngine for F
where
    F: Fn(&Pix) -> Option<String>,
{
    fn recognize(&self, image: &Pix) -> Option<String> {
        self(image)
    }
}

/// Engine that never recognizes anything; every region stays graphical.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcr;

impl OcrEngine for NoOcr {
    fn recognize(&self, _image: &Pix) -> Option<String> {
        None
    }
}

/// Render `region` at each angle in turn until the engine reads text.
///
/// Whitespace-only answers count as unrecognized. Returns the trimmed text
/// and the angle that produced it.
pub fn recognize_region<E, R>(
    engine: &E,
    region: &R,
    border: u32,
    angles: &[u32],
) -> RecogResult<Option<(String, u32)>>
where
    E: OcrEngine + ?Sized,
    R: Region + ?Sized,
{
    for &angle in angles {
        let Some(image) = render_region(region, border, angle)? else {
            warn!(id = %region.id(), "region without pixels skipped by OCR");
            return Ok(None);
        };
        match engine.recognize(&image) {
            Some(text) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                debug!(id = %region.id(), angle, %text, "text recognized");
                return Ok(Some((text, angle)));
            }
            _ => {}
        }
    }
    Ok(None)
}
