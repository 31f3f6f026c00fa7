//! Region rendering for OCR
//!
//! A region is drawn black on white, cropped to its bounding box with a
//! white margin, and optionally rotated by a multiple of 90 degrees.

use crate::error::{RecogError, RecogResult};
use camp_core::{Pix, PixMut, Rgb};
use camp_region::Region;

/// Render `region` as a black-on-white image.
///
/// `angle` is a counter-clockwise rotation in degrees and must be one of
/// 0, 90, 180 or 270. Returns `None` for a region without pixels.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] for any other angle and for a
/// border that overflows the padded image size.
pub fn render_region<R: Region + ?Sized>(
    region: &R,
    border: u32,
    angle: u32,
) -> RecogResult<Option<Pix>> {
    let quads = match angle {
        0 => 0,
        90 => 1,
        180 => 2,
        270 => 3,
        _ => {
            return Err(RecogError::InvalidParameter(format!(
                "rotation angle must be a multiple of 90, got {}",
                angle
            )));
        }
    };

    let area = region.area();
    let Some(bounds) = camp_region::bounds_of(area.iter()) else {
        return Ok(None);
    };
    let (x0, y0) = (bounds.x as u32, bounds.y as u32);
    let padded = |side: i32| {
        border
            .checked_mul(2)
            .and_then(|margin| (side as u32).checked_add(margin))
            .ok_or_else(|| {
                RecogError::InvalidParameter(format!("border {} too large for region", border))
            })
    };
    let (w, h) = (padded(bounds.w)?, padded(bounds.h)?);

    let mut pm = Pix::new_filled(w, h, Rgb::WHITE)?.to_mut();
    for c in area.iter() {
        pm.set_rgb(c.x - x0 + border, c.y - y0 + border, Rgb::BLACK)?;
    }
    let pix: Pix = pm.into();

    Ok(Some(rotate_orth(&pix, quads)?))
}

/// Rotate by `quads` quarter turns counter-clockwise.
fn rotate_orth(pix: &Pix, quads: u32) -> RecogResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let out = match quads % 4 {
        0 => return Ok(pix.clone()),
        2 => {
            let mut out = Pix::new(w, h)?.to_mut();
            copy_mapped(pix, &mut out, |x, y| (w - 1 - x, h - 1 - y))?;
            out
        }
        1 => {
            let mut out = Pix::new(h, w)?.to_mut();
            copy_mapped(pix, &mut out, |x, y| (y, w - 1 - x))?;
            out
        }
        _ => {
            let mut out = Pix::new(h, w)?.to_mut();
            copy_mapped(pix, &mut out, |x, y| (h - 1 - y, x))?;
            out
        }
    };
    Ok(out.into())
}

fn copy_mapped<F>(src: &Pix, dst: &mut PixMut, map: F) -> RecogResult<()>
where
    F: Fn(u32, u32) -> (u32, u32),
{
    for y in 0..src.height() {
        for x in 0..src.width() {
            let (nx, ny) = map(x, y);
            dst.set_rgb(nx, ny, src.get_rgb_unchecked(x, y))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_core::Coord;
    use camp_region::Segment;
    use camp_region::SegmentId;
    use std::collections::HashSet;

    // Horizontal bar of 3 pixels at (5..=7, 2) plus one pixel below its
    // left end, drawn in red
    fn ell() -> Segment {
        let area: HashSet<Coord> = [(5, 2), (6, 2), (7, 2), (5, 3)]
            .iter()
            .map(|&c| Coord::from(c))
            .collect();
        Segment::new(SegmentId(0), Rgb::new(255, 0, 0), area)
    }

    #[test]
    fn test_render_crops_with_border() {
        let pix = render_region(&ell(), 1, 0).unwrap().unwrap();
        assert_eq!((pix.width(), pix.height()), (5, 4));
        assert_eq!(pix.get_rgb(1, 1), Some(Rgb::BLACK));
        assert_eq!(pix.get_rgb(3, 1), Some(Rgb::BLACK));
        assert_eq!(pix.get_rgb(1, 2), Some(Rgb::BLACK));
        assert_eq!(pix.get_rgb(2, 2), Some(Rgb::WHITE));
        assert_eq!(pix.get_rgb(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_rotations() {
        let seg = ell();
        let r90 = render_region(&seg, 0, 90).unwrap().unwrap();
        assert_eq!((r90.width(), r90.height()), (2, 3));
        // The bar becomes the left column, its right end on top
        assert_eq!(r90.get_rgb(0, 0), Some(Rgb::BLACK));
        assert_eq!(r90.get_rgb(0, 2), Some(Rgb::BLACK));
        assert_eq!(r90.get_rgb(1, 2), Some(Rgb::BLACK));
        assert_eq!(r90.get_rgb(1, 0), Some(Rgb::WHITE));

        let r180 = render_region(&seg, 0, 180).unwrap().unwrap();
        assert_eq!(r180.get_rgb(2, 0), Some(Rgb::BLACK));
        assert_eq!(r180.get_rgb(0, 0), Some(Rgb::WHITE));

        let r270 = render_region(&seg, 0, 270).unwrap().unwrap();
        assert_eq!((r270.width(), r270.height()), (2, 3));
        assert_eq!(r270.get_rgb(1, 0), Some(Rgb::BLACK));
        assert_eq!(r270.get_rgb(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_invalid_angle() {
        assert!(matches!(
            render_region(&ell(), 0, 45),
            Err(RecogError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_oversized_border() {
        assert!(matches!(
            render_region(&ell(), u32::MAX, 0),
            Err(RecogError::InvalidParameter(_))
        ));
        assert!(matches!(
            render_region(&ell(), u32::MAX / 2, 0),
            Err(RecogError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_region() {
        let seg = Segment::new(SegmentId(0), Rgb::BLACK, HashSet::new());
        assert!(render_region(&seg, 2, 0).unwrap().is_none());
    }
}
