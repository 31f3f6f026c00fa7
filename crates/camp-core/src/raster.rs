//! Raster capability
//!
//! Segmentation only needs read access to a decoded image: its size, the
//! color of each pixel, and a color histogram. [`Raster`] names that
//! capability so callers may segment any image type they already hold.

use crate::color::Rgb;
use crate::pix::Pix;
use std::collections::BTreeMap;

/// Read access to a single-mode, 3-channel image.
pub trait Raster {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Color at `(x, y)`. Callers guarantee `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Rgb;

    /// Number of pixels.
    fn npixels(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Color histogram as `(count, color)` pairs in ascending color order.
    fn colors(&self) -> Vec<(usize, Rgb)> {
        let mut counts: BTreeMap<Rgb, usize> = BTreeMap::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                *counts.entry(self.pixel(x, y)).or_insert(0) += 1;
            }
        }
        counts.into_iter().map(|(c, n)| (n, c)).collect()
    }
}

impl Raster for Pix {
    #[inline]
    fn width(&self) -> u32 {
        Pix::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        Pix::height(self)
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.get_rgb_unchecked(x, y)
    }
}
