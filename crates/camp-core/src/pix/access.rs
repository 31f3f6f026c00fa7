//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.

use super::{Pix, PixMut};
use crate::box_::Box;
use crate::color::Rgb;
use crate::error::{Error, Result};

impl Pix {
    /// Get the color at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the color without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_packed(self.inner.data[self.inner.index(x, y)])
    }
}

impl PixMut {
    /// Get the color at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(Rgb::from_packed(self.inner.data[self.inner.index(x, y)]))
    }

    /// Set the color at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color.to_packed();
        Ok(())
    }

    /// Paint a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, rect: &Box, color: Rgb) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.inner.width as i32);
        let y1 = rect.bottom().min(self.inner.height as i32);
        let packed = color.to_packed();
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = self.inner.index(x as u32, y as u32);
                self.inner.data[idx] = packed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut pm = Pix::new(3, 3).unwrap().to_mut();
        pm.set_rgb(2, 1, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!(pm.get_rgb(2, 1), Some(Rgb::new(9, 8, 7)));
        assert!(pm.set_rgb(3, 0, Rgb::WHITE).is_err());
        assert_eq!(pm.get_rgb(0, 3), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut pm = Pix::new(4, 4).unwrap().to_mut();
        pm.fill_rect(&Box::new_unchecked(2, 2, 10, 10), Rgb::WHITE);
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some(Rgb::BLACK));
        assert_eq!(pix.get_rgb(3, 3), Some(Rgb::WHITE));
        assert_eq!(pix.get_rgb(2, 3), Some(Rgb::WHITE));
    }
}
