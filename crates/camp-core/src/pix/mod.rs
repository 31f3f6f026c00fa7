//! PIX - The main image container
//!
//! `Pix` holds a decoded RGB image. Pixels are stored row-major, one packed
//! 32-bit word per pixel (`0xRRGGBB00`, see [`crate::color`]).
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

use crate::color::Rgb;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal PIX data
#[derive(Debug, Clone, PartialEq, Eq)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed pixels, `width * height` words, row-major
    data: Vec<u32>,
}

impl PixData {
    fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![color.to_packed(); len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use camp_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    inner: Arc<PixData>,
}

/// Mutable image, obtained from [`Pix::to_mut`] or [`Pix::try_into_mut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixMut {
    inner: PixData,
}

impl Pix {
    /// Create a new black PIX with the specified dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Rgb::BLACK)
    }

    /// Create a new PIX with every pixel set to `color`.
    pub fn new_filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::filled(width, height, color)?),
        })
    }

    /// Create a PIX from interleaved 8-bit RGB samples (3 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `raw` is not `width * height * 3`
    /// bytes long.
    pub fn from_raw_rgb(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        let mut data = PixData::filled(width, height, Rgb::BLACK)?;
        let expected = data.data.len() * 3;
        if raw.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: raw.len(),
            });
        }
        for (word, rgb) in data.data.iter_mut().zip(raw.chunks_exact(3)) {
            *word = Rgb::new(rgb[0], rgb[1], rgb[2]).to_packed();
        }
        Ok(Pix {
            inner: Arc::new(data),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn npixels(&self) -> usize {
        self.inner.data.len()
    }

    /// Interleaved 8-bit RGB samples, row-major.
    pub fn to_raw_rgb(&self) -> Vec<u8> {
        self.inner
            .data
            .iter()
            .flat_map(|&w| Rgb::from_packed(w).channels())
            .collect()
    }

    /// Get a mutable copy of this image.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Convert into a mutable image without copying if this is the only
    /// reference; otherwise hand the shared image back.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Pix> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixMut { inner }),
            Err(inner) => Err(Pix { inner }),
        }
    }
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<PixMut> for Pix {
    fn from(pm: PixMut) -> Self {
        Pix {
            inner: Arc::new(pm.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.npixels(), 20_000);
        assert_eq!(pix.get_rgb(5, 5), Some(Rgb::BLACK));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Pix::new(0, 100).is_err());
        assert!(Pix::new(100, 0).is_err());
    }

    #[test]
    fn test_raw_round_trip() {
        let raw = [1, 2, 3, 4, 5, 6];
        let pix = Pix::from_raw_rgb(2, 1, &raw).unwrap();
        assert_eq!(pix.get_rgb(1, 0), Some(Rgb::new(4, 5, 6)));
        assert_eq!(pix.to_raw_rgb(), raw.to_vec());
        assert!(matches!(
            Pix::from_raw_rgb(2, 2, &raw),
            Err(Error::BufferLength {
                expected: 12,
                actual: 6
            })
        ));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(2, 2).unwrap();
        let shared = pix.clone();
        let back = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(back.try_into_mut().is_ok());
    }
}
