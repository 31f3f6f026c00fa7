//! RGB color values
//!
//! Colors are stored packed in 32-bit words as `0xRRGGBB00` inside [`Pix`],
//! and exposed to callers as the [`Rgb`] triple.
//!
//! [`Pix`]: crate::Pix

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shift amounts for extracting color channels from a packed pixel
pub const RED_SHIFT: u32 = 24;
pub const GREEN_SHIFT: u32 = 16;
pub const BLUE_SHIFT: u32 = 8;

/// A 3-channel color.
///
/// Ordering is lexicographic over `(r, g, b)`, which gives the canonical
/// color enumeration order used by segmentation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into a 32-bit word (`0xRRGGBB00`).
    #[inline]
    pub fn to_packed(self) -> u32 {
        ((self.r as u32) << RED_SHIFT)
            | ((self.g as u32) << GREEN_SHIFT)
            | ((self.b as u32) << BLUE_SHIFT)
    }

    /// Unpack from a 32-bit word; the low byte is ignored.
    #[inline]
    pub fn from_packed(pixel: u32) -> Self {
        Self {
            r: ((pixel >> RED_SHIFT) & 0xff) as u8,
            g: ((pixel >> GREEN_SHIFT) & 0xff) as u8,
            b: ((pixel >> BLUE_SHIFT) & 0xff) as u8,
        }
    }

    /// Channels as an array.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let c = Rgb::new(12, 200, 7);
        assert_eq!(c.to_packed(), 0x0cc8_0700);
        assert_eq!(Rgb::from_packed(c.to_packed()), c);
        assert_eq!(Rgb::from_packed(c.to_packed() | 0xff), c);
    }

    #[test]
    fn test_ordering() {
        let mut colors = vec![Rgb::WHITE, Rgb::new(0, 0, 9), Rgb::BLACK, Rgb::new(0, 1, 0)];
        colors.sort();
        assert_eq!(
            colors,
            vec![Rgb::BLACK, Rgb::new(0, 0, 9), Rgb::new(0, 1, 0), Rgb::WHITE]
        );
    }
}
