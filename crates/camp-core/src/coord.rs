//! Pixel coordinates

use serde::{Deserialize, Serialize};

/// An integer pixel coordinate, `0 <= x < width`, `0 <= y < height`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, returning `None` if the result leaves
    /// `[0, width) x [0, height)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, width: u32, height: u32) -> Option<Coord> {
        let nx = self.x.checked_add_signed(dx)?;
        let ny = self.y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some(Coord::new(nx, ny))
    }

    /// Offset by `(dx, dy)` without an upper bound; `None` only on underflow.
    #[inline]
    pub fn offset_unbounded(self, dx: i32, dy: i32) -> Option<Coord> {
        Some(Coord::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}
