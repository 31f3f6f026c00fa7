//! Box - Rectangle regions
//!
//! Bounding rectangles of segments and groups. A box stores its top-left
//! corner and size; the inclusive extent `(x, y, x_max, y_max)` is what
//! segment geometry reports as "bounds".

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A rectangle region
///
/// A simple Copy type since it's small and frequently copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from an inclusive extent `(left, top, right, bottom)`.
    ///
    /// A single pixel at `(3, 4)` is `from_extent(3, 4, 3, 4)`, a 1x1 box.
    pub fn from_extent(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (x0, x1) = (left.min(right), left.max(right));
        let (y0, y1) = (top.min(bottom), top.max(bottom));
        Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Last column covered by the box (inclusive)
    #[inline]
    pub fn x_max(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Last row covered by the box (inclusive)
    #[inline]
    pub fn y_max(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Inclusive extent `(left, top, right, bottom)`
    #[inline]
    pub fn extent(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.x_max(), self.y_max())
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union (bounding box) of two boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Swap the roles of the x and y axes.
    pub fn transposed(&self) -> Box {
        Box {
            x: self.y,
            y: self.x,
            w: self.h,
            h: self.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 100, 50).unwrap();
        assert_eq!(b.x, 10);
        assert_eq!(b.right(), 110);
        assert_eq!(b.bottom(), 70);
        assert!(Box::new(0, 0, -1, 5).is_err());
    }

    #[test]
    fn test_extent_is_inclusive() {
        let b = Box::from_extent(0, 0, 3, 3);
        assert_eq!((b.w, b.h), (4, 4));
        assert_eq!(b.extent(), (0, 0, 3, 3));

        let p = Box::from_extent(3, 4, 3, 4);
        assert_eq!((p.w, p.h), (1, 1));
        assert_eq!(p.area(), 1);

        let swapped = Box::from_extent(5, 6, 1, 2);
        assert_eq!(swapped.extent(), (1, 2, 5, 6));
    }

    #[test]
    fn test_union_and_overlap() {
        let a = Box::from_extent(0, 0, 5, 5);
        let b = Box::from_extent(5, 5, 9, 9);
        let c = Box::from_extent(6, 0, 9, 4);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.union(&c).extent(), (0, 0, 9, 5));
    }

    #[test]
    fn test_transposed() {
        let b = Box::new(1, 2, 3, 4).unwrap();
        assert_eq!(b.transposed(), Box::new(2, 1, 4, 3).unwrap());
        assert_eq!(b.transposed().transposed(), b);
    }
}
