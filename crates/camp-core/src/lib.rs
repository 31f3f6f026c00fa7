//! camp-core - Basic data structures for chart image analysis
//!
//! This crate provides the fundamental types shared by the rest of the
//! toolkit:
//!
//! - [`Raster`] - Read access to a decoded, single-mode RGB image
//! - [`Pix`] / [`PixMut`] - The concrete image container (immutable / mutable)
//! - [`Rgb`] - A 3-channel color, used as a hash and ordering key
//! - [`Coord`] - A pixel coordinate
//! - [`Box`] - An axis-aligned bounding rectangle
//!
//! # Examples
//!
//! ```
//! use camp_core::{Pix, Raster, Rgb};
//!
//! let pix = Pix::new(4, 4).unwrap();
//! let mut pm = pix.to_mut();
//! pm.set_rgb(1, 2, Rgb::new(255, 0, 0)).unwrap();
//! let pix: Pix = pm.into();
//!
//! assert_eq!(pix.pixel(1, 2), Rgb::new(255, 0, 0));
//! assert_eq!(pix.colors().len(), 2);
//! ```

pub mod box_;
pub mod color;
pub mod coord;
pub mod error;
pub mod pix;
pub mod raster;

pub use box_::Box;
pub use color::Rgb;
pub use coord::Coord;
pub use error::{Error, Result};
pub use pix::{Pix, PixMut};
pub use raster::Raster;
