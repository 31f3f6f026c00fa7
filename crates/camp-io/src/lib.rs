//! camp-io - Image I/O
//!
//! Decoding goes through the `image` crate, so any format it recognizes
//! can be read. Every decoded image is converted to 8-bit RGB before it is
//! wrapped in a [`Pix`]; alpha and higher bit depths are dropped.

mod error;

pub use error::{IoError, IoResult};

use camp_core::Pix;
use image::{ImageFormat, RgbImage};
use std::path::Path;
use tracing::debug;

/// Read an image from a file path.
///
/// The format is detected from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    let decoded = reader.decode()?;
    debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "decoded image"
    );
    from_rgb_image(&decoded.to_rgb8())
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let decoded = image::load_from_memory(data)?;
    from_rgb_image(&decoded.to_rgb8())
}

/// Write an image to a file path.
///
/// The format is chosen from the file extension (PNG, PPM, BMP, ...).
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    to_rgb_image(pix)?.save_with_format(path, format)?;
    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Wrap an `image` RGB buffer.
pub fn from_rgb_image(img: &RgbImage) -> IoResult<Pix> {
    Ok(Pix::from_raw_rgb(img.width(), img.height(), img.as_raw())?)
}

/// Copy a [`Pix`] into an `image` RGB buffer.
pub fn to_rgb_image(pix: &Pix) -> IoResult<RgbImage> {
    RgbImage::from_raw(pix.width(), pix.height(), pix.to_raw_rgb()).ok_or(IoError::Encode(
        format!("buffer does not fit {}x{}", pix.width(), pix.height()),
    ))
}
