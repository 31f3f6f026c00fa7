//! Synthetic test images

use camp_core::{Pix, Rgb};
use rand::Rng;

/// Color used for a character in [`pix_from_art`].
///
/// `.` white, `#` black, `r` red, `g` green, `b` blue, `y` yellow,
/// `c` cyan, `m` magenta; any other character maps to mid gray.
pub fn art_color(ch: char) -> Rgb {
    match ch {
        '.' => Rgb::WHITE,
        '#' => Rgb::BLACK,
        'r' => Rgb::new(255, 0, 0),
        'g' => Rgb::new(0, 255, 0),
        'b' => Rgb::new(0, 0, 255),
        'y' => Rgb::new(255, 255, 0),
        'c' => Rgb::new(0, 255, 255),
        'm' => Rgb::new(255, 0, 255),
        _ => Rgb::new(128, 128, 128),
    }
}

/// Build an image from rows of characters, one character per pixel.
///
/// # Panics
///
/// Panics if `rows` is empty or the rows differ in length.
pub fn pix_from_art(rows: &[&str]) -> Pix {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut pm = Pix::new(width, height).expect("art must not be empty").to_mut();
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count() as u32, width, "ragged art row {}", y);
        for (x, ch) in row.chars().enumerate() {
            pm.set_rgb(x as u32, y as u32, art_color(ch))
                .expect("art pixel in bounds");
        }
    }
    pm.into()
}

/// Random image drawing each pixel from a palette of `ncolors` colors.
pub fn random_pix<R: Rng>(rng: &mut R, width: u32, height: u32, ncolors: u8) -> Pix {
    let mut pm = Pix::new(width, height).expect("non-empty image").to_mut();
    for y in 0..height {
        for x in 0..width {
            let v = rng.random_range(0..ncolors.max(1));
            pm.set_rgb(x, y, Rgb::new(v, v.wrapping_mul(37), 0))
                .expect("pixel in bounds");
        }
    }
    pm.into()
}
