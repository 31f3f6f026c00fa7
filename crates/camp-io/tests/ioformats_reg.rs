//! Image I/O regression test
//!
//! Reads the ASCII PPM fixture, writes it back as PNG and PPM into the
//! regout directory, and re-reads both.

use camp_core::{Raster, Rgb};
use camp_io::{read_image, write_image};
use camp_test::{RegParams, load_test_image, regout_dir};

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let pixs = load_test_image("bars.ppm").expect("load bars.ppm");
    rp.compare_values(12.0, pixs.width() as f64, 0.0);
    rp.compare_values(8.0, pixs.height() as f64, 0.0);
    rp.compare_values(4.0, pixs.colors().len() as f64, 0.0);
    assert_eq!(pixs.get_rgb(0, 0), Some(Rgb::WHITE));

    for ext in ["png", "ppm"] {
        let path = format!("{}/ioformats.{}", regout_dir(), ext);
        write_image(&pixs, &path).expect("write image");
        let back = read_image(&path).expect("re-read image");
        rp.compare_values(1.0, if back == pixs { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup(), "ioformats regression test failed");
}
