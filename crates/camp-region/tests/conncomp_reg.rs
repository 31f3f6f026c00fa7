//! Connected component regression test
//!
//! Random connected blobs must come out as exactly one segment; blobs that
//! touch only at a corner are joined.
//!
//! Run with:
//! ```
//! cargo test -p camp-region --test conncomp_reg
//! ```

use camp_core::{Coord, Pix, Rgb};
use camp_region::{ColorIndex, Region, SegmentationOptions, extract_segments, segmentize};
use camp_test::{RegParams, pix_from_art};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Random walk of `steps` 8-neighbour moves inside a `w` x `h` grid.
fn random_blob(rng: &mut StdRng, w: u32, h: u32, steps: usize) -> HashSet<Coord> {
    let mut p = Coord::new(rng.random_range(0..w), rng.random_range(0..h));
    let mut blob = HashSet::from([p]);
    for _ in 0..steps {
        let dx = rng.random_range(-1..=1);
        let dy = rng.random_range(-1..=1);
        if let Some(n) = p.offset(dx, dy, w, h) {
            p = n;
            blob.insert(p);
        }
    }
    blob
}

fn paint(w: u32, h: u32, blob: &HashSet<Coord>, color: Rgb) -> Pix {
    let mut pm = Pix::new_filled(w, h, Rgb::WHITE).unwrap().to_mut();
    for c in blob {
        pm.set_rgb(c.x, c.y, color).unwrap();
    }
    pm.into()
}

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    // --- random walks are 8-connected by construction ---
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let blob = random_blob(&mut rng, 30, 20, 120);
        let pix = paint(30, 20, &blob, Rgb::BLACK);
        let arena = extract_segments(&ColorIndex::build(&pix), false).unwrap();
        let black: Vec<_> = arena.iter().filter(|s| s.rgb() == Rgb::BLACK).collect();
        rp.compare_values(1.0, black.len() as f64, 0.0);
        assert_eq!(black[0].pixels(), &blob);
    }

    // --- diagonal-only contact merges ---
    let pix = pix_from_art(&[
        "##....", //
        "##....", //
        "..##..", //
        "..##..", //
        "....##", //
    ]);
    let seg = segmentize(&pix, &SegmentationOptions::default()).unwrap();
    let black: Vec<_> = seg.segments().filter(|s| s.rgb() == Rgb::BLACK).collect();
    rp.compare_values(1.0, black.len() as f64, 0.0);
    rp.compare_values(10.0, black[0].pixel_count() as f64, 0.0);
    // White crosses the same diagonals, so it stays whole too
    let white = seg.segments().filter(|s| s.rgb() == Rgb::WHITE).count();
    rp.compare_values(1.0, white as f64, 0.0);

    // --- separate blobs of one color stay separate ---
    let pix = pix_from_art(&[
        "#.#", //
        "...", //
        "#.#", //
    ]);
    let seg = segmentize(&pix, &SegmentationOptions::default()).unwrap();
    let black = seg.segments().filter(|s| s.rgb() == Rgb::BLACK).count();
    rp.compare_values(4.0, black as f64, 0.0);
    // Seeds follow raster order
    let first = seg.segments().next().unwrap();
    assert!(first.pixels().contains(&Coord::new(0, 0)));

    // --- a large uniform region ---
    let pix = Pix::new_filled(300, 200, Rgb::new(10, 20, 30)).unwrap();
    let seg = segmentize(&pix, &SegmentationOptions::default()).unwrap();
    rp.compare_values(1.0, seg.len() as f64, 0.0);
    rp.compare_values(60000.0, seg.arena().total_pixels() as f64, 0.0);

    assert!(rp.cleanup(), "conncomp regression test failed");
}
