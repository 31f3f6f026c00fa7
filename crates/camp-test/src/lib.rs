//! camp-test - Regression test framework for camp
//!
//! This crate provides a small regression test framework supporting two
//! modes:
//!
//! - **Compare**: Run the checks only
//! - **Display**: Also write intermediate images for visual inspection
//!
//! It also carries helpers for building synthetic test images.
//!
//! # Usage
//!
//! ```ignore
//! use camp_test::{RegParams, pix_from_art};
//!
//! let mut rp = RegParams::new("segmentize");
//! rp.compare_values(2.0, nsegments as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{art_color, pix_from_art, random_pix};
pub use params::{RegParams, RegTestMode};

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "bars.ppm")
pub fn load_test_image(name: &str) -> TestResult<camp_core::Pix> {
    let path = test_data_path(name);
    camp_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // camp-test is at crates/camp-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
