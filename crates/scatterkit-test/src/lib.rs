//! scatterkit-test - Regression test framework for scatterkit
//!
//! Every crate's `tests/*_reg.rs` suite drives its comparisons through
//! [`RegParams`], which records failures instead of panicking so that a
//! single run reports every mismatching value.
//!
//! # Usage
//!
//! ```ignore
//! use scatterkit_test::RegParams;
//!
//! let mut rp = RegParams::new("radial");
//! rp.compare_values(100.0, binned.len() as f64, 0.0);
//! rp.compare_arrays(&reference, &binned, 1e-12);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter for the test logger (e.g. `debug`)

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Install the test logger once per process
///
/// Safe to call repeatedly; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic pseudo-random binary mask value for pixel `index`
///
/// Tests use this in place of a random generator so that masked
/// reference values are reproducible.
pub fn pseudo_random_bit(index: usize, seed: u64) -> f64 {
    let mut x = (index as u64)
        .wrapping_add(seed)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 31;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 29;
    (x & 1) as f64
}
