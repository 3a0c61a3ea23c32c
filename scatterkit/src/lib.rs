//! scatterkit - Data reduction for 2D X-ray scattering detectors
//!
//! # Overview
//!
//! scatterkit reduces detector frames to one-dimensional profiles:
//!
//! - Detector frames and nested metadata with physical units
//! - Reference (dark / background) subtraction
//! - Pixel to coordinate conversion
//! - Binned statistics along a linear axis or by distance from an origin
//!
//! # Example
//!
//! ```
//! use scatterkit::Frame;
//! use scatterkit::accum::{RadialBinnedStatistic, RadialOptions, Statistic};
//!
//! // Azimuthally averaged profile of a flat 64x64 frame
//! let frame = Frame::new_with_value(64, 64, 2.0).unwrap();
//! let rbs = RadialBinnedStatistic::new(&[64, 64], 20, Statistic::Mean, RadialOptions::default())
//!     .unwrap();
//! let profile = rbs.compute(&frame).unwrap();
//! assert_eq!(profile.len(), 20);
//! assert!(profile.iter().all(|&v| v == 2.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scatterkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use scatterkit_accum as accum;
pub use scatterkit_preprocess as preprocess;
