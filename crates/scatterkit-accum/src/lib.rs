//! scatterkit-accum - Binned statistics accumulators
//!
//! This crate maps scattered samples (pixel intensities at known
//! coordinates) into a fixed set of bins and reduces each bin with a
//! statistic:
//!
//! - Bin edge generation from three of (min, max, nbins, step)
//! - Named and custom per-bin statistics
//! - Linear binning of 1D positions ([`BinnedStatistic1D`], [`bin_1d`])
//! - Radial binning of detector frames ([`RadialBinnedStatistic`])
//!
//! Bin assignments are computed once at construction and reused for every
//! subsequent reduction against the same geometry.

pub mod assignment;
pub mod binned;
pub mod edges;
mod error;
pub mod radial;
pub mod statistic;

pub use error::{AccumError, AccumResult};

// Re-export commonly used items
pub use assignment::{BinAssignment, Normalization};
pub use binned::{Binned1dOptions, BinnedStatistic1D, Bins, DEFAULT_BINS, Histogram1D, bin_1d};
pub use edges::{
    BinGeometry, EdgeInclusion, MAX_BINS, TRUNCATION_TOLERANCE, bin_centers, bin_edges, bin_widths,
    locate,
};
pub use radial::{RadialBinnedStatistic, RadialOptions};
pub use statistic::{CustomStatistic, ReduceFn, Statistic};
