//! Binned statistics along one axis
//!
//! [`BinnedStatistic1D`] fixes sample positions at construction and then
//! reduces any number of value arrays against the cached bin assignment.
//! [`bin_1d`] is the one-shot variant returning weighted sums and counts.
//!
//! # Examples
//!
//! ```
//! use scatterkit_accum::{BinnedStatistic1D, Statistic};
//!
//! let x = [0.0, 0.5, 1.0, 1.5, 2.0];
//! let bs = BinnedStatistic1D::new(&x, 2, Statistic::Sum).unwrap();
//! assert_eq!(bs.edges(), &[0.0, 1.0, 2.0]);
//! assert_eq!(bs.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), vec![3.0, 12.0]);
//! ```

use crate::assignment::{BinAssignment, Normalization};
use crate::edges::{EdgeInclusion, bin_centers, bin_edges, bin_widths, validate_edges};
use crate::statistic::Statistic;
use crate::{AccumError, AccumResult};

/// Number of bins used when none is given
pub const DEFAULT_BINS: usize = 100;

/// How bins are specified
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// Number of equal-width bins over the range
    Count(usize),
    /// Explicit edges (at least two, non-decreasing)
    Edges(Vec<f64>),
}

impl Default for Bins {
    fn default() -> Self {
        Bins::Count(DEFAULT_BINS)
    }
}

impl From<usize> for Bins {
    fn from(n: usize) -> Self {
        Bins::Count(n)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(edges: Vec<f64>) -> Self {
        Bins::Edges(edges)
    }
}

impl From<&[f64]> for Bins {
    fn from(edges: &[f64]) -> Self {
        Bins::Edges(edges.to_vec())
    }
}

impl Bins {
    /// Resolve the bin edges
    ///
    /// For [`Bins::Count`] the range is `range` if given, else the finite
    /// extent of the data reported by `data_range`; a degenerate data
    /// extent is widened by 0.5 on each side. Explicit edges ignore both.
    pub(crate) fn resolve<F>(&self, range: Option<(f64, f64)>, data_range: F) -> AccumResult<Vec<f64>>
    where
        F: FnOnce() -> Option<(f64, f64)>,
    {
        match self {
            Bins::Edges(edges) => {
                validate_edges(edges)?;
                Ok(edges.clone())
            }
            Bins::Count(n) => {
                let (lo, hi) = match range {
                    Some(r) => r,
                    None => {
                        let (lo, hi) = data_range().ok_or_else(|| {
                            AccumError::config("cannot derive a bin range from data without finite values")
                        })?;
                        widen_degenerate(lo, hi)
                    }
                };
                bin_edges(Some(lo), Some(hi), Some(*n), None)
            }
        }
    }
}

/// Widen a zero-width data extent by 0.5 on each side
fn widen_degenerate(lo: f64, hi: f64) -> (f64, f64) {
    if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) }
}

/// Finite `(min, max)` of a slice, `None` if it has no finite values
pub(crate) fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Options for [`BinnedStatistic1D`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binned1dOptions {
    /// Explicit `(min_x, max_x)`; defaults to the data extent
    pub range: Option<(f64, f64)>,
    /// Edge inclusion rule
    pub inclusion: EdgeInclusion,
    /// Per-sample mask: zero excludes a sample, other values weight
    /// `mean`/`sum`
    pub mask: Option<Vec<f64>>,
}

impl Binned1dOptions {
    /// Set the binning range
    pub fn range(mut self, min_x: f64, max_x: f64) -> Self {
        self.range = Some((min_x, max_x));
        self
    }

    /// Set the edge inclusion rule
    pub fn inclusion(mut self, inclusion: EdgeInclusion) -> Self {
        self.inclusion = inclusion;
        self
    }

    /// Set the per-sample mask
    pub fn mask(mut self, mask: Vec<f64>) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Binned statistic over fixed 1D sample positions
#[derive(Debug, Clone)]
pub struct BinnedStatistic1D {
    statistic: Statistic,
    edges: Vec<f64>,
    inclusion: EdgeInclusion,
    weights: Option<Vec<f64>>,
    assignment: BinAssignment,
}

impl BinnedStatistic1D {
    /// Bin positions `x` with default options
    ///
    /// # Errors
    ///
    /// See [`BinnedStatistic1D::with_options`].
    pub fn new(x: &[f64], bins: impl Into<Bins>, statistic: Statistic) -> AccumResult<Self> {
        Self::with_options(x, bins, statistic, &Binned1dOptions::default())
    }

    /// Bin positions `x`
    ///
    /// # Errors
    ///
    /// - `AccumError::ShapeMismatch` if a mask is given whose length
    ///   differs from `x`
    /// - `AccumError::Configuration` for invalid bins or range, or if no
    ///   range is given and `x` has no finite values
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_accum::{Binned1dOptions, BinnedStatistic1D, Statistic};
    ///
    /// let opts = Binned1dOptions::default().range(0.0, 2.0).mask(vec![1.0, 0.0, 0.5]);
    /// let bs = BinnedStatistic1D::with_options(&[0.5, 0.5, 1.5], 2, Statistic::Sum, &opts).unwrap();
    /// assert_eq!(bs.compute(&[2.0, 100.0, 4.0]).unwrap(), vec![2.0, 2.0]);
    /// ```
    pub fn with_options(
        x: &[f64],
        bins: impl Into<Bins>,
        statistic: Statistic,
        options: &Binned1dOptions,
    ) -> AccumResult<Self> {
        if let Some(mask) = &options.mask {
            if mask.len() != x.len() {
                return Err(AccumError::ShapeMismatch {
                    expected: vec![x.len()],
                    actual: vec![mask.len()],
                });
            }
        }
        let edges = bins.into().resolve(options.range, || finite_extent(x))?;
        let mask = options.mask.clone();
        let assignment = BinAssignment::new(x, &edges, options.inclusion, |i| {
            mask.as_ref().is_none_or(|m| m[i] != 0.0)
        });

        log::trace!(
            "1D binning: {} samples into {} bins over [{}, {}], {} out of range or masked",
            x.len(),
            edges.len() - 1,
            edges[0],
            edges[edges.len() - 1],
            x.len() - assignment.n_assigned()
        );

        Ok(BinnedStatistic1D {
            statistic,
            edges,
            inclusion: options.inclusion,
            weights: mask,
            assignment,
        })
    }

    /// Reduce `values` (one per position) into per-bin statistics
    ///
    /// # Errors
    ///
    /// Returns `AccumError::ShapeMismatch` if `values` is not the same
    /// length as the positions.
    pub fn compute(&self, values: &[f64]) -> AccumResult<Vec<f64>> {
        self.compute_normalized(values, Normalization::None)
    }

    /// Reduce `values` and rescale the result
    ///
    /// # Errors
    ///
    /// Returns `AccumError::ShapeMismatch` if `values` is not the same
    /// length as the positions.
    pub fn compute_normalized(
        &self,
        values: &[f64],
        normalization: Normalization,
    ) -> AccumResult<Vec<f64>> {
        if values.len() != self.assignment.n_samples() {
            return Err(AccumError::ShapeMismatch {
                expected: vec![self.assignment.n_samples()],
                actual: vec![values.len()],
            });
        }
        let weights = self.applied_weights();
        let mut result = self.assignment.reduce(values, weights, &self.statistic);
        self.assignment
            .normalize(&mut result, &self.edges, normalization, weights);
        Ok(result)
    }

    fn applied_weights(&self) -> Option<&[f64]> {
        self.weights
            .as_deref()
            .filter(|_| self.statistic.accepts_weights())
    }

    /// Statistic applied per bin
    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    /// Bin edges, length `nbins() + 1`
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins
    pub fn nbins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Edge inclusion rule in use
    pub fn inclusion(&self) -> EdgeInclusion {
        self.inclusion
    }

    /// Midpoint of every bin
    pub fn bin_centers(&self) -> Vec<f64> {
        bin_centers(&self.edges)
    }

    /// Width of every bin
    pub fn bin_widths(&self) -> Vec<f64> {
        bin_widths(&self.edges)
    }

    /// Number of in-range samples per bin
    pub fn counts(&self) -> Vec<usize> {
        self.assignment.counts()
    }

    /// The cached sample-to-bin assignment
    pub fn assignment(&self) -> &BinAssignment {
        &self.assignment
    }
}

/// Result of [`bin_1d`]
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram1D {
    /// Bin edges, length `nbins + 1`
    pub edges: Vec<f64>,
    /// Sum of `y` in each bin
    pub sums: Vec<f64>,
    /// Number of samples in each bin
    pub counts: Vec<usize>,
}

/// Bin the values `y` by their positions `x`
///
/// One-shot histogram: `nx` equal-width bins (default [`DEFAULT_BINS`])
/// spanning `min_x..=max_x` (defaults: data extent), conventional
/// `[e_i, e_{i+1})` bins with the last bin closed. When both bounds come
/// from the data and the extent has zero width, it is widened by 0.5 on
/// each side, as in [`BinnedStatistic1D`].
///
/// # Errors
///
/// - `AccumError::ShapeMismatch` if `x` and `y` differ in length
/// - `AccumError::Configuration` for an invalid bin count or range
///
/// # Examples
///
/// ```
/// use scatterkit_accum::bin_1d;
///
/// let h = bin_1d(&[0.0, 1.0, 2.0, 3.0], &[1.0, 1.0, 2.0, 2.0], Some(2), None, None).unwrap();
/// assert_eq!(h.edges, vec![0.0, 1.5, 3.0]);
/// assert_eq!(h.sums, vec![2.0, 4.0]);
/// assert_eq!(h.counts, vec![2, 2]);
/// ```
pub fn bin_1d(
    x: &[f64],
    y: &[f64],
    nx: Option<usize>,
    min_x: Option<f64>,
    max_x: Option<f64>,
) -> AccumResult<Histogram1D> {
    if x.len() != y.len() {
        return Err(AccumError::ShapeMismatch {
            expected: vec![x.len()],
            actual: vec![y.len()],
        });
    }

    let extent = finite_extent(x);
    let lo = min_x.or(extent.map(|e| e.0));
    let hi = max_x.or(extent.map(|e| e.1));
    let (Some(lo), Some(hi)) = (lo, hi) else {
        return Err(AccumError::config(
            "cannot derive a bin range from data without finite values",
        ));
    };
    let (lo, hi) = if min_x.is_none() && max_x.is_none() {
        widen_degenerate(lo, hi)
    } else {
        (lo, hi)
    };
    let edges = bin_edges(Some(lo), Some(hi), Some(nx.unwrap_or(DEFAULT_BINS)), None)?;

    let nbins = edges.len() - 1;
    let mut sums = vec![0.0; nbins];
    let mut counts = vec![0usize; nbins];
    for (&xi, &yi) in x.iter().zip(y) {
        if let Some(b) = crate::edges::locate(xi, &edges, EdgeInclusion::Left) {
            sums[b] += yi;
            counts[b] += 1;
        }
    }

    Ok(Histogram1D {
        edges,
        sums,
        counts,
    })
}
