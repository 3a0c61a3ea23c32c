//! Bin edge generation and lookup
//!
//! Bin edges are an ordered array of length `nbins + 1`; edges `i` and
//! `i + 1` bound bin `i`. [`bin_edges`] builds them from exactly three of
//! `(range_min, range_max, nbins, step)`. [`locate`] maps a position onto
//! a bin according to an [`EdgeInclusion`] rule.
//!
//! # Examples
//!
//! ```
//! use scatterkit_accum::bin_edges;
//!
//! let edges = bin_edges(Some(0.0), Some(10.0), Some(5), None).unwrap();
//! assert_eq!(edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
//! ```

use crate::{AccumError, AccumResult};

/// Relative gap (in units of `step`) above which truncated edges are reported
pub const TRUNCATION_TOLERANCE: f64 = 1e-10;

/// Largest number of bins any geometry may produce
pub const MAX_BINS: usize = 1 << 24;

/// Which side of each bin interval is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeInclusion {
    /// `[e_i, e_{i+1})`, with the last bin closed on both sides
    /// (conventional histogram semantics)
    #[default]
    Left,
    /// `(e_i, e_{i+1}]`, with the first bin closed on both sides
    Right,
}

/// Generate bin edges from exactly three of the four parameters
///
/// - `(range_min, range_max, nbins)`: `nbins + 1` evenly spaced edges, both
///   ends included
/// - `(range_min, range_max, step)`: edges `range_min + i * step` for
///   `i in 0..=floor((range_max - range_min) / step)`; the last edge may
///   fall short of `range_max`, which is logged at debug level
/// - `(range_min, nbins, step)`: edges `range_min + i * step`
/// - `(range_max, nbins, step)`: edges `range_max - (nbins - i) * step`
///
/// # Errors
///
/// Returns `AccumError::Configuration` if the number of given parameters is
/// not three, `range_max <= range_min`, `nbins` is 0 or above
/// [`MAX_BINS`], `step` is not a positive finite number, or `step` exceeds
/// `range_max - range_min` or splits it into more than [`MAX_BINS`] bins.
pub fn bin_edges(
    range_min: Option<f64>,
    range_max: Option<f64>,
    nbins: Option<usize>,
    step: Option<f64>,
) -> AccumResult<Vec<f64>> {
    let num_valid = [
        range_min.is_some(),
        range_max.is_some(),
        nbins.is_some(),
        step.is_some(),
    ]
    .iter()
    .filter(|&&given| given)
    .count();
    if num_valid != 3 {
        return Err(AccumError::config(format!(
            "exactly three of range_min, range_max, nbins, step must be given, not {num_valid}"
        )));
    }

    for bound in [range_min, range_max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(AccumError::config(format!(
                "range bounds must be finite, got {bound}"
            )));
        }
    }
    if let (Some(lo), Some(hi)) = (range_min, range_max) {
        if hi <= lo {
            return Err(AccumError::config(format!(
                "the minimum must be less than the maximum (min {lo}, max {hi})"
            )));
        }
    }
    if nbins == Some(0) {
        return Err(AccumError::config("the number of bins must be positive"));
    }
    if let Some(n) = nbins.filter(|&n| n > MAX_BINS) {
        return Err(AccumError::config(format!(
            "{n} bins requested, at most {MAX_BINS} are supported"
        )));
    }
    if let Some(step) = step {
        if !(step.is_finite() && step > 0.0) {
            return Err(AccumError::config(format!(
                "the step must be positive and finite, got {step}"
            )));
        }
    }

    match (range_min, range_max, nbins, step) {
        (Some(lo), Some(hi), Some(n), None) => Ok(linspace(lo, hi, n)),
        (Some(lo), Some(hi), None, Some(step)) => stepped_edges(lo, hi, step),
        (Some(lo), None, Some(n), Some(step)) => {
            Ok((0..=n).map(|i| lo + i as f64 * step).collect())
        }
        (None, Some(hi), Some(n), Some(step)) => {
            Ok((0..=n).map(|i| hi - (n - i) as f64 * step).collect())
        }
        _ => unreachable!("exactly three parameters are present"),
    }
}

/// `n + 1` evenly spaced points from `lo` to `hi`, both included
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / n as f64;
    let mut edges: Vec<f64> = (0..=n).map(|i| i as f64 * step + lo).collect();
    edges[n] = hi;
    edges
}

fn stepped_edges(lo: f64, hi: f64, step: f64) -> AccumResult<Vec<f64>> {
    let span = hi - lo;
    if step > span {
        return Err(AccumError::config(format!(
            "the step ({step}) can not be greater than the difference between min and max ({span})"
        )));
    }

    let whole_steps = (span / step).floor();
    if whole_steps > MAX_BINS as f64 {
        return Err(AccumError::config(format!(
            "step {step} splits the range into {whole_steps} bins, at most {MAX_BINS} are supported"
        )));
    }
    let nbins = whole_steps as usize;
    let mut edges: Vec<f64> = (0..=nbins).map(|i| lo + i as f64 * step).collect();
    if edges.last().is_some_and(|&last| last > hi) {
        edges.pop();
        return Ok(edges);
    }

    if let Some(&last) = edges.last() {
        let gap = hi - last;
        if gap > TRUNCATION_TOLERANCE * step {
            log::debug!(
                "step does not evenly divide (range_max - range_min); bins truncated \
                 (min: {lo} max: {hi} step: {step} gap: {gap})"
            );
        }
    }
    Ok(edges)
}

/// Builder for [`bin_edges`]
///
/// # Examples
///
/// ```
/// use scatterkit_accum::BinGeometry;
///
/// let edges = BinGeometry::new().range_min(1.0).nbins(3).step(0.5).edges().unwrap();
/// assert_eq!(edges, vec![1.0, 1.5, 2.0, 2.5]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BinGeometry {
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub nbins: Option<usize>,
    pub step: Option<f64>,
}

impl BinGeometry {
    /// Create an empty geometry (no parameters set)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    pub fn range_min(mut self, value: f64) -> Self {
        self.range_min = Some(value);
        self
    }

    /// Set the upper bound
    pub fn range_max(mut self, value: f64) -> Self {
        self.range_max = Some(value);
        self
    }

    /// Set the number of bins
    pub fn nbins(mut self, value: usize) -> Self {
        self.nbins = Some(value);
        self
    }

    /// Set the bin width
    pub fn step(mut self, value: f64) -> Self {
        self.step = Some(value);
        self
    }

    /// Compute the edges
    ///
    /// # Errors
    ///
    /// See [`bin_edges`].
    pub fn edges(&self) -> AccumResult<Vec<f64>> {
        bin_edges(self.range_min, self.range_max, self.nbins, self.step)
    }
}

/// Midpoint of every bin
pub fn bin_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Width of every bin
pub fn bin_widths(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Check explicit edges: at least two, finite, non-decreasing
pub(crate) fn validate_edges(edges: &[f64]) -> AccumResult<()> {
    if edges.len() < 2 {
        return Err(AccumError::config(format!(
            "at least two bin edges are required, got {}",
            edges.len()
        )));
    }
    if edges.len() - 1 > MAX_BINS {
        return Err(AccumError::config(format!(
            "{} bins given, at most {MAX_BINS} are supported",
            edges.len() - 1
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(AccumError::config("bin edges must be finite"));
    }
    if edges.windows(2).any(|w| w[1] < w[0]) {
        return Err(AccumError::config(
            "bin edges must increase monotonically",
        ));
    }
    Ok(())
}

/// Find the bin containing `x`
///
/// Returns `None` for NaN or out-of-range positions. `edges` must be
/// valid (at least two, non-decreasing).
pub fn locate(x: f64, edges: &[f64], inclusion: EdgeInclusion) -> Option<usize> {
    let n = edges.len().checked_sub(1).filter(|&n| n > 0)?;
    let (first, last) = (edges[0], edges[n]);
    if x.is_nan() || x < first || x > last {
        return None;
    }

    match inclusion {
        EdgeInclusion::Left => {
            if x == last {
                return Some(n - 1);
            }
            Some(edges.partition_point(|&e| e <= x) - 1)
        }
        EdgeInclusion::Right => {
            if x == first {
                return Some(0);
            }
            Some(edges.partition_point(|&e| e < x) - 1)
        }
    }
}
