//! Cached sample-to-bin assignment and per-bin reduction
//!
//! A [`BinAssignment`] is computed once from fixed sample positions and
//! then reused for any number of value arrays. Samples are grouped by bin
//! in a compressed layout (`offsets` into `members`), keeping ascending
//! sample order inside each bin so that sums accumulate in the same order
//! as a plain histogram over the flattened data.

use crate::edges::{EdgeInclusion, bin_widths, locate};
use crate::statistic::Statistic;

/// How a per-bin result is rescaled after reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw statistic
    #[default]
    None,
    /// Divide by the width of each bin
    BinWidth,
    /// Divide by the number of samples contributing to each bin
    PixelCount,
}

/// Mapping from sample index to bin index
#[derive(Debug, Clone, PartialEq)]
pub struct BinAssignment {
    /// Bin of each sample, `None` when out of range or excluded
    bin_of: Vec<Option<u32>>,
    /// Start of each bin's run in `members`; length `nbins + 1`
    offsets: Vec<usize>,
    /// Sample indices grouped by bin
    members: Vec<usize>,
}

impl BinAssignment {
    /// Assign every sample position to a bin
    ///
    /// Samples for which `include` returns false are excluded permanently.
    pub fn new<F>(positions: &[f64], edges: &[f64], inclusion: EdgeInclusion, include: F) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let nbins = edges.len().saturating_sub(1);
        let bin_of: Vec<Option<u32>> = positions
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                if !include(i) {
                    return None;
                }
                locate(x, edges, inclusion).and_then(|b| u32::try_from(b).ok())
            })
            .collect();

        let mut offsets = vec![0usize; nbins + 1];
        for b in bin_of.iter().flatten() {
            offsets[*b as usize + 1] += 1;
        }
        for i in 0..nbins {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut members = vec![0usize; offsets[nbins]];
        for (sample, b) in bin_of.iter().enumerate() {
            if let Some(b) = *b {
                let slot = &mut cursor[b as usize];
                members[*slot] = sample;
                *slot += 1;
            }
        }

        BinAssignment {
            bin_of,
            offsets,
            members,
        }
    }

    /// Number of samples the assignment was built for
    pub fn n_samples(&self) -> usize {
        self.bin_of.len()
    }

    /// Number of bins
    pub fn nbins(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of samples that landed in some bin
    pub fn n_assigned(&self) -> usize {
        self.members.len()
    }

    /// Bin of sample `index`, `None` if out of range or excluded
    pub fn bin_of(&self, index: usize) -> Option<usize> {
        self.bin_of.get(index).copied().flatten().map(|b| b as usize)
    }

    /// Sample indices in bin `bin`, in ascending order
    ///
    /// # Panics
    ///
    /// Panics if `bin >= nbins()`.
    pub fn members(&self, bin: usize) -> &[usize] {
        &self.members[self.offsets[bin]..self.offsets[bin + 1]]
    }

    /// Number of samples in every bin
    pub fn counts(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Reduce `values` bin by bin
    ///
    /// `values` (and `weights`, if given) must have `n_samples()` elements;
    /// callers check this. Weights only affect statistics that
    /// [accept weights](Statistic::accepts_weights).
    pub fn reduce(&self, values: &[f64], weights: Option<&[f64]>, statistic: &Statistic) -> Vec<f64> {
        debug_assert_eq!(values.len(), self.n_samples());
        let weights = weights.filter(|_| statistic.accepts_weights());
        let mut scratch = Vec::new();

        (0..self.nbins())
            .map(|bin| {
                let members = self.members(bin);
                match (statistic, weights) {
                    (Statistic::Count, _) => members.len() as f64,
                    (Statistic::Sum, None) => members.iter().map(|&i| values[i]).sum(),
                    (Statistic::Sum, Some(w)) => members.iter().map(|&i| w[i] * values[i]).sum(),
                    (Statistic::Mean, None) => {
                        if members.is_empty() {
                            return f64::NAN;
                        }
                        let total: f64 = members.iter().map(|&i| values[i]).sum();
                        total / members.len() as f64
                    }
                    (Statistic::Mean, Some(w)) => {
                        let total: f64 = members.iter().map(|&i| w[i] * values[i]).sum();
                        let weight: f64 = members.iter().map(|&i| w[i]).sum();
                        total / weight
                    }
                    (stat, _) => {
                        scratch.clear();
                        scratch.extend(members.iter().map(|&i| values[i]));
                        stat.apply(&scratch)
                    }
                }
            })
            .collect()
    }

    /// Sum of `weights` over the members of every bin
    pub fn weight_totals(&self, weights: &[f64]) -> Vec<f64> {
        (0..self.nbins())
            .map(|bin| self.members(bin).iter().map(|&i| weights[i]).sum())
            .collect()
    }

    /// Rescale reduced values according to `normalization`
    ///
    /// `weights` are the per-sample weights the reduction applied, if any.
    /// With weights, [`Normalization::PixelCount`] divides by the per-bin
    /// weight total, so a weighted sum normalizes to the weighted mean.
    pub fn normalize(
        &self,
        result: &mut [f64],
        edges: &[f64],
        normalization: Normalization,
        weights: Option<&[f64]>,
    ) {
        let divisors: Vec<f64> = match (normalization, weights) {
            (Normalization::None, _) => return,
            (Normalization::BinWidth, _) => bin_widths(edges),
            (Normalization::PixelCount, Some(w)) => self.weight_totals(w),
            (Normalization::PixelCount, None) => {
                self.counts().into_iter().map(|n| n as f64).collect()
            }
        };
        for (v, d) in result.iter_mut().zip(divisors) {
            *v /= d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> BinAssignment {
        // bins [0,1) [1,2) [2,3]
        let positions = [0.5, 2.5, 1.0, 3.0, -1.0, 0.1, f64::NAN];
        BinAssignment::new(&positions, &[0.0, 1.0, 2.0, 3.0], EdgeInclusion::Left, |_| true)
    }

    #[test]
    fn test_grouping() {
        let a = simple();
        assert_eq!(a.n_samples(), 7);
        assert_eq!(a.nbins(), 3);
        assert_eq!(a.counts(), vec![2, 1, 2]);
        assert_eq!(a.members(0), &[0, 5]);
        assert_eq!(a.members(1), &[2]);
        assert_eq!(a.members(2), &[1, 3]);
        assert_eq!(a.bin_of(4), None);
        assert_eq!(a.bin_of(6), None);
        assert_eq!(a.n_assigned(), 5);
    }

    #[test]
    fn test_exclusion() {
        let positions = [0.5, 0.6, 0.7];
        let a = BinAssignment::new(&positions, &[0.0, 1.0], EdgeInclusion::Left, |i| i != 1);
        assert_eq!(a.members(0), &[0, 2]);
        assert_eq!(a.bin_of(1), None);
    }

    #[test]
    fn test_reduce_statistics() {
        let a = simple();
        let values = [1.0, 2.0, 3.0, 4.0, 100.0, 5.0, 100.0];
        assert_eq!(a.reduce(&values, None, &Statistic::Sum), vec![6.0, 3.0, 6.0]);
        assert_eq!(a.reduce(&values, None, &Statistic::Count), vec![2.0, 1.0, 2.0]);
        assert_eq!(a.reduce(&values, None, &Statistic::Mean), vec![3.0, 3.0, 3.0]);
        assert_eq!(a.reduce(&values, None, &Statistic::Median), vec![3.0, 3.0, 3.0]);
        assert_eq!(a.reduce(&values, None, &Statistic::Std), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_reduce_empty_bin() {
        let a = BinAssignment::new(&[0.5], &[0.0, 1.0, 2.0], EdgeInclusion::Left, |_| true);
        let mean = a.reduce(&[4.0], None, &Statistic::Mean);
        assert_eq!(mean[0], 4.0);
        assert!(mean[1].is_nan());
        assert_eq!(a.reduce(&[4.0], None, &Statistic::Sum), vec![4.0, 0.0]);
    }

    #[test]
    fn test_weights_only_for_mean_and_sum() {
        let a = BinAssignment::new(&[0.5, 0.5], &[0.0, 1.0], EdgeInclusion::Left, |_| true);
        let values = [2.0, 4.0];
        let weights = [0.5, 1.0];
        assert_eq!(a.reduce(&values, Some(&weights), &Statistic::Sum), vec![5.0]);
        let mean = a.reduce(&values, Some(&weights), &Statistic::Mean)[0];
        assert!((mean - 5.0 / 1.5).abs() < 1e-15);
        assert_eq!(a.reduce(&values, Some(&weights), &Statistic::Median), vec![3.0]);
    }

    #[test]
    fn test_normalize() {
        let a = simple();
        let edges = [0.0, 1.0, 2.0, 4.0];
        let mut r = vec![6.0, 3.0, 6.0];
        a.normalize(&mut r, &edges, Normalization::BinWidth, None);
        assert_eq!(r, vec![6.0, 3.0, 3.0]);

        let mut r = vec![6.0, 3.0, 6.0];
        a.normalize(&mut r, &edges, Normalization::PixelCount, None);
        assert_eq!(r, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_weighted_pixel_count_gives_weighted_mean() {
        let a = BinAssignment::new(&[0.5, 0.5], &[0.0, 1.0], EdgeInclusion::Left, |_| true);
        let values = [2.0, 4.0];
        let weights = [0.5, 0.5];
        assert_eq!(a.weight_totals(&weights), vec![1.0]);

        let mut sum = a.reduce(&values, Some(&weights), &Statistic::Sum);
        a.normalize(&mut sum, &[0.0, 1.0], Normalization::PixelCount, Some(&weights));
        let mean = a.reduce(&values, Some(&weights), &Statistic::Mean);
        assert_eq!(sum, vec![3.0]);
        assert_eq!(sum, mean);
    }
}
