//! Per-bin reduction functions
//!
//! A [`Statistic`] reduces the values that fall into one bin to a single
//! number. The named statistics are closed variants; any other reduction
//! is wrapped in [`Statistic::Custom`].
//!
//! Empty bins never fail: `sum` and `count` give 0, `mean`, `median` and
//! `std` give NaN, and a custom statistic is evaluated on the empty slice.

use crate::{AccumError, AccumResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shared custom reduction function
pub type ReduceFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A named, user-supplied reduction
#[derive(Clone)]
pub struct CustomStatistic {
    name: String,
    func: Arc<ReduceFn>,
}

impl CustomStatistic {
    /// Name given at construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the reduction
    pub fn call(&self, values: &[f64]) -> f64 {
        (self.func)(values)
    }
}

impl fmt::Debug for CustomStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomStatistic")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Reduction applied to the values of each bin
#[derive(Debug, Clone, Default)]
pub enum Statistic {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Median (mean of the two middle values for even counts)
    Median,
    /// Number of values; the values themselves are ignored
    Count,
    /// Sum of values
    Sum,
    /// Population standard deviation
    Std,
    /// User-supplied reduction
    Custom(CustomStatistic),
}

impl Statistic {
    /// Every statistic that can be selected by name
    pub const NAMED: [Statistic; 5] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Count,
        Statistic::Sum,
        Statistic::Std,
    ];

    /// Wrap a reduction function
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_accum::Statistic;
    ///
    /// let max = Statistic::custom("max", |v| v.iter().copied().fold(f64::NAN, f64::max));
    /// assert_eq!(max.apply(&[1.0, 3.0, 2.0]), 3.0);
    /// assert_eq!(max.name(), "max");
    /// ```
    pub fn custom<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Statistic::Custom(CustomStatistic {
            name: name.to_string(),
            func: Arc::new(func),
        })
    }

    /// Identifier of the statistic
    pub fn name(&self) -> &str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Count => "count",
            Statistic::Sum => "sum",
            Statistic::Std => "std",
            Statistic::Custom(c) => c.name(),
        }
    }

    /// Whether a non-binary mask acts as per-sample weights
    ///
    /// Only `mean` and `sum` use weights; the others treat a mask as
    /// inclusion only.
    pub fn accepts_weights(&self) -> bool {
        matches!(self, Statistic::Mean | Statistic::Sum)
    }

    /// Apply the statistic to the values of one bin
    pub fn apply(&self, values: &[f64]) -> f64 {
        match self {
            Statistic::Mean => mean(values),
            Statistic::Median => median(values),
            Statistic::Count => values.len() as f64,
            Statistic::Sum => values.iter().sum(),
            Statistic::Std => std_dev(values),
            Statistic::Custom(c) => c.call(values),
        }
    }

    /// Value reported for a bin without samples
    pub fn empty_value(&self) -> f64 {
        self.apply(&[])
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = AccumError;

    /// Parse one of `mean`, `median`, `count`, `sum`, `std`
    fn from_str(s: &str) -> AccumResult<Self> {
        match s {
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "count" => Ok(Statistic::Count),
            "sum" => Ok(Statistic::Sum),
            "std" => Ok(Statistic::Std),
            other => Err(AccumError::config(format!(
                "statistic '{other}' not understood; expected one of mean, median, count, sum, std"
            ))),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        0.5 * (sorted[mid - 1] + sorted[mid])
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_statistics() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(Statistic::Mean.apply(&v), 2.5);
        assert_eq!(Statistic::Median.apply(&v), 2.5);
        assert_eq!(Statistic::Median.apply(&[5.0, 1.0, 3.0]), 3.0);
        assert_eq!(Statistic::Count.apply(&v), 4.0);
        assert_eq!(Statistic::Sum.apply(&v), 10.0);
        assert!((Statistic::Std.apply(&v) - 1.25f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_empty_bins() {
        assert_eq!(Statistic::Sum.empty_value(), 0.0);
        assert_eq!(Statistic::Count.empty_value(), 0.0);
        assert!(Statistic::Mean.empty_value().is_nan());
        assert!(Statistic::Median.empty_value().is_nan());
        assert!(Statistic::Std.empty_value().is_nan());
        let len = Statistic::custom("len", |v| v.len() as f64);
        assert_eq!(len.empty_value(), 0.0);
    }

    #[test]
    fn test_parse() {
        for stat in Statistic::NAMED {
            let parsed: Statistic = stat.name().parse().unwrap();
            assert_eq!(parsed.name(), stat.name());
        }
        let err = "mode".parse::<Statistic>().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_median_with_nan() {
        assert!(Statistic::Median.apply(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_custom_debug_and_weights() {
        let stat = Statistic::custom("first", |v| v.first().copied().unwrap_or(f64::NAN));
        assert!(format!("{stat:?}").contains("first"));
        assert!(!stat.accepts_weights());
        assert!(Statistic::Sum.accepts_weights());
        assert!(!Statistic::Median.accepts_weights());
    }
}
