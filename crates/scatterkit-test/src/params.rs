//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use scatterkit_core::Frame;

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the index of the
/// current comparison, and every failure recorded so far. Comparisons
/// never panic; call [`RegParams::cleanup`] at the end of the test and
/// assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "radial")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Also installs the test logger so `log` records emitted by the code
    /// under test are visible with `RUST_LOG=debug cargo test -- --nocapture`.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();

        log::info!("////////////////   {}_reg   ///////////////", test_name);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values
    ///
    /// Two NaN values compare equal.
    ///
    /// # Returns
    ///
    /// `true` if values match within `delta`, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;

        if values_match(expected, actual, delta) {
            return true;
        }
        self.record(TestError::ValueMismatch {
            index: self.index,
            expected,
            actual,
            delta,
        });
        false
    }

    /// Compare a boolean outcome
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        let to_f = |b: bool| if b { 1.0 } else { 0.0 };
        self.compare_values(to_f(expected), to_f(actual), 0.0)
    }

    /// Compare two arrays element-wise
    ///
    /// Lengths must agree; elements must match within `delta`, and NaN
    /// matches NaN (empty bins are reported as NaN).
    pub fn compare_arrays(&mut self, expected: &[f64], actual: &[f64], delta: f64) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            self.record(TestError::ArrayMismatch {
                index: self.index,
                element: expected.len().min(actual.len()),
                message: format!(
                    "length mismatch: expected {}, got {}",
                    expected.len(),
                    actual.len()
                ),
            });
            return false;
        }

        for (i, (&e, &a)) in expected.iter().zip(actual).enumerate() {
            if !values_match(e, a, delta) {
                self.record(TestError::ArrayMismatch {
                    index: self.index,
                    element: i,
                    message: format!("expected {e}, got {a}, delta {delta}"),
                });
                return false;
            }
        }
        true
    }

    /// Compare two frames for equality within `delta`
    pub fn compare_frames(&mut self, expected: &Frame, actual: &Frame, delta: f64) -> bool {
        if expected.shape() != actual.shape() {
            self.index += 1;
            self.record(TestError::FrameMismatch {
                index: self.index,
                message: format!(
                    "shape mismatch: expected {:?}, got {:?}",
                    expected.shape(),
                    actual.shape()
                ),
            });
            return false;
        }
        self.compare_arrays(expected.data(), actual.data(), delta)
    }

    fn record(&mut self, err: TestError) {
        log::error!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
    }

    /// Whether every comparison so far succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Recorded failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }

    /// Finish the test, returning `Err` with the first failure if any
    pub fn finish(self) -> TestResult<()> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Finish the test and report overall success
    pub fn cleanup(self) -> bool {
        let success = self.is_success();
        if success {
            log::info!("SUCCESS: {}_reg", self.test_name);
        } else {
            log::error!(
                "FAILURE: {}_reg ({} failed comparisons)",
                self.test_name,
                self.failures.len()
            );
        }
        success
    }
}

fn values_match(expected: f64, actual: f64, delta: f64) -> bool {
    if expected.is_nan() || actual.is_nan() {
        return expected.is_nan() && actual.is_nan();
    }
    if expected == actual {
        return true;
    }
    (expected - actual).abs() <= delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 1);
    }

    #[test]
    fn test_compare_arrays_nan_aware() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_arrays(&[1.0, f64::NAN], &[1.0, f64::NAN], 0.0));
        assert!(!rp.compare_arrays(&[1.0, f64::NAN], &[1.0, 0.0], 0.0));
        assert!(!rp.compare_arrays(&[1.0], &[1.0, 2.0], 0.0));
        assert_eq!(rp.failures().len(), 2);
        assert!(rp.finish().is_err());
    }

    #[test]
    fn test_compare_frames() {
        let mut rp = RegParams::new("test");
        let a = Frame::new_with_value(2, 2, 1.0).unwrap();
        let b = Frame::new_with_value(2, 3, 1.0).unwrap();
        assert!(rp.compare_frames(&a, &a.clone(), 0.0));
        assert!(!rp.compare_frames(&a, &b, 0.0));
        assert!(!rp.cleanup());
    }
}
