//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Array comparison failed
    #[error("array comparison failed at index {index}, element {element}: {message}")]
    ArrayMismatch {
        index: usize,
        element: usize,
        message: String,
    },

    /// Frame comparison failed
    #[error("frame comparison failed at index {index}: {message}")]
    FrameMismatch { index: usize, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
