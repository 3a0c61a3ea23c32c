//! Error types for scatterkit-core
//!
//! Provides a unified error type for the core data structures. Domain
//! crates wrap this type in their own error enums, so every variant
//! carries enough context to be reported without the caller knowing
//! which crate raised it.
//!
//! Two broad kinds of failure are distinguished:
//!
//! - configuration errors: an invalid or ambiguous parameter combination
//! - shape errors: an array whose shape does not match a previously fixed
//!   geometry

use thiserror::Error;

/// scatterkit core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid frame dimensions
    #[error("invalid frame dimensions: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two frames (or a frame and a shape) disagree
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Invalid or ambiguous parameter combination
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A metadata path tried to descend through a leaf value
    #[error("metadata key '{0}' is a leaf and cannot be used as a branch")]
    LeafAsBranch(String),

    /// A metadata path does not exist
    #[error("metadata key not found: {0}")]
    KeyNotFound(String),

    /// Attempt to mutate an immutable container
    #[error("cannot modify immutable {0}")]
    Immutable(&'static str),
}

impl Error {
    /// Build a shape mismatch error from two shapes.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Whether this error reports an invalid parameter combination.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Whether this error reports an array shape that does not fit.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Error::ShapeMismatch { .. } | Error::InvalidDimension { .. }
        )
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
