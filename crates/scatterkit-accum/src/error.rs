//! Error types for scatterkit-accum
//!
//! Every failure of the binning machinery is either a configuration error
//! (an invalid or ambiguous parameter combination, raised at construction)
//! or a shape error (data that does not fit the geometry fixed at
//! construction). Truncated bin edges are not an error.

use thiserror::Error;

/// Errors that can occur while building or evaluating binned statistics
#[derive(Debug, Error)]
pub enum AccumError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scatterkit_core::Error),

    /// Preprocessing error (pixel coordinate generation)
    #[error("preprocess error: {0}")]
    Preprocess(#[from] scatterkit_preprocess::PreprocessError),

    /// Invalid or ambiguous parameter combination
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Data length or shape disagrees with the fixed geometry
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Wrong number of dimensions
    #[error("expected a {expected}-D array, got {actual}-D")]
    Dimensionality { expected: usize, actual: usize },
}

impl AccumError {
    /// Whether this error reports an invalid parameter combination.
    pub fn is_configuration(&self) -> bool {
        match self {
            AccumError::Configuration(_) => true,
            AccumError::Core(e) => e.is_configuration(),
            AccumError::Preprocess(e) => e.is_configuration(),
            AccumError::ShapeMismatch { .. } | AccumError::Dimensionality { .. } => false,
        }
    }

    /// Whether this error reports an array shape that does not fit.
    pub fn is_shape(&self) -> bool {
        match self {
            AccumError::ShapeMismatch { .. } | AccumError::Dimensionality { .. } => true,
            AccumError::Core(e) => e.is_shape(),
            AccumError::Preprocess(e) => e.is_shape(),
            AccumError::Configuration(_) => false,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        AccumError::Configuration(msg.into())
    }
}

/// Result type for binning operations
pub type AccumResult<T> = Result<T, AccumError>;
