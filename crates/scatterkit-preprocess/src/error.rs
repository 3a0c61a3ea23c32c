//! Error types for scatterkit-preprocess

use thiserror::Error;

/// Errors that can occur during image preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scatterkit_core::Error),

    /// Invalid parameter combination
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Parallel inputs disagree in length or shape
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl PreprocessError {
    /// Whether this error reports an invalid parameter combination.
    pub fn is_configuration(&self) -> bool {
        match self {
            PreprocessError::Configuration(_) => true,
            PreprocessError::Core(e) => e.is_configuration(),
            PreprocessError::ShapeMismatch { .. } => false,
        }
    }

    /// Whether this error reports an array shape that does not fit.
    pub fn is_shape(&self) -> bool {
        match self {
            PreprocessError::ShapeMismatch { .. } => true,
            PreprocessError::Core(e) => e.is_shape(),
            PreprocessError::Configuration(_) => false,
        }
    }
}

/// Result type for preprocessing operations
pub type PreprocessResult<T> = Result<T, PreprocessError>;
