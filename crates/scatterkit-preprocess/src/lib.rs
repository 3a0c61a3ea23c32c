//! scatterkit-preprocess - Detector image preprocessing
//!
//! Stateless helpers that prepare detector frames for binning:
//!
//! - Reference subtraction (background / dark current correction)
//! - Pixel to coordinate conversion (row-major flattened offsets)

pub mod coordinates;
mod error;
pub mod reference;

pub use coordinates::{PixelCoordinates, pixel_offsets, pixel_to_coordinates};
pub use error::{PreprocessError, PreprocessResult};
pub use reference::subtract_reference;
