//! Detector pixel to coordinate conversion
//!
//! Pixel `(row, col)` maps to `x = row - center.0`, `y = col - center.1`.
//! All outputs are flattened in row-major order, so element `i` of every
//! returned array refers to the same pixel as `frame.data()[i]`.

use crate::{PreprocessError, PreprocessResult};
use scatterkit_core::Frame;

/// Flattened per-pixel coordinates and intensities of a frame
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCoordinates {
    /// Row offset of each pixel from the center
    pub x: Vec<f64>,
    /// Column offset of each pixel from the center
    pub y: Vec<f64>,
    /// Intensity of each pixel
    pub intensity: Vec<f64>,
}

impl PixelCoordinates {
    /// Number of pixels
    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    /// Whether there are no pixels
    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }
}

/// Per-pixel coordinate offsets for an image shape
///
/// Returns `(x, y)`, each of length `rows * cols` in row-major order.
///
/// # Errors
///
/// Returns `PreprocessError::ShapeMismatch` if either dimension is 0.
///
/// # Examples
///
/// ```
/// use scatterkit_preprocess::pixel_offsets;
///
/// let (x, y) = pixel_offsets(2, 3, (1.0, 1.0)).unwrap();
/// assert_eq!(x, vec![-1.0, -1.0, -1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(y, vec![-1.0, 0.0, 1.0, -1.0, 0.0, 1.0]);
/// ```
pub fn pixel_offsets(
    rows: usize,
    cols: usize,
    center: (f64, f64),
) -> PreprocessResult<(Vec<f64>, Vec<f64>)> {
    if rows == 0 || cols == 0 {
        return Err(PreprocessError::ShapeMismatch {
            expected: vec![1, 1],
            actual: vec![rows, cols],
        });
    }

    let n = rows * cols;
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for r in 0..rows {
        let dx = r as f64 - center.0;
        for c in 0..cols {
            x.push(dx);
            y.push(c as f64 - center.1);
        }
    }
    Ok((x, y))
}

/// Convert a 2D frame into flattened `(x, y, intensity)` arrays
///
/// # Examples
///
/// ```
/// use scatterkit_core::Frame;
/// use scatterkit_preprocess::pixel_to_coordinates;
///
/// let frame = Frame::from_fn(2, 2, |r, c| (10 * r + c) as f64).unwrap();
/// let coords = pixel_to_coordinates(&frame, (0.5, 0.5)).unwrap();
/// assert_eq!(coords.x, vec![-0.5, -0.5, 0.5, 0.5]);
/// assert_eq!(coords.intensity, vec![0.0, 1.0, 10.0, 11.0]);
/// ```
pub fn pixel_to_coordinates(
    frame: &Frame,
    center: (f64, f64),
) -> PreprocessResult<PixelCoordinates> {
    let (x, y) = pixel_offsets(frame.rows(), frame.cols(), center)?;
    Ok(PixelCoordinates {
        x,
        y,
        intensity: frame.data().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_row_major() {
        let (x, y) = pixel_offsets(3, 2, (0.0, 0.0)).unwrap();
        assert_eq!(x, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(y, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_offsets_zero_shape() {
        assert!(pixel_offsets(0, 3, (0.0, 0.0)).unwrap_err().is_shape());
    }

    #[test]
    fn test_coordinates_match_flattened_intensity() {
        let frame = Frame::from_fn(4, 5, |r, c| (r * 5 + c) as f64).unwrap();
        let coords = pixel_to_coordinates(&frame, (2.0, 1.0)).unwrap();
        assert_eq!(coords.len(), 20);
        for i in 0..coords.len() {
            let row = coords.x[i] + 2.0;
            let col = coords.y[i] + 1.0;
            assert_eq!(coords.intensity[i], row * 5.0 + col);
        }
    }
}
