//! Frame - Double-precision detector image
//!
//! `Frame` is a 2D array of `f64` values holding one detector readout
//! (or a mask with the same geometry). Shapes are expressed as
//! `(rows, cols)` to match the way detector geometry is usually
//! described.
//!
//! # Examples
//!
//! ```
//! use scatterkit_core::Frame;
//!
//! // Create a 90x102 frame
//! let mut frame = Frame::new(90, 102).unwrap();
//!
//! // Set and get pixel values
//! frame.set(10, 20, 0.5).unwrap();
//! assert_eq!(frame.get(10, 20).unwrap(), 0.5);
//! assert_eq!(frame.shape(), (90, 102));
//! ```

use crate::error::{Error, Result};

/// Double-precision detector image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at
/// `(row, col)` is at index `row * cols + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// Pixel data (row-major, no padding)
    data: Vec<f64>,
}

impl Frame {
    /// Create a new Frame with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if rows or cols is 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::new_with_value(rows, cols, 0.0)
    }

    /// Create a new Frame with all pixels set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if rows or cols is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_core::Frame;
    ///
    /// let mask = Frame::new_with_value(4, 4, 1.0).unwrap();
    /// assert_eq!(mask.sum(), 16.0);
    /// ```
    pub fn new_with_value(rows: usize, cols: usize, value: f64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }

        Ok(Frame {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Create a Frame from row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for a zero-sized shape and
    /// `Error::ShapeMismatch` if the data length is not `rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(Error::shape_mismatch(&[rows * cols], &[data.len()]));
        }

        Ok(Frame { rows, cols, data })
    }

    /// Create a Frame by evaluating `f(row, col)` at every pixel
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_core::Frame;
    ///
    /// let ramp = Frame::from_fn(2, 3, |r, c| (r * 3 + c) as f64).unwrap();
    /// assert_eq!(ramp.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut frame = Self::new(rows, cols)?;
        for r in 0..rows {
            for c in 0..cols {
                frame.data[r * cols + c] = f(r, c);
            }
        }
        Ok(frame)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a valid frame; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.checked_index(row, col)?;
        Ok(self.data[idx])
    }

    /// Set the pixel value at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.checked_index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: row * self.cols + col,
                len: self.data.len(),
            });
        }
        Ok(row * self.cols + col)
    }

    /// Raw read-only access to the row-major data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Raw mutable access to the row-major data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the frame and return its row-major data
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Get one row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Check that `other` has the same shape as this frame
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the shapes differ.
    pub fn check_same_shape(&self, other: &Frame) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::shape_mismatch(
                &[self.rows, self.cols],
                &[other.rows, other.cols],
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    fn zip_with(&self, other: &Frame, op: impl Fn(f64, f64) -> f64) -> Result<Frame> {
        self.check_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Frame {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Add two frames element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn add(&self, other: &Frame) -> Result<Frame> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtract `other` from this frame element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn sub(&self, other: &Frame) -> Result<Frame> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply two frames element-wise (e.g. applying a weight mask)
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn mul(&self, other: &Frame) -> Result<Frame> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Multiply all pixels by a constant, returning a new frame
    pub fn scale(&self, factor: f64) -> Frame {
        let mut result = self.clone();
        for v in &mut result.data {
            *v *= factor;
        }
        result
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Sum of all pixel values
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean pixel value
    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// Minimum pixel value and its `(row, col)` location
    ///
    /// NaN pixels are skipped; returns `None` if every pixel is NaN.
    pub fn min(&self) -> Option<(f64, usize, usize)> {
        self.extreme(|candidate, best| candidate < best)
    }

    /// Maximum pixel value and its `(row, col)` location
    ///
    /// NaN pixels are skipped; returns `None` if every pixel is NaN.
    pub fn max(&self) -> Option<(f64, usize, usize)> {
        self.extreme(|candidate, best| candidate > best)
    }

    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> Option<(f64, usize, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((b, _)) if !better(v, b) => {}
                _ => best = Some((v, idx)),
            }
        }
        best.map(|(v, idx)| (v, idx / self.cols, idx % self.cols))
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl std::ops::Add for &Frame {
    type Output = Result<Frame>;

    fn add(self, rhs: Self) -> Self::Output {
        Frame::add(self, rhs)
    }
}

impl std::ops::Sub for &Frame {
    type Output = Result<Frame>;

    fn sub(self, rhs: Self) -> Self::Output {
        Frame::sub(self, rhs)
    }
}

impl std::ops::Mul for &Frame {
    type Output = Result<Frame>;

    fn mul(self, rhs: Self) -> Self::Output {
        Frame::mul(self, rhs)
    }
}

// ============================================================================
// Tests
// ============================================================================
