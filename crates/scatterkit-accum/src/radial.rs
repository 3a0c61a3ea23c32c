//! Radial binned statistics over detector frames
//!
//! [`RadialBinnedStatistic`] fixes an image shape and origin at
//! construction, computes the radius (and, when an angular restriction is
//! requested, the azimuth) of every pixel once, and caches the resulting
//! bin assignment. Every later [`compute`](RadialBinnedStatistic::compute)
//! call on a frame of that shape only gathers and reduces intensities.
//!
//! Pixel `(row, col)` lies at offset `dr = (row - origin.0) * pixel_size.0`,
//! `dc = (col - origin.1) * pixel_size.1`. Its radius is
//! `sqrt(dr² + dc²)` and its angle is `atan2(dr, dc)` in `[-π, π)`.

use crate::assignment::{BinAssignment, Normalization};
use crate::binned::{Bins, finite_extent};
use crate::edges::{EdgeInclusion, bin_centers};
use crate::statistic::Statistic;
use crate::{AccumError, AccumResult};
use scatterkit_core::{Frame, MdDict};
use scatterkit_preprocess::pixel_offsets;
use std::f64::consts::PI;

/// Options for [`RadialBinnedStatistic`]
///
/// # Examples
///
/// ```
/// use scatterkit_accum::RadialOptions;
///
/// let opts = RadialOptions::default().origin(0.0, 0.0).range(10.0, 90.0);
/// assert_eq!(opts.origin, Some((0.0, 0.0)));
/// assert_eq!(opts.pixel_size, (1.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RadialOptions {
    /// Origin `(row, col)` in pixels; defaults to the image center
    pub origin: Option<(f64, f64)>,
    /// Radial range `(min, max)`; defaults to the extent of all pixel radii
    pub range: Option<(f64, f64)>,
    /// Pixel mask: zero excludes a pixel, other values weight `mean`/`sum`
    pub mask: Option<Frame>,
    /// Keep only pixels with `lo <= angle <= hi` (radians); `lo > hi`
    /// selects the sector wrapping through ±π
    pub angle_range: Option<(f64, f64)>,
    /// Physical size of a pixel along `(row, col)`
    pub pixel_size: (f64, f64),
    /// Edge inclusion rule
    pub inclusion: EdgeInclusion,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            origin: None,
            range: None,
            mask: None,
            angle_range: None,
            pixel_size: (1.0, 1.0),
            inclusion: EdgeInclusion::Left,
        }
    }
}

impl RadialOptions {
    /// Options seeded from detector metadata
    ///
    /// Reads `calibrated_center` into the origin and `pixel_size` into the
    /// pixel size when present. Every other option keeps its default.
    ///
    /// # Errors
    ///
    /// Returns `AccumError::Configuration` if either key is present but is
    /// not a two-element numeric array.
    pub fn from_metadata(md: &MdDict) -> AccumResult<Self> {
        let mut opts = Self::default();
        if let Some(center) = read_pair(md, "calibrated_center")? {
            opts.origin = Some(center);
        }
        if let Some(size) = read_pair(md, "pixel_size")? {
            opts.pixel_size = size;
        }
        Ok(opts)
    }

    /// Set the origin `(row, col)`
    pub fn origin(mut self, row: f64, col: f64) -> Self {
        self.origin = Some((row, col));
        self
    }

    /// Set the radial range
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Set the pixel mask
    pub fn mask(mut self, mask: Frame) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Restrict to an angular sector (radians)
    pub fn angle_range(mut self, lo: f64, hi: f64) -> Self {
        self.angle_range = Some((lo, hi));
        self
    }

    /// Set the physical pixel size
    pub fn pixel_size(mut self, row: f64, col: f64) -> Self {
        self.pixel_size = (row, col);
        self
    }

    /// Set the edge inclusion rule
    pub fn inclusion(mut self, inclusion: EdgeInclusion) -> Self {
        self.inclusion = inclusion;
        self
    }
}

fn read_pair(md: &MdDict, key: &str) -> AccumResult<Option<(f64, f64)>> {
    match md.get(key) {
        None => Ok(None),
        Some(v) => v.value.as_pair().map(Some).ok_or_else(|| {
            AccumError::config(format!(
                "metadata key '{key}' must be a two-element array, got {v}"
            ))
        }),
    }
}

/// Azimuth of offset `(dr, dc)` in `[-π, π)`
fn azimuth(dr: f64, dc: f64) -> f64 {
    let phi = dr.atan2(dc);
    if phi >= PI { phi - 2.0 * PI } else { phi }
}

/// Whether `phi` lies in the sector `(lo, hi)`, wrapping through ±π when
/// `lo > hi`
fn in_sector(phi: f64, (lo, hi): (f64, f64)) -> bool {
    if lo < hi {
        (lo..=hi).contains(&phi)
    } else {
        phi >= lo || phi <= hi
    }
}

/// Radial binned statistic over frames of a fixed shape
#[derive(Debug, Clone)]
pub struct RadialBinnedStatistic {
    shape: (usize, usize),
    origin: (f64, f64),
    statistic: Statistic,
    edges: Vec<f64>,
    radii: Vec<f64>,
    angles: Option<Vec<f64>>,
    weights: Option<Vec<f64>>,
    assignment: BinAssignment,
}

impl RadialBinnedStatistic {
    /// Precompute the radial bin assignment for frames of `shape`
    ///
    /// # Errors
    ///
    /// - `AccumError::Dimensionality` if `shape` does not have two entries
    /// - a shape error if a dimension is 0 or the mask shape differs
    /// - `AccumError::Configuration` for invalid bins, range, angle range
    ///   or pixel size
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterkit_accum::{RadialBinnedStatistic, RadialOptions, Statistic};
    /// use scatterkit_core::Frame;
    ///
    /// let opts = RadialOptions::default().origin(0.0, 0.0).range(0.0, 2.0);
    /// let rbs = RadialBinnedStatistic::new(&[1, 3], 2, Statistic::Sum, opts).unwrap();
    /// let frame = Frame::from_data(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(rbs.compute(&frame).unwrap(), vec![1.0, 5.0]);
    /// ```
    pub fn new(
        shape: &[usize],
        bins: impl Into<Bins>,
        statistic: Statistic,
        options: RadialOptions,
    ) -> AccumResult<Self> {
        let &[rows, cols] = shape else {
            return Err(AccumError::Dimensionality {
                expected: 2,
                actual: shape.len(),
            });
        };

        let (ps_row, ps_col) = options.pixel_size;
        if !(ps_row.is_finite() && ps_row > 0.0 && ps_col.is_finite() && ps_col > 0.0) {
            return Err(AccumError::config(format!(
                "pixel size must be positive and finite, got ({ps_row}, {ps_col})"
            )));
        }
        if let Some((lo, hi)) = options.angle_range {
            if !(lo.is_finite() && hi.is_finite()) || lo == hi {
                return Err(AccumError::config(format!(
                    "angle range bounds must be finite and distinct, got ({lo}, {hi})"
                )));
            }
        }
        if let Some(mask) = &options.mask {
            if mask.shape() != (rows, cols) {
                return Err(AccumError::ShapeMismatch {
                    expected: vec![rows, cols],
                    actual: vec![mask.rows(), mask.cols()],
                });
            }
        }

        let origin = options
            .origin
            .unwrap_or(((rows as f64 - 1.0) / 2.0, (cols as f64 - 1.0) / 2.0));
        let (dr, dc) = pixel_offsets(rows, cols, origin)?;
        let (dr, dc): (Vec<f64>, Vec<f64>) = dr
            .into_iter()
            .zip(dc)
            .map(|(r, c)| (r * ps_row, c * ps_col))
            .unzip();

        let radii: Vec<f64> = dr
            .iter()
            .zip(&dc)
            .map(|(r, c)| (r * r + c * c).sqrt())
            .collect();
        let angles: Option<Vec<f64>> = options
            .angle_range
            .map(|_| dr.iter().zip(&dc).map(|(&r, &c)| azimuth(r, c)).collect());

        let edges = bins.into().resolve(options.range, || finite_extent(&radii))?;

        let mask = options.mask.map(Frame::into_data);
        let assignment = BinAssignment::new(&radii, &edges, options.inclusion, |i| {
            let unmasked = mask.as_ref().is_none_or(|m| m[i] != 0.0);
            let inside = match (&angles, options.angle_range) {
                (Some(phi), Some(sector)) => in_sector(phi[i], sector),
                _ => true,
            };
            unmasked && inside
        });

        log::debug!(
            "radial binning: {rows}x{cols} frame, origin ({}, {}), {} bins over [{}, {}], \
             {} of {} pixels assigned",
            origin.0,
            origin.1,
            edges.len() - 1,
            edges[0],
            edges[edges.len() - 1],
            assignment.n_assigned(),
            radii.len()
        );

        Ok(RadialBinnedStatistic {
            shape: (rows, cols),
            origin,
            statistic,
            edges,
            radii,
            angles,
            weights: mask,
            assignment,
        })
    }

    /// Reduce the pixels of `frame` into radial bins
    ///
    /// # Errors
    ///
    /// Returns `AccumError::ShapeMismatch` if `frame` does not have the
    /// constructed shape.
    pub fn compute(&self, frame: &Frame) -> AccumResult<Vec<f64>> {
        self.compute_with(frame, Normalization::None)
    }

    /// Reduce and divide each bin by its number of contributing pixels
    ///
    /// With a weighting mask the divisor is the per-bin mask total, so a
    /// `sum` normalizes to the weighted `mean`.
    ///
    /// # Errors
    ///
    /// Returns `AccumError::ShapeMismatch` if `frame` does not have the
    /// constructed shape.
    pub fn compute_normalized(&self, frame: &Frame) -> AccumResult<Vec<f64>> {
        self.compute_with(frame, Normalization::PixelCount)
    }

    /// Reduce and rescale according to `normalization`
    ///
    /// # Errors
    ///
    /// Returns `AccumError::ShapeMismatch` if `frame` does not have the
    /// constructed shape.
    pub fn compute_with(&self, frame: &Frame, normalization: Normalization) -> AccumResult<Vec<f64>> {
        if frame.shape() != self.shape {
            return Err(AccumError::ShapeMismatch {
                expected: vec![self.shape.0, self.shape.1],
                actual: vec![frame.rows(), frame.cols()],
            });
        }
        let weights = self
            .weights
            .as_deref()
            .filter(|_| self.statistic.accepts_weights());
        let mut result = self
            .assignment
            .reduce(frame.data(), weights, &self.statistic);
        self.assignment
            .normalize(&mut result, &self.edges, normalization, weights);
        Ok(result)
    }

    /// Frame shape `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Origin `(row, col)` in pixels
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Statistic applied per bin
    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    /// Radial bin edges
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of radial bins
    pub fn nbins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Midpoint of every radial bin
    pub fn bin_centers(&self) -> Vec<f64> {
        bin_centers(&self.edges)
    }

    /// Number of contributing pixels per bin
    pub fn counts(&self) -> Vec<usize> {
        self.assignment.counts()
    }

    /// Radius of every pixel, row-major
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Azimuth of every pixel, row-major; only kept for angular restrictions
    pub fn angles(&self) -> Option<&[f64]> {
        self.angles.as_deref()
    }

    /// The cached pixel-to-bin assignment
    pub fn assignment(&self) -> &BinAssignment {
        &self.assignment
    }
}
