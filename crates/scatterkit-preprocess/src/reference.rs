//! Reference (background / dark-current) subtraction
//!
//! A measurement series interleaves reference frames with measured
//! frames. Each measured frame is corrected by subtracting the nearest
//! reference frame that precedes it in the series.

use crate::{PreprocessError, PreprocessResult};
use scatterkit_core::Frame;

/// Subtract the nearest preceding reference frame from every measured frame
///
/// # Arguments
///
/// * `images` - Ordered series of frames
/// * `is_reference` - Parallel flags; `true` marks a reference frame
///
/// # Returns
///
/// The corrected measured frames in series order. The output length is
/// `images.len()` minus the number of reference frames.
///
/// # Errors
///
/// - `PreprocessError::Configuration` if the series is empty or the first
///   frame is not a reference frame
/// - `PreprocessError::ShapeMismatch` if `images` and `is_reference`
///   differ in length, or a frame's shape differs from its reference
///
/// # Examples
///
/// ```
/// use scatterkit_core::Frame;
/// use scatterkit_preprocess::subtract_reference;
///
/// let dark = Frame::new_with_value(2, 2, 1.0).unwrap();
/// let shot = Frame::new_with_value(2, 2, 5.0).unwrap();
/// let corrected = subtract_reference(&[dark, shot], &[true, false]).unwrap();
/// assert_eq!(corrected.len(), 1);
/// assert_eq!(corrected[0].data(), &[4.0; 4]);
/// ```
pub fn subtract_reference(images: &[Frame], is_reference: &[bool]) -> PreprocessResult<Vec<Frame>> {
    if images.len() != is_reference.len() {
        return Err(PreprocessError::ShapeMismatch {
            expected: vec![images.len()],
            actual: vec![is_reference.len()],
        });
    }
    let Some(&first_is_reference) = is_reference.first() else {
        return Err(PreprocessError::Configuration(
            "no frames to correct".to_string(),
        ));
    };
    if !first_is_reference {
        return Err(PreprocessError::Configuration(
            "the first image is not a reference image".to_string(),
        ));
    }

    let n_reference = is_reference.iter().filter(|&&r| r).count();
    let mut corrected = Vec::with_capacity(images.len() - n_reference);
    let mut reference = &images[0];

    for (index, (image, &is_ref)) in images.iter().zip(is_reference).enumerate().skip(1) {
        if is_ref {
            reference = image;
            continue;
        }
        let frame = image
            .sub(reference)
            .inspect_err(|e| log::debug!("frame {index} does not match its reference: {e}"))?;
        corrected.push(frame);
    }

    log::debug!(
        "subtracted {} reference frames from {} measured frames",
        n_reference,
        corrected.len()
    );
    Ok(corrected)
}
