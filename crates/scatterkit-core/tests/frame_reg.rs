//! Frame regression test
//!
//! Tests Frame creation, pixel access, element-wise arithmetic, the
//! subtraction operator and summary statistics.

use scatterkit_core::Frame;
use scatterkit_test::RegParams;

#[test]
fn frame_reg() {
    let mut rp = RegParams::new("frame");

    // --- Test 1: creation ---
    let zeros = Frame::new(90, 102).unwrap();
    rp.compare_values(90.0, zeros.rows() as f64, 0.0);
    rp.compare_values(102.0, zeros.cols() as f64, 0.0);
    rp.compare_values((90 * 102) as f64, zeros.len() as f64, 0.0);
    rp.compare_values(0.0, zeros.sum(), 0.0);
    rp.compare_bool(true, Frame::new(0, 5).is_err_and(|e| e.is_shape()));
    rp.compare_bool(
        true,
        Frame::from_data(2, 2, vec![1.0; 3]).is_err_and(|e| e.is_shape()),
    );

    // --- Test 2: pixel access (row-major) ---
    let mut ramp = Frame::from_fn(3, 4, |r, c| (r * 4 + c) as f64).unwrap();
    rp.compare_values(6.0, ramp.get(1, 2).unwrap(), 0.0);
    rp.compare_arrays(&[8.0, 9.0, 10.0, 11.0], ramp.row(2), 0.0);
    ramp.set(0, 0, -1.0).unwrap();
    rp.compare_values(-1.0, ramp.data()[0], 0.0);
    rp.compare_bool(true, ramp.get(3, 0).is_err());

    // --- Test 3: arithmetic ---
    let a = Frame::new_with_value(3, 4, 5.0).unwrap();
    let b = Frame::from_fn(3, 4, |r, _| r as f64).unwrap();
    let diff = (&a - &b).unwrap();
    let expected = Frame::from_fn(3, 4, |r, _| 5.0 - r as f64).unwrap();
    rp.compare_frames(&expected, &diff, 0.0);
    let sum = (&diff + &b).unwrap();
    rp.compare_frames(&a, &sum, 0.0);
    let prod = a.mul(&b).unwrap();
    rp.compare_values(5.0 * (0.0 + 1.0 + 2.0) * 4.0, prod.sum(), 0.0);
    rp.compare_frames(&Frame::new_with_value(3, 4, 2.5).unwrap(), &a.scale(0.5), 0.0);

    let other = Frame::new(4, 3).unwrap();
    rp.compare_bool(true, a.sub(&other).is_err_and(|e| e.is_shape()));

    // --- Test 4: statistics ---
    rp.compare_values(5.0, a.mean(), 0.0);
    let (min, r, c) = ramp.min().unwrap();
    rp.compare_values(-1.0, min, 0.0);
    rp.compare_values(0.0, (r + c) as f64, 0.0);
    let (max, r, c) = ramp.max().unwrap();
    rp.compare_values(11.0, max, 0.0);
    rp.compare_values(2.0, r as f64, 0.0);
    rp.compare_values(3.0, c as f64, 0.0);

    assert!(rp.cleanup(), "frame regression test failed");
}
