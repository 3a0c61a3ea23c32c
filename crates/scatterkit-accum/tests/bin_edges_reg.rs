//! Bin edge generation regression test
//!
//! Covers the four parameter combinations accepted by `bin_edges`, the
//! truncating step case and the configuration errors.

use scatterkit_accum::{BinGeometry, bin_edges};
use scatterkit_test::RegParams;

#[test]
fn bin_edges_reg() {
    let mut rp = RegParams::new("bin_edges");

    // --- Test 1: (min, max, nbins) ---
    let edges = bin_edges(Some(0.0), Some(10.0), Some(5), None).unwrap();
    rp.compare_arrays(&[0.0, 2.0, 4.0, 6.0, 8.0, 10.0], &edges, 0.0);

    for (lo, hi, n) in [(-3.7, 12.1, 7usize), (0.001, 0.002, 33), (-1e6, 1e6, 1000)] {
        let edges = bin_edges(Some(lo), Some(hi), Some(n), None).unwrap();
        rp.compare_values((n + 1) as f64, edges.len() as f64, 0.0);
        rp.compare_values(lo, edges[0], 0.0);
        rp.compare_values(hi, edges[n], 0.0);
    }

    // --- Test 2: (min, nbins, step) keeps a constant step ---
    for (lo, n, step) in [(0.0, 10usize, 0.1), (-5.5, 42, 0.37), (100.0, 3, 25.0)] {
        let edges = bin_edges(Some(lo), None, Some(n), Some(step)).unwrap();
        rp.compare_values((n + 1) as f64, edges.len() as f64, 0.0);
        for w in edges.windows(2) {
            rp.compare_values(step, w[1] - w[0], 1e-9);
        }
    }

    // --- Test 3: (max, nbins, step) ends exactly at max ---
    let edges = bin_edges(None, Some(1.0), Some(4), Some(0.25)).unwrap();
    rp.compare_arrays(&[0.0, 0.25, 0.5, 0.75, 1.0], &edges, 0.0);

    // --- Test 4: (min, max, step) truncates to whole steps ---
    let edges = bin_edges(Some(0.0), Some(10.0), None, Some(3.0)).unwrap();
    rp.compare_arrays(&[0.0, 3.0, 6.0, 9.0], &edges, 0.0);
    let edges = bin_edges(Some(0.0), Some(10.0), None, Some(2.5)).unwrap();
    rp.compare_arrays(&[0.0, 2.5, 5.0, 7.5, 10.0], &edges, 0.0);

    // --- Test 5: builder ---
    let geometry = BinGeometry::new().range_min(0.0).range_max(10.0).nbins(5);
    rp.compare_arrays(&edges_or_empty(geometry), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0], 0.0);

    // --- Test 6: configuration errors ---
    let two = bin_edges(Some(0.0), Some(10.0), None, None);
    rp.compare_bool(true, two.is_err_and(|e| e.is_configuration()));
    let four = bin_edges(Some(0.0), Some(10.0), Some(5), Some(2.0));
    rp.compare_bool(true, four.is_err_and(|e| e.is_configuration()));
    let inverted = bin_edges(Some(10.0), Some(0.0), Some(5), None);
    rp.compare_bool(true, inverted.is_err_and(|e| e.is_configuration()));
    let empty = bin_edges(Some(0.0), Some(10.0), Some(0), None);
    rp.compare_bool(true, empty.is_err_and(|e| e.is_configuration()));

    assert!(rp.cleanup(), "bin_edges regression test failed");
}

fn edges_or_empty(geometry: BinGeometry) -> Vec<f64> {
    geometry.edges().unwrap_or_default()
}
