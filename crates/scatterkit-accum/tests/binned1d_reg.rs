//! 1D binned statistic regression test
//!
//! Compares `BinnedStatistic1D` and `bin_1d` against histograms computed
//! here with a plain loop over the sample positions.

use scatterkit_accum::{
    Binned1dOptions, BinnedStatistic1D, EdgeInclusion, Normalization, Statistic, bin_1d,
};
use scatterkit_test::{RegParams, pseudo_random_bit};

fn positions(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 37) % 101) as f64 * 0.173 - 4.0).collect()
}

fn reference_bin(x: f64, edges: &[f64]) -> Option<usize> {
    let n = edges.len() - 1;
    (0..n).find(|&b| x >= edges[b] && (x < edges[b + 1] || (b == n - 1 && x <= edges[n])))
}

fn reference_median(v: &[f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    let mut sorted = v.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[test]
fn binned1d_reg() {
    let mut rp = RegParams::new("binned1d");
    let x = positions(500);
    let y: Vec<f64> = x.iter().map(|v| (v * 1.3).cos() + 0.1 * v).collect();

    // --- Test 1: sum with a mask of ones equals a weighted histogram ---
    let bs = BinnedStatistic1D::new(&x, 25, Statistic::Sum).unwrap();
    let ones = vec![1.0; x.len()];
    let opts = Binned1dOptions::default().mask(ones.clone());
    let unit = BinnedStatistic1D::with_options(&x, 25, Statistic::Sum, &opts).unwrap();
    let mut expected = vec![0.0; 25];
    for ((&xi, &yi), &w) in x.iter().zip(&y).zip(&ones) {
        if let Some(b) = reference_bin(xi, unit.edges()) {
            expected[b] += w * yi;
        }
    }
    rp.compare_arrays(&expected, &unit.compute(&y).unwrap(), 0.0);
    rp.compare_arrays(&bs.compute(&y).unwrap(), &unit.compute(&y).unwrap(), 0.0);

    // --- Test 2: random binary mask excludes samples ---
    let mask: Vec<f64> = (0..x.len()).map(|i| pseudo_random_bit(i, 3)).collect();
    let opts = Binned1dOptions::default().mask(mask.clone());
    let masked_sum = BinnedStatistic1D::with_options(&x, 25, Statistic::Sum, &opts).unwrap();
    let masked_median =
        BinnedStatistic1D::with_options(&x, 25, Statistic::Median, &opts).unwrap();
    let mut expected = vec![0.0; 25];
    let mut expected_kept = vec![0usize; 25];
    let mut groups = vec![Vec::new(); 25];
    for ((&xi, &yi), &m) in x.iter().zip(&y).zip(&mask) {
        if m == 0.0 {
            continue;
        }
        if let Some(b) = reference_bin(xi, masked_sum.edges()) {
            expected[b] += m * yi;
            expected_kept[b] += 1;
            groups[b].push(yi);
        }
    }
    rp.compare_arrays(&expected, &masked_sum.compute(&y).unwrap(), 0.0);
    rp.compare_bool(true, masked_sum.counts() == expected_kept);
    let expected_median: Vec<f64> = groups.iter().map(|g| reference_median(g)).collect();
    rp.compare_arrays(&expected_median, &masked_median.compute(&y).unwrap(), 0.0);
    let short = Binned1dOptions::default().mask(vec![1.0; 3]);
    let err = BinnedStatistic1D::with_options(&x, 25, Statistic::Sum, &short);
    rp.compare_bool(true, err.is_err_and(|e| e.is_shape()));

    // --- Test 3: counts ---
    let mut expected_counts = vec![0.0; 25];
    for &xi in &x {
        if let Some(b) = reference_bin(xi, bs.edges()) {
            expected_counts[b] += 1.0;
        }
    }
    let count = BinnedStatistic1D::new(&x, 25, Statistic::Count).unwrap();
    rp.compare_arrays(&expected_counts, &count.compute(&y).unwrap(), 0.0);
    rp.compare_values(x.len() as f64, expected_counts.iter().sum(), 0.0);

    let mut groups = vec![Vec::new(); 25];
    for (&xi, &yi) in x.iter().zip(&y) {
        if let Some(b) = reference_bin(xi, bs.edges()) {
            groups[b].push(yi);
        }
    }
    let reference_mean = |g: &Vec<f64>| g.iter().sum::<f64>() / g.len() as f64;
    let expected_mean: Vec<f64> = groups.iter().map(reference_mean).collect();
    let expected_std: Vec<f64> = groups
        .iter()
        .map(|g| {
            let m = reference_mean(g);
            (g.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / g.len() as f64).sqrt()
        })
        .collect();
    let expected_median: Vec<f64> = groups.iter().map(|g| reference_median(g)).collect();
    for (stat, expected) in [
        (Statistic::Mean, &expected_mean),
        (Statistic::Std, &expected_std),
        (Statistic::Median, &expected_median),
    ] {
        let b = BinnedStatistic1D::new(&x, 25, stat).unwrap();
        rp.compare_arrays(expected, &b.compute(&y).unwrap(), 1e-12);
    }

    // --- Test 4: named and custom statistics agree ---
    let pairs = [
        (
            Statistic::Mean,
            Statistic::custom("my_mean", |v| v.iter().sum::<f64>() / v.len() as f64),
            1e-12,
        ),
        (Statistic::Sum, Statistic::custom("my_sum", |v| v.iter().sum()), 0.0),
        (Statistic::Count, Statistic::custom("my_count", |v| v.len() as f64), 0.0),
    ];
    for (named, custom, delta) in pairs {
        let a = BinnedStatistic1D::new(&x, 40, named).unwrap();
        let b = BinnedStatistic1D::new(&x, 40, custom).unwrap();
        rp.compare_arrays(&a.compute(&y).unwrap(), &b.compute(&y).unwrap(), delta);
    }

    // --- Test 5: statistic parsed from its name ---
    let parsed: Statistic = "median".parse().unwrap();
    let a = BinnedStatistic1D::new(&x, 10, parsed).unwrap();
    let b = BinnedStatistic1D::new(&x, 10, Statistic::Median).unwrap();
    rp.compare_arrays(&a.compute(&y).unwrap(), &b.compute(&y).unwrap(), 0.0);
    rp.compare_bool(true, "mode".parse::<Statistic>().is_err_and(|e| e.is_configuration()));

    // --- Test 6: normalization by pixel count gives the mean ---
    let mean = BinnedStatistic1D::new(&x, 25, Statistic::Mean).unwrap();
    rp.compare_arrays(
        &mean.compute(&y).unwrap(),
        &bs.compute_normalized(&y, Normalization::PixelCount).unwrap(),
        1e-12,
    );

    // --- Test 7: empty bins ---
    let opts = Binned1dOptions::default().range(-100.0, 100.0);
    let wide = BinnedStatistic1D::with_options(&x, 200, Statistic::Mean, &opts).unwrap();
    let result = wide.compute(&y).unwrap();
    rp.compare_bool(true, result[0].is_nan());
    let wide_sum = BinnedStatistic1D::with_options(&x, 200, Statistic::Sum, &opts).unwrap();
    rp.compare_values(0.0, wide_sum.compute(&y).unwrap()[0], 0.0);

    // --- Test 8: right-closed bins ---
    let grid = [0.0, 1.0, 2.0, 3.0, 4.0];
    let right = Binned1dOptions::default()
        .range(0.0, 4.0)
        .inclusion(EdgeInclusion::Right);
    let bs_right = BinnedStatistic1D::with_options(&grid, 2, Statistic::Count, &right).unwrap();
    rp.compare_arrays(&[3.0, 2.0], &bs_right.compute(&[0.0; 5]).unwrap(), 0.0);
    let bs_left = BinnedStatistic1D::new(&grid, 2, Statistic::Count).unwrap();
    rp.compare_arrays(&[2.0, 3.0], &bs_left.compute(&[0.0; 5]).unwrap(), 0.0);

    // --- Test 9: bin_1d matches the cached statistic ---
    let h = bin_1d(&x, &y, Some(25), None, None).unwrap();
    rp.compare_arrays(bs.edges(), &h.edges, 0.0);
    rp.compare_arrays(&bs.compute(&y).unwrap(), &h.sums, 0.0);
    let counts: Vec<f64> = h.counts.iter().map(|&c| c as f64).collect();
    rp.compare_arrays(&expected_counts, &counts, 0.0);

    // --- Test 10: shape errors ---
    rp.compare_bool(true, bs.compute(&y[1..]).is_err_and(|e| e.is_shape()));
    rp.compare_bool(true, bin_1d(&x, &y[1..], None, None, None).is_err_and(|e| e.is_shape()));

    assert!(rp.cleanup(), "binned1d regression test failed");
}
