//! Common test utilities for split criterion integration tests.

#![allow(dead_code)]

use approx::assert_relative_eq;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::prelude::*;
use split_criterion::*;

/// Create random class labels, one column per output
pub fn create_test_labels(num_samples: usize, n_classes: &[usize], seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut labels = Array2::zeros((num_samples, n_classes.len()));

    for i in 0..num_samples {
        for (k, &n) in n_classes.iter().enumerate() {
            labels[[i, k]] = rng.gen_range(0..n) as f64;
        }
    }

    labels
}

/// Create random positive sample weights
pub fn create_test_weights(num_samples: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_iter((0..num_samples).map(|_| rng.gen_range(0.1..5.0)))
}

/// Create sample indices sorted by a random feature
pub fn create_sorted_indices(num_samples: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let feature: Vec<f64> = (0..num_samples).map(|_| rng.gen_range(-5.0..5.0)).collect();

    let mut indices: Vec<usize> = (0..num_samples).collect();
    indices.sort_by(|&a, &b| feature[a].total_cmp(&feature[b]));
    indices
}

/// Weighted class counts of `indices[positions]` computed from scratch
pub fn brute_force_sums(
    labels: ArrayView2<'_, f64>,
    weights: Option<ArrayView1<'_, f64>>,
    indices: &[usize],
    positions: std::ops::Range<usize>,
    n_classes: &[usize],
) -> (Array2<f64>, f64) {
    let max_n_classes = n_classes.iter().copied().max().unwrap_or(0);
    let mut sums = Array2::zeros((n_classes.len(), max_n_classes));
    let mut weighted_n = 0.0;

    for p in positions {
        let i = indices[p];
        let w = weights.map_or(1.0, |w| w[i]);
        for k in 0..n_classes.len() {
            sums[[k, labels[[i, k]] as usize]] += w;
        }
        weighted_n += w;
    }

    (sums, weighted_n)
}

/// Assert that two sums arrays agree within a relative tolerance
pub fn assert_sums_close(actual: ArrayView2<'_, f64>, expected: ArrayView2<'_, f64>) {
    assert_eq!(actual.dim(), expected.dim());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *e, epsilon = 1e-9, max_relative = 1e-9);
    }
}

/// Assert that the left and right partitions match the brute-force sums
/// of `[start, pos)` and `[pos, end)` (no missing tail).
pub fn assert_partition_matches(
    stats: &PartitionStatistics<'_>,
    labels: ArrayView2<'_, f64>,
    weights: Option<ArrayView1<'_, f64>>,
    indices: &[usize],
) {
    let n_classes = stats.n_classes();
    let (left, weighted_left) =
        brute_force_sums(labels, weights, indices, stats.start()..stats.pos(), n_classes);
    let (right, weighted_right) =
        brute_force_sums(labels, weights, indices, stats.pos()..stats.end(), n_classes);

    assert_sums_close(stats.sum_left(), left.view());
    assert_sums_close(stats.sum_right(), right.view());
    assert_relative_eq!(stats.weighted_n_left(), weighted_left, epsilon = 1e-9);
    assert_relative_eq!(stats.weighted_n_right(), weighted_right, epsilon = 1e-9);
}
