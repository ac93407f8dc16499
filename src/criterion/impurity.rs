//! Impurity functionals over weighted class counts.
//!
//! Every measure scores one side of a split from its per-output class sums
//! and its total weight, and averages the per-output scores. Node and
//! children impurity are derived from [`PartitionStatistics`] snapshots.

use ndarray::{s, ArrayView1, ArrayView2};

use crate::core::types::{ImpurityKind, Weight};
use crate::criterion::statistics::PartitionStatistics;

/// Impurity of a set of weighted class counts.
pub trait ImpurityMeasure {
    /// Impurity of one side, averaged over outputs.
    ///
    /// `sums` has one row per output; only the first `n_classes[k]` entries
    /// of row `k` are read. `weighted_n` is the total weight of the side.
    fn side_impurity(
        &self,
        sums: ArrayView2<'_, Weight>,
        n_classes: &[usize],
        weighted_n: Weight,
    ) -> f64;

    /// Impurity of the whole node, from `sum_total`.
    fn node_impurity(&self, stats: &PartitionStatistics<'_>) -> f64 {
        self.side_impurity(
            stats.sum_total(),
            stats.n_classes(),
            stats.weighted_n_node_samples(),
        )
    }

    /// Impurities of the left and right children at the current position.
    fn children_impurity(&self, stats: &PartitionStatistics<'_>) -> (f64, f64) {
        let left = self.side_impurity(stats.sum_left(), stats.n_classes(), stats.weighted_n_left());
        let right = self.side_impurity(
            stats.sum_right(),
            stats.n_classes(),
            stats.weighted_n_right(),
        );
        (left, right)
    }
}

#[inline]
fn average_over_outputs<F>(
    sums: ArrayView2<'_, Weight>,
    n_classes: &[usize],
    mut per_output: F,
) -> f64
where
    F: FnMut(ArrayView1<'_, Weight>) -> f64,
{
    let total: f64 = n_classes
        .iter()
        .enumerate()
        .map(|(k, &n)| per_output(sums.slice(s![k, ..n])))
        .sum();
    total / n_classes.len() as f64
}

/// Gini index.
///
/// For an output with class proportions `p_c = count_c / weighted_n`:
///
/// ```text
/// gini = 1 - sum_c p_c^2
/// ```
///
/// Zero for a pure node, `1 - 1/n_classes` for a uniform one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gini;

impl ImpurityMeasure for Gini {
    fn side_impurity(
        &self,
        sums: ArrayView2<'_, Weight>,
        n_classes: &[usize],
        weighted_n: Weight,
    ) -> f64 {
        let squared_n = weighted_n * weighted_n;
        average_over_outputs(sums, n_classes, |counts| {
            let sq_count: f64 = counts.iter().map(|&c| c * c).sum();
            1.0 - sq_count / squared_n
        })
    }
}

/// Shannon entropy in bits.
///
/// ```text
/// entropy = sum_c p_c log2(1 / p_c)
/// ```
///
/// Classes with zero weight contribute nothing. A side without weight has
/// no distribution and scores NaN, like the other measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entropy;

impl ImpurityMeasure for Entropy {
    fn side_impurity(
        &self,
        sums: ArrayView2<'_, Weight>,
        n_classes: &[usize],
        weighted_n: Weight,
    ) -> f64 {
        if weighted_n == 0.0 {
            return f64::NAN;
        }
        average_over_outputs(sums, n_classes, |counts| {
            counts
                .iter()
                .filter(|&&c| c > 0.0)
                .map(|&c| c / weighted_n * (weighted_n / c).log2())
                .sum()
        })
    }
}

/// Misclassification rate, `1 - max_c p_c`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Misclassification;

impl ImpurityMeasure for Misclassification {
    fn side_impurity(
        &self,
        sums: ArrayView2<'_, Weight>,
        n_classes: &[usize],
        weighted_n: Weight,
    ) -> f64 {
        average_over_outputs(sums, n_classes, |counts| {
            let max_count = counts.iter().copied().fold(0.0, f64::max);
            1.0 - max_count / weighted_n
        })
    }
}

// Dispatch once per call, then run the concrete measure.
impl ImpurityMeasure for ImpurityKind {
    fn side_impurity(
        &self,
        sums: ArrayView2<'_, Weight>,
        n_classes: &[usize],
        weighted_n: Weight,
    ) -> f64 {
        match self {
            ImpurityKind::Gini => Gini.side_impurity(sums, n_classes, weighted_n),
            ImpurityKind::Entropy => Entropy.side_impurity(sums, n_classes, weighted_n),
            ImpurityKind::Misclassification => {
                Misclassification.side_impurity(sums, n_classes, weighted_n)
            }
        }
    }

    fn children_impurity(&self, stats: &PartitionStatistics<'_>) -> (f64, f64) {
        match self {
            ImpurityKind::Gini => Gini.children_impurity(stats),
            ImpurityKind::Entropy => Entropy.children_impurity(stats),
            ImpurityKind::Misclassification => Misclassification.children_impurity(stats),
        }
    }
}
