//! Integration tests for impurity values and split improvements.

mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use common::*;
use ndarray::{array, Array2};
use split_criterion::*;

const BALANCED_INDICES: [usize; 4] = [0, 1, 2, 3];

fn balanced_labels() -> Array2<f64> {
    array![[0.0], [0.0], [1.0], [1.0]]
}

fn balanced_criterion(labels: &Array2<f64>, impurity: ImpurityKind) -> ClassificationCriterion<'_> {
    let mut criterion = ClassificationCriterion::with_impurity(impurity, &[2]).unwrap();
    criterion
        .init(NodeSamples::new(labels.view(), &BALANCED_INDICES, 0, 4))
        .unwrap();
    criterion
}

#[test]
fn test_balanced_binary_node_impurities() {
    let labels = balanced_labels();
    assert_abs_diff_eq!(balanced_criterion(&labels, ImpurityKind::Gini).node_impurity(), 0.5);
    assert_abs_diff_eq!(balanced_criterion(&labels, ImpurityKind::Entropy).node_impurity(), 1.0);
    assert_abs_diff_eq!(
        balanced_criterion(&labels, ImpurityKind::Misclassification).node_impurity(),
        0.5
    );
}

#[test]
fn test_perfect_split_improvement() {
    let labels = balanced_labels();
    for kind in [
        ImpurityKind::Gini,
        ImpurityKind::Entropy,
        ImpurityKind::Misclassification,
    ] {
        let mut criterion = balanced_criterion(&labels, kind);
        let parent = criterion.node_impurity();
        criterion.update(2);
        let (left, right) = criterion.children_impurity();

        assert_abs_diff_eq!(left, 0.0);
        assert_abs_diff_eq!(right, 0.0);
        assert_abs_diff_eq!(criterion.impurity_improvement(parent, left, right), parent);
    }

    let mut gini = balanced_criterion(&labels, ImpurityKind::Gini);
    gini.update(2);
    let (left, right) = gini.children_impurity();
    assert_abs_diff_eq!(gini.impurity_improvement(0.5, left, right), 0.5);
}

#[test]
fn test_empty_child_is_not_finite() {
    let labels = balanced_labels();
    for kind in [
        ImpurityKind::Gini,
        ImpurityKind::Entropy,
        ImpurityKind::Misclassification,
    ] {
        let mut criterion = balanced_criterion(&labels, kind);
        criterion.update(0);
        let (left, right) = criterion.children_impurity();

        assert!(left.is_nan(), "{} left child: {}", kind, left);
        assert!(right.is_finite());
        assert!(criterion.proxy_impurity_improvement().is_nan(), "{}", kind);
    }
}

#[test]
fn test_pure_children_score_positive_zero() {
    let labels = balanced_labels();
    let mut criterion = balanced_criterion(&labels, ImpurityKind::Entropy);
    criterion.update(2);
    let (left, right) = criterion.children_impurity();

    assert!(left == 0.0 && left.is_sign_positive());
    assert!(right == 0.0 && right.is_sign_positive());
    assert_eq!(criterion.proxy_impurity_improvement(), 0.0);
}

#[test]
fn test_proxy_ranks_like_improvement() {
    let n_classes = [3];
    let labels = create_test_labels(120, &n_classes, 7);
    let weights = create_test_weights(120, 8);
    let indices = create_sorted_indices(120, 9);

    for kind in [ImpurityKind::Gini, ImpurityKind::Entropy] {
        let mut criterion = ClassificationCriterion::with_impurity(kind, &n_classes).unwrap();
        criterion
            .init(NodeSamples::new(labels.view(), &indices, 0, 120).with_weights(weights.view()))
            .unwrap();
        let parent = criterion.node_impurity();

        let mut best_proxy = (f64::NEG_INFINITY, 0);
        let mut best_improvement = f64::NEG_INFINITY;
        let mut improvements = vec![0.0; 120];
        for pos in 1..120 {
            criterion.update(pos);
            let proxy = criterion.proxy_impurity_improvement();
            let (left, right) = criterion.children_impurity();
            improvements[pos] = criterion.impurity_improvement(parent, left, right);

            if proxy > best_proxy.0 {
                best_proxy = (proxy, pos);
            }
            best_improvement = best_improvement.max(improvements[pos]);
        }

        assert_abs_diff_eq!(improvements[best_proxy.1], best_improvement, epsilon = 1e-12);
    }
}

#[test]
fn test_multi_output_average() {
    // output 0 separates perfectly at position 2, output 1 is constant
    let labels = array![[0.0, 1.0], [0.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
    let indices = [0, 1, 2, 3];
    let mut criterion =
        ClassificationCriterion::with_impurity(ImpurityKind::Gini, &[2, 3]).unwrap();
    criterion
        .init(NodeSamples::new(labels.view(), &indices, 0, 4))
        .unwrap();

    assert_abs_diff_eq!(criterion.node_impurity(), 0.25);
    assert_eq!(criterion.node_value(), array![[2.0, 2.0, 0.0], [0.0, 4.0, 0.0]]);

    criterion.update(1);
    let (left, right) = criterion.children_impurity();
    assert_abs_diff_eq!(left, 0.0);
    assert_relative_eq!(right, (1.0 - 5.0 / 9.0) / 2.0, max_relative = 1e-12);
}

#[test]
fn test_weighted_gini() {
    let labels = array![[0.0], [1.0], [1.0]];
    let weights = array![3.0, 1.0, 0.5];
    let indices = [0, 1, 2];
    let mut criterion = ClassificationCriterion::new(&CriterionConfig::new(2)).unwrap();
    criterion
        .init(NodeSamples::new(labels.view(), &indices, 0, 3).with_weights(weights.view()))
        .unwrap();

    // p = (3/4.5, 1.5/4.5)
    let expected = 1.0 - (9.0 + 2.25) / (4.5 * 4.5);
    assert_relative_eq!(criterion.node_impurity(), expected, max_relative = 1e-12);
    assert_eq!(criterion.weighted_n_node_samples(), 4.5);
}
