//! Split criteria for classification trees.
//!
//! A tree builder scores candidate splits of a node as follows:
//!
//! 1. [`ClassificationCriterion::init`] binds the criterion to the node's
//!    samples and computes its class totals.
//! 2. Optionally [`ClassificationCriterion::init_missing`] declares the tail
//!    of samples with a missing feature value, followed by
//!    [`Criterion::reset`] once their routing is chosen.
//! 3. For every candidate threshold, [`Criterion::update`] moves the split
//!    position and [`Criterion::proxy_impurity_improvement`] ranks it.
//! 4. The best position is scored with [`Criterion::children_impurity`] and
//!    [`Criterion::impurity_improvement`].
//!
//! ```rust
//! use ndarray::array;
//! use split_criterion::{ClassificationCriterion, Criterion, CriterionConfig, NodeSamples};
//!
//! let labels = array![[0.0], [0.0], [1.0], [1.0]];
//! let indices = [0, 1, 2, 3];
//!
//! let mut criterion = ClassificationCriterion::new(&CriterionConfig::new(2))?;
//! criterion.init(NodeSamples::new(labels.view(), &indices, 0, 4))?;
//! assert_eq!(criterion.node_impurity(), 0.5);
//!
//! criterion.update(2);
//! assert_eq!(criterion.children_impurity(), (0.0, 0.0));
//! # Ok::<(), split_criterion::CriterionError>(())
//! ```

pub mod classification;
pub mod impurity;
pub mod statistics;

pub use classification::ClassificationCriterion;
pub use impurity::{Entropy, Gini, ImpurityMeasure, Misclassification};
pub use statistics::{NodeSamples, PartitionStatistics};

use crate::core::types::Weight;

/// Split quality evaluation at a movable split position.
///
/// Implementors keep left/right statistics of the current node up to date
/// as the split position moves and score them.
pub trait Criterion {
    /// Move the split position to the start of the node.
    fn reset(&mut self);

    /// Move the split position to the end of the node.
    fn reverse_reset(&mut self);

    /// Move the split position to `new_pos`.
    fn update(&mut self, new_pos: usize);

    /// Impurity of the whole node.
    fn node_impurity(&self) -> f64;

    /// Impurities of the left and right children.
    fn children_impurity(&self) -> (f64, f64);

    /// Total weight of the training set.
    fn weighted_n_samples(&self) -> Weight;

    /// Total weight of the node.
    fn weighted_n_node_samples(&self) -> Weight;

    /// Weight of the left child.
    fn weighted_n_left(&self) -> Weight;

    /// Weight of the right child.
    fn weighted_n_right(&self) -> Weight;

    /// Cheap score that ranks split positions of one node the same way as
    /// [`impurity_improvement`](Self::impurity_improvement).
    fn proxy_impurity_improvement(&self) -> f64 {
        let (impurity_left, impurity_right) = self.children_impurity();
        -self.weighted_n_right() * impurity_right - self.weighted_n_left() * impurity_left
    }

    /// Weighted impurity decrease of the split, relative to the whole
    /// training set:
    ///
    /// ```text
    /// N_t / N * (impurity - N_t_R / N_t * right_impurity
    ///                     - N_t_L / N_t * left_impurity)
    /// ```
    fn impurity_improvement(
        &self,
        impurity_parent: f64,
        impurity_left: f64,
        impurity_right: f64,
    ) -> f64 {
        let weighted_n_node_samples = self.weighted_n_node_samples();
        (weighted_n_node_samples / self.weighted_n_samples())
            * (impurity_parent
                - self.weighted_n_right() / weighted_n_node_samples * impurity_right
                - self.weighted_n_left() / weighted_n_node_samples * impurity_left)
    }
}
