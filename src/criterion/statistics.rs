//! Incremental left/right partition statistics for classification splits.
//!
//! [`PartitionStatistics`] keeps, for every output `k` and class `c`, the
//! weighted class counts of a tree node (`sum_total`), of the samples left of
//! the current split position (`sum_left`) and of the remainder
//! (`sum_right`). Moving the split position only touches the samples between
//! the old and the new position, or the samples between the new position and
//! the end of the non-missing range when rebuilding from the other side is
//! cheaper.
//!
//! Samples whose feature value is missing sit at the tail of the node range
//! (`[end - n_missing, end)`). They never move with the split position; they
//! are counted on the left or on the right depending on
//! [`PartitionStatistics::missing_go_to_left`].

use ndarray::{Array2, ArrayView2, Zip};
use num_traits::ToPrimitive;

use crate::core::error::{CriterionError, Result};
use crate::core::types::*;
use crate::ensure;

/// Borrowed description of the samples of one tree node.
///
/// `sample_indices[start..end]` are the rows of `labels` belonging to the
/// node, sorted by the feature currently being scanned. `labels` has one
/// column per output and holds class indices.
#[derive(Debug, Clone, Copy)]
pub struct NodeSamples<'a> {
    /// Class index of every sample for every output, shape `(n_samples, n_outputs)`
    pub labels: ArrayView2<'a, Label>,
    /// Weight lookup for every sample
    pub sample_weight: SampleWeights<'a>,
    /// Total weight of the whole training set
    pub weighted_n_samples: Weight,
    /// Sample indices sorted by the current feature
    pub sample_indices: &'a [SampleIndex],
    /// First position of the node in `sample_indices`
    pub start: usize,
    /// One past the last position of the node in `sample_indices`
    pub end: usize,
}

impl<'a> NodeSamples<'a> {
    /// Unweighted node over `sample_indices[start..end]`.
    pub fn new(
        labels: ArrayView2<'a, Label>,
        sample_indices: &'a [SampleIndex],
        start: usize,
        end: usize,
    ) -> Self {
        NodeSamples {
            labels,
            sample_weight: SampleWeights::Uniform,
            weighted_n_samples: labels.nrows() as Weight,
            sample_indices,
            start,
            end,
        }
    }

    /// Use explicit sample weights. `weighted_n_samples` becomes their sum.
    pub fn with_weights(mut self, weights: ndarray::ArrayView1<'a, Weight>) -> Self {
        self.weighted_n_samples = weights.sum();
        self.sample_weight = SampleWeights::Explicit(weights);
        self
    }

    /// Override the total weight of the training set.
    pub fn with_weighted_n_samples(mut self, weighted_n_samples: Weight) -> Self {
        self.weighted_n_samples = weighted_n_samples;
        self
    }

    /// Number of samples in the node.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the node holds no sample.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Weighted per-class sums of a node and of its current left/right split.
///
/// Buffers are allocated once with shape `(n_outputs, max_n_classes)` and
/// reused by every call to [`init`](Self::init). Entries at `c >= n_classes[k]`
/// stay zero.
///
/// After every [`reset`](Self::reset), [`reverse_reset`](Self::reverse_reset)
/// and [`update`](Self::update):
/// `sum_left + sum_right == sum_total` and
/// `weighted_n_left + weighted_n_right == weighted_n_node_samples`.
#[derive(Debug, Clone)]
pub struct PartitionStatistics<'a> {
    n_classes: Vec<usize>,
    max_n_classes: usize,

    node: Option<NodeSamples<'a>>,
    start: usize,
    end: usize,
    pos: usize,
    n_missing: usize,
    missing_go_to_left: bool,

    weighted_n_samples: Weight,
    weighted_n_node_samples: Weight,
    weighted_n_left: Weight,
    weighted_n_right: Weight,
    weighted_n_missing: Weight,

    sum_total: Array2<Weight>,
    sum_left: Array2<Weight>,
    sum_right: Array2<Weight>,
    sum_missing: Array2<Weight>,
}

impl<'a> PartitionStatistics<'a> {
    /// Allocate statistics for `n_classes.len()` outputs.
    pub fn new(n_classes: &[usize]) -> Result<Self> {
        ensure!(
            !n_classes.is_empty(),
            CriterionError::invalid_parameter("n_classes", "[]", "at least one output is required")
        );
        if let Some(k) = n_classes.iter().position(|&n| n == 0) {
            return Err(CriterionError::invalid_parameter(
                format!("n_classes[{}]", k),
                "0",
                "must be at least 1",
            ));
        }

        let n_outputs = n_classes.len();
        let max_n_classes = n_classes.iter().copied().max().unwrap_or(0);
        let shape = (n_outputs, max_n_classes);

        Ok(PartitionStatistics {
            n_classes: n_classes.to_vec(),
            max_n_classes,
            node: None,
            start: 0,
            end: 0,
            pos: 0,
            n_missing: 0,
            missing_go_to_left: false,
            weighted_n_samples: 0.0,
            weighted_n_node_samples: 0.0,
            weighted_n_left: 0.0,
            weighted_n_right: 0.0,
            weighted_n_missing: 0.0,
            sum_total: Array2::zeros(shape),
            sum_left: Array2::zeros(shape),
            sum_right: Array2::zeros(shape),
            sum_missing: Array2::zeros(shape),
        })
    }

    /// Bind the statistics to a node and compute its class totals.
    ///
    /// This is the only full pass over the node. Any previously declared
    /// missing tail is cleared and the split position is reset to `start`.
    ///
    /// # Errors
    ///
    /// Fails when the range does not fit `sample_indices`, a sample index is
    /// outside `labels` or the weights, `labels` does not have one column per
    /// output, a weight is negative or not finite, or a label is not an
    /// integer class index in `[0, n_classes[k])`. A failed call leaves the
    /// statistics cleared to an empty node at position 0; they must be
    /// re-initialized before use.
    pub fn init(&mut self, node: NodeSamples<'a>) -> Result<()> {
        self.node = None;
        let outcome = self
            .validate_node(&node)
            .and_then(|()| self.accumulate_totals(&node));
        if let Err(err) = outcome {
            log::debug!("criterion init failed ({}): statistics cleared", err.category());
            self.clear();
            return Err(err);
        }

        self.start = node.start;
        self.end = node.end;
        self.n_missing = 0;
        self.weighted_n_missing = 0.0;
        self.sum_missing.fill(0.0);
        self.weighted_n_samples = node.weighted_n_samples;
        self.node = Some(node);

        log::debug!(
            "criterion init: range [{}, {}), weighted_n_node_samples = {}",
            self.start,
            self.end,
            self.weighted_n_node_samples
        );

        self.reset();
        Ok(())
    }

    /// One pass over `[start, end)` filling `sum_total` and
    /// `weighted_n_node_samples`.
    fn accumulate_totals(&mut self, node: &NodeSamples<'a>) -> Result<()> {
        let n_outputs = self.n_outputs();
        let n_rows = node.labels.nrows();

        self.sum_total.fill(0.0);
        self.weighted_n_node_samples = 0.0;

        for &i in &node.sample_indices[node.start..node.end] {
            ensure!(i < n_rows, CriterionError::index_out_of_bounds(i, n_rows));

            let w = node.sample_weight.weight(i);
            if !w.is_finite() || w < 0.0 {
                return Err(CriterionError::invalid_parameter(
                    format!("sample_weight[{}]", i),
                    w.to_string(),
                    "must be finite and non-negative",
                ));
            }

            for k in 0..n_outputs {
                let c = class_index(node.labels[[i, k]], i, k, self.n_classes[k])?;
                self.sum_total[[k, c]] += w;
            }
            self.weighted_n_node_samples += w;
        }

        Ok(())
    }

    /// Unbind the node and zero every sum, count and position.
    fn clear(&mut self) {
        self.node = None;
        self.start = 0;
        self.end = 0;
        self.pos = 0;
        self.n_missing = 0;
        self.weighted_n_samples = 0.0;
        self.weighted_n_node_samples = 0.0;
        self.weighted_n_left = 0.0;
        self.weighted_n_right = 0.0;
        self.weighted_n_missing = 0.0;
        self.sum_total.fill(0.0);
        self.sum_left.fill(0.0);
        self.sum_right.fill(0.0);
        self.sum_missing.fill(0.0);
    }

    fn validate_node(&self, node: &NodeSamples<'a>) -> Result<()> {
        let length = node.sample_indices.len();
        ensure!(
            node.start <= node.end && node.end <= length,
            CriterionError::invalid_range(node.start, node.end, length)
        );
        ensure!(
            node.labels.ncols() == self.n_outputs(),
            CriterionError::dimension_mismatch(
                format!("{} label columns", self.n_outputs()),
                format!("{} label columns", node.labels.ncols()),
            )
        );
        if let Some(n_weights) = node.sample_weight.len() {
            ensure!(
                n_weights == node.labels.nrows(),
                CriterionError::dimension_mismatch(
                    format!("{} sample weights", node.labels.nrows()),
                    format!("{} sample weights", n_weights),
                )
            );
        }
        Ok(())
    }

    /// Declare the last `n_missing` samples of the node as having a missing
    /// feature value and accumulate their class counts.
    ///
    /// Call [`reset`](Self::reset) afterwards, once the routing has been
    /// chosen with [`set_missing_go_to_left`](Self::set_missing_go_to_left).
    pub fn init_missing(&mut self, n_missing: usize) -> Result<()> {
        let n_node_samples = self.n_node_samples();
        ensure!(
            n_missing <= n_node_samples,
            CriterionError::invalid_parameter(
                "n_missing",
                n_missing.to_string(),
                format!("must not exceed the {} samples of the node", n_node_samples),
            )
        );

        self.n_missing = n_missing;
        self.sum_missing.fill(0.0);
        self.weighted_n_missing = 0.0;

        if n_missing == 0 {
            return Ok(());
        }

        if let Some(node) = self.node {
            for &i in &node.sample_indices[self.end - n_missing..self.end] {
                let w = node.sample_weight.weight(i);
                for k in 0..self.n_classes.len() {
                    let c = node.labels[[i, k]] as usize;
                    self.sum_missing[[k, c]] += w;
                }
                self.weighted_n_missing += w;
            }
        }

        log::debug!(
            "criterion missing tail: {} samples, weight {}",
            n_missing,
            self.weighted_n_missing
        );
        Ok(())
    }

    /// Route the missing tail to the left (`true`) or right (`false`) child.
    /// Takes effect at the next [`reset`](Self::reset) or
    /// [`reverse_reset`](Self::reverse_reset).
    pub fn set_missing_go_to_left(&mut self, go_left: bool) {
        self.missing_go_to_left = go_left;
    }

    /// Move the split position to `start`: nothing is selected for the left
    /// child except the missing tail when it is routed left.
    pub fn reset(&mut self) {
        self.pos = self.start;
        let missing_on_left = self.n_missing > 0 && self.missing_go_to_left;
        let (left, right) = move_sums(
            &self.sum_total,
            &self.sum_missing,
            &mut self.sum_left,
            &mut self.sum_right,
            missing_on_left,
            self.weighted_n_node_samples,
            self.weighted_n_missing,
        );
        self.weighted_n_left = left;
        self.weighted_n_right = right;
    }

    /// Move the split position to `end`: everything is on the left child
    /// except the missing tail when it is routed right.
    pub fn reverse_reset(&mut self) {
        self.pos = self.end;
        let missing_on_right = self.n_missing > 0 && !self.missing_go_to_left;
        let (right, left) = move_sums(
            &self.sum_total,
            &self.sum_missing,
            &mut self.sum_right,
            &mut self.sum_left,
            missing_on_right,
            self.weighted_n_node_samples,
            self.weighted_n_missing,
        );
        self.weighted_n_left = left;
        self.weighted_n_right = right;
    }

    /// Move the split position to `new_pos`.
    ///
    /// Only the samples between the current and the new position are
    /// visited, unless rebuilding from the opposite end of the node visits
    /// fewer of them. `sum_right` and `weighted_n_right` are always derived
    /// from the totals, never accumulated.
    ///
    /// `new_pos` must lie in `[start, end - n_missing]`. This is checked in
    /// debug builds only.
    pub fn update(&mut self, new_pos: usize) {
        debug_assert!(
            self.start <= new_pos && new_pos <= self.end - self.n_missing,
            "split position {} outside [{}, {}]",
            new_pos,
            self.start,
            self.end - self.n_missing
        );

        let pos = self.pos;
        let end_non_missing = self.end - self.n_missing;

        if new_pos >= pos {
            if new_pos - pos <= end_non_missing.saturating_sub(new_pos) {
                log::trace!("update {} -> {}: forward", pos, new_pos);
                self.shift_left(pos..new_pos, 1.0);
            } else {
                log::trace!("update {} -> {}: reverse rebuild", pos, new_pos);
                self.reverse_reset();
                self.shift_left((new_pos..end_non_missing).rev(), -1.0);
            }
        } else {
            // samples at or past end_non_missing were never added by position
            let upper = pos.min(end_non_missing);
            if upper.saturating_sub(new_pos) <= new_pos - self.start {
                log::trace!("update {} -> {}: backward", pos, new_pos);
                self.shift_left((new_pos..upper).rev(), -1.0);
            } else {
                log::trace!("update {} -> {}: forward rebuild", pos, new_pos);
                self.reset();
                self.shift_left(self.start..new_pos, 1.0);
            }
        }

        self.weighted_n_right = self.weighted_n_node_samples - self.weighted_n_left;
        Zip::from(&mut self.sum_right)
            .and(&self.sum_total)
            .and(&self.sum_left)
            .for_each(|right, &total, &left| *right = total - left);

        self.pos = new_pos;
    }

    /// Add (`sign = 1.0`) or remove (`sign = -1.0`) the samples at the given
    /// positions to or from the left sums.
    #[inline]
    fn shift_left<I>(&mut self, positions: I, sign: Weight)
    where
        I: Iterator<Item = usize>,
    {
        let Some(node) = self.node else {
            return;
        };
        let n_outputs = self.n_classes.len();

        for p in positions {
            let i = node.sample_indices[p];
            let w = sign * node.sample_weight.weight(i);
            for k in 0..n_outputs {
                // validated by init
                let c = node.labels[[i, k]] as usize;
                self.sum_left[[k, c]] += w;
            }
            self.weighted_n_left += w;
        }
    }

    /// Per-output class distribution of the node (a copy of `sum_total`).
    pub fn node_value(&self) -> Array2<Weight> {
        self.sum_total.clone()
    }

    /// Check the conservation invariants within a relative `tolerance`.
    ///
    /// Intended for tests and debugging; the hot path never calls it.
    pub fn verify_conservation(&self, tolerance: f64) -> Result<()> {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0);

        for (k, &n) in self.n_classes.iter().enumerate() {
            for c in 0..n {
                let total = self.sum_total[[k, c]];
                let split = self.sum_left[[k, c]] + self.sum_right[[k, c]];
                if !close(total, split) {
                    return Err(CriterionError::numerical(format!(
                        "output {} class {}: left + right = {} but total = {}",
                        k, c, split, total
                    )));
                }
            }
        }

        let split = self.weighted_n_left + self.weighted_n_right;
        if !close(self.weighted_n_node_samples, split) {
            return Err(CriterionError::numerical(format!(
                "weighted_n_left + weighted_n_right = {} but weighted_n_node_samples = {}",
                split, self.weighted_n_node_samples
            )));
        }

        Ok(())
    }

    /// Number of outputs
    pub fn n_outputs(&self) -> usize {
        self.n_classes.len()
    }

    /// Number of classes of every output
    pub fn n_classes(&self) -> &[usize] {
        &self.n_classes
    }

    /// Largest class count over all outputs
    pub fn max_n_classes(&self) -> usize {
        self.max_n_classes
    }

    /// First position of the node
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last position of the node
    pub fn end(&self) -> usize {
        self.end
    }

    /// Current split position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of samples in the node
    pub fn n_node_samples(&self) -> usize {
        self.end - self.start
    }

    /// Length of the missing tail
    pub fn n_missing(&self) -> usize {
        self.n_missing
    }

    /// Whether the missing tail is routed to the left child
    pub fn missing_go_to_left(&self) -> bool {
        self.missing_go_to_left
    }

    /// Total weight of the training set
    pub fn weighted_n_samples(&self) -> Weight {
        self.weighted_n_samples
    }

    /// Total weight of the node
    pub fn weighted_n_node_samples(&self) -> Weight {
        self.weighted_n_node_samples
    }

    /// Weight of the left child
    pub fn weighted_n_left(&self) -> Weight {
        self.weighted_n_left
    }

    /// Weight of the right child
    pub fn weighted_n_right(&self) -> Weight {
        self.weighted_n_right
    }

    /// Weight of the missing tail
    pub fn weighted_n_missing(&self) -> Weight {
        self.weighted_n_missing
    }

    /// Weighted class counts of the node
    pub fn sum_total(&self) -> ArrayView2<'_, Weight> {
        self.sum_total.view()
    }

    /// Weighted class counts of the left child
    pub fn sum_left(&self) -> ArrayView2<'_, Weight> {
        self.sum_left.view()
    }

    /// Weighted class counts of the right child
    pub fn sum_right(&self) -> ArrayView2<'_, Weight> {
        self.sum_right.view()
    }

    /// Weighted class counts of the missing tail
    pub fn sum_missing(&self) -> ArrayView2<'_, Weight> {
        self.sum_missing.view()
    }
}

/// Put everything but (optionally) the missing tail on `full`, and nothing
/// but (optionally) the missing tail on `empty`. Returns the weights of
/// `(empty, full)`.
fn move_sums(
    total: &Array2<Weight>,
    missing: &Array2<Weight>,
    empty: &mut Array2<Weight>,
    full: &mut Array2<Weight>,
    missing_in_empty: bool,
    weighted_n_node_samples: Weight,
    weighted_n_missing: Weight,
) -> (Weight, Weight) {
    full.assign(total);
    if missing_in_empty {
        empty.assign(missing);
        *full -= missing;
        (weighted_n_missing, weighted_n_node_samples - weighted_n_missing)
    } else {
        empty.fill(0.0);
        (0.0, weighted_n_node_samples)
    }
}

/// Convert a label to a class index of an output with `n_classes` classes.
fn class_index(label: Label, sample: usize, output: usize, n_classes: usize) -> Result<usize> {
    match label.to_usize() {
        Some(c) if label.fract() == 0.0 && c < n_classes => Ok(c),
        _ => Err(CriterionError::invalid_label(sample, output, label, n_classes)),
    }
}
