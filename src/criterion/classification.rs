//! Classification criterion: partition statistics scored by an impurity.

use ndarray::Array2;

use crate::config::CriterionConfig;
use crate::core::error::Result;
use crate::core::types::{ImpurityKind, Weight};
use crate::criterion::impurity::ImpurityMeasure;
use crate::criterion::statistics::{NodeSamples, PartitionStatistics};
use crate::criterion::Criterion;

/// Criterion for classification trees over weighted, multi-output
/// categorical targets.
///
/// One instance is reused for every node evaluated by a single tree builder;
/// its buffers are allocated once at construction.
#[derive(Debug, Clone)]
pub struct ClassificationCriterion<'a> {
    statistics: PartitionStatistics<'a>,
    impurity: ImpurityKind,
}

impl<'a> ClassificationCriterion<'a> {
    /// Create a criterion from a validated configuration.
    pub fn new(config: &CriterionConfig) -> Result<Self> {
        config.validate()?;
        let mut statistics = PartitionStatistics::new(&config.n_classes)?;
        statistics.set_missing_go_to_left(config.missing_go_to_left);

        log::debug!(
            "created {} criterion: {} outputs, max {} classes",
            config.impurity,
            config.n_outputs(),
            config.max_n_classes()
        );

        Ok(ClassificationCriterion {
            statistics,
            impurity: config.impurity,
        })
    }

    /// Create a criterion with default routing of missing values.
    pub fn with_impurity(impurity: ImpurityKind, n_classes: &[usize]) -> Result<Self> {
        Self::new(&CriterionConfig {
            impurity,
            n_classes: n_classes.to_vec(),
            ..CriterionConfig::default()
        })
    }

    /// Bind the criterion to a node. See [`PartitionStatistics::init`].
    pub fn init(&mut self, node: NodeSamples<'a>) -> Result<()> {
        self.statistics.init(node)
    }

    /// Declare the missing tail of the node. See
    /// [`PartitionStatistics::init_missing`].
    pub fn init_missing(&mut self, n_missing: usize) -> Result<()> {
        self.statistics.init_missing(n_missing)
    }

    /// Route the missing tail left or right from the next reset on.
    pub fn set_missing_go_to_left(&mut self, go_left: bool) {
        self.statistics.set_missing_go_to_left(go_left);
    }

    /// Per-output class distribution of the node.
    pub fn node_value(&self) -> Array2<Weight> {
        self.statistics.node_value()
    }

    /// Impurity functional in use
    pub fn impurity_kind(&self) -> ImpurityKind {
        self.impurity
    }

    /// Underlying partition statistics
    pub fn statistics(&self) -> &PartitionStatistics<'a> {
        &self.statistics
    }

    /// Current split position
    pub fn pos(&self) -> usize {
        self.statistics.pos()
    }
}

impl<'a> Criterion for ClassificationCriterion<'a> {
    fn reset(&mut self) {
        self.statistics.reset();
    }

    fn reverse_reset(&mut self) {
        self.statistics.reverse_reset();
    }

    fn update(&mut self, new_pos: usize) {
        self.statistics.update(new_pos);
    }

    fn node_impurity(&self) -> f64 {
        debug_assert!(
            self.statistics.weighted_n_node_samples() > 0.0,
            "impurity of an empty node"
        );
        self.impurity.node_impurity(&self.statistics)
    }

    fn children_impurity(&self) -> (f64, f64) {
        self.impurity.children_impurity(&self.statistics)
    }

    fn weighted_n_samples(&self) -> Weight {
        self.statistics.weighted_n_samples()
    }

    fn weighted_n_node_samples(&self) -> Weight {
        self.statistics.weighted_n_node_samples()
    }

    fn weighted_n_left(&self) -> Weight {
        self.statistics.weighted_n_left()
    }

    fn weighted_n_right(&self) -> Weight {
        self.statistics.weighted_n_right()
    }
}
