//! Core data types shared by the partition statistics and impurity measures.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::DEFAULT_SAMPLE_WEIGHT;
use crate::core::error::CriterionError;

/// Position of a sample in the training set (row of the label matrix).
pub type SampleIndex = usize;

/// Target value type. Each entry holds a class index encoded as a float.
pub type Label = f64;

/// Sample weight and weighted-count type.
pub type Weight = f64;

/// Impurity functional used to score a node and its candidate children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpurityKind {
    /// Gini index, `1 - sum p_c^2`
    Gini,
    /// Shannon entropy in bits, `-sum p_c log2 p_c`
    Entropy,
    /// Misclassification rate, `1 - max_c p_c`
    Misclassification,
}

impl Default for ImpurityKind {
    fn default() -> Self {
        ImpurityKind::Gini
    }
}

impl fmt::Display for ImpurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpurityKind::Gini => write!(f, "gini"),
            ImpurityKind::Entropy => write!(f, "entropy"),
            ImpurityKind::Misclassification => write!(f, "misclassification"),
        }
    }
}

impl FromStr for ImpurityKind {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gini" => Ok(ImpurityKind::Gini),
            "entropy" | "log_loss" => Ok(ImpurityKind::Entropy),
            "misclassification" | "error" => Ok(ImpurityKind::Misclassification),
            other => Err(CriterionError::invalid_parameter(
                "impurity",
                other,
                "expected one of gini, entropy, misclassification",
            )),
        }
    }
}

/// Per-sample weight lookup.
///
/// `Uniform` stands for the absence of sample weights: every sample counts
/// with weight `1.0`. The lookup is resolved at each call site through
/// [`SampleWeights::weight`].
#[derive(Debug, Clone, Copy)]
pub enum SampleWeights<'a> {
    /// Every sample has weight 1.0
    Uniform,
    /// Explicit non-negative weight per sample index
    Explicit(ArrayView1<'a, Weight>),
}

impl<'a> SampleWeights<'a> {
    /// Weight of the sample at `index`.
    #[inline]
    pub fn weight(&self, index: SampleIndex) -> Weight {
        match self {
            SampleWeights::Uniform => DEFAULT_SAMPLE_WEIGHT,
            SampleWeights::Explicit(weights) => weights[index],
        }
    }

    /// Number of samples covered by an explicit lookup.
    pub fn len(&self) -> Option<usize> {
        match self {
            SampleWeights::Uniform => None,
            SampleWeights::Explicit(weights) => Some(weights.len()),
        }
    }

    /// Whether weights are implicit.
    pub fn is_uniform(&self) -> bool {
        matches!(self, SampleWeights::Uniform)
    }
}

impl<'a> Default for SampleWeights<'a> {
    fn default() -> Self {
        SampleWeights::Uniform
    }
}

impl<'a> From<Option<ArrayView1<'a, Weight>>> for SampleWeights<'a> {
    fn from(weights: Option<ArrayView1<'a, Weight>>) -> Self {
        weights.map_or(SampleWeights::Uniform, SampleWeights::Explicit)
    }
}
