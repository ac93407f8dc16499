//! # split-criterion
//!
//! Impurity-based split criteria for decision-tree induction over weighted,
//! multi-output categorical targets.
//!
//! ## Features
//!
//! - **Incremental statistics**: moving the split position across a sorted
//!   node updates the left/right weighted class counts in time proportional
//!   to the number of samples moved, never to the size of the node.
//! - **Missing values**: samples with a missing feature value form a tail of
//!   the node that is routed to either child as a whole.
//! - **Multi-output targets**: every output has its own number of classes;
//!   impurities are averaged over outputs.
//! - **Impurity functionals**: Gini index, Shannon entropy and
//!   misclassification rate.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use split_criterion::{
//!     ClassificationCriterion, Criterion, CriterionConfigBuilder, ImpurityKind, NodeSamples,
//! };
//!
//! # fn main() -> split_criterion::Result<()> {
//! split_criterion::init()?;
//!
//! let config = CriterionConfigBuilder::new()
//!     .impurity(ImpurityKind::Gini)
//!     .add_output(2)
//!     .build()?;
//!
//! // samples sorted by the feature being scanned
//! let labels = array![[0.0], [1.0], [0.0], [1.0], [1.0]];
//! let sorted = [0, 2, 1, 3, 4];
//!
//! let mut criterion = ClassificationCriterion::new(&config)?;
//! criterion.init(NodeSamples::new(labels.view(), &sorted, 0, sorted.len()))?;
//!
//! let mut best = (f64::NEG_INFINITY, 0);
//! for pos in 1..sorted.len() {
//!     criterion.update(pos);
//!     let proxy = criterion.proxy_impurity_improvement();
//!     if proxy > best.0 {
//!         best = (proxy, pos);
//!     }
//! }
//! assert_eq!(best.1, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: types, constants, error handling and logging setup
//! - [`config`]: criterion configuration, files and environment overrides
//! - [`criterion`]: partition statistics, impurity measures and the
//!   classification criterion

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Split criteria
pub mod criterion;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{CriterionError, Result},
    types::*,
};

// Re-export configuration functionality
pub use config::{config_from_map, ConfigFormat, CriterionConfig, CriterionConfigBuilder};

// Re-export criterion functionality
pub use criterion::{
    ClassificationCriterion, Criterion, Entropy, Gini, ImpurityMeasure, Misclassification,
    NodeSamples, PartitionStatistics,
};

// Version information
pub use crate::core::constants::SPLIT_CRITERION_VERSION as VERSION;

/// Initialize the library.
///
/// Installs an `env_logger` logger honoring `RUST_LOG` (default `info`)
/// unless the application already installed one. Calling it more than once
/// is harmless; the criteria work without it.
///
/// # Examples
///
/// ```rust
/// fn main() -> split_criterion::Result<()> {
///     split_criterion::init()?;
///     assert!(split_criterion::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
