//! Constants and defaults for split criteria.

use crate::core::types::*;

/// Weight assigned to every sample when no weights are supplied.
pub const DEFAULT_SAMPLE_WEIGHT: Weight = 1.0;

/// Default relative tolerance used when checking that left and right sums
/// add up to the node totals.
pub const DEFAULT_CONSERVATION_TOLERANCE: f64 = 1e-9;

/// Default impurity functional.
pub const DEFAULT_IMPURITY: ImpurityKind = ImpurityKind::Gini;

/// Default routing of samples with a missing feature value.
pub const DEFAULT_MISSING_GO_TO_LEFT: bool = false;

/// Environment variable overriding the impurity functional.
pub const ENV_IMPURITY: &str = "SPLIT_CRITERION_IMPURITY";

/// Environment variable overriding the class counts (comma separated).
pub const ENV_N_CLASSES: &str = "SPLIT_CRITERION_N_CLASSES";

/// Environment variable overriding the missing-value routing.
pub const ENV_MISSING_GO_TO_LEFT: &str = "SPLIT_CRITERION_MISSING_GO_TO_LEFT";

/// Version information.
pub const SPLIT_CRITERION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile-time assertions on the defaults.
#[cfg(test)]
mod compile_time_assertions {
    use super::*;
    use static_assertions::*;

    const_assert!(DEFAULT_SAMPLE_WEIGHT > 0.0);
    const_assert!(DEFAULT_CONSERVATION_TOLERANCE > 0.0);
    const_assert!(DEFAULT_CONSERVATION_TOLERANCE < 1e-6);
    assert_eq_size!(SampleIndex, usize);
}
