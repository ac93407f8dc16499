//! Core infrastructure for split criteria.
//!
//! - [`types`]: fundamental aliases, the impurity selector and the weight lookup
//! - [`constants`]: defaults and environment variable names
//! - [`error`]: the crate error type
//!
//! ```rust
//! use split_criterion::core::{
//!     constants::DEFAULT_CONSERVATION_TOLERANCE,
//!     error::{CriterionError, Result},
//!     types::{ImpurityKind, SampleWeights},
//! };
//!
//! let kind: ImpurityKind = "entropy".parse()?;
//! assert_eq!(kind, ImpurityKind::Entropy);
//! assert_eq!(SampleWeights::Uniform.weight(3), 1.0);
//! assert!(DEFAULT_CONSERVATION_TOLERANCE > 0.0);
//! # Ok::<(), CriterionError>(())
//! ```

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{CriterionError, Result};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static LOGGING_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the logging subsystem once per process.
///
/// Uses `RUST_LOG` when set and falls back to the `info` level otherwise.
/// A logger installed by the host application is left untouched.
pub fn initialize_core() -> Result<()> {
    LOGGING_INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env).try_init();
        CORE_INITIALIZED.store(true, Ordering::Release);
        log::debug!("split-criterion {} initialized", SPLIT_CRITERION_VERSION);
    });
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::Acquire)
}
