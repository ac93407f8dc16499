//! Error handling and error types for split criteria.
//!
//! Configuration problems (malformed class counts, out-of-range labels, bad
//! node ranges) are reported through [`CriterionError`] when a criterion is
//! constructed or initialized for a node. The per-step operations (`reset`,
//! `update`, impurity evaluation) are infallible by contract.

use std::io;
use thiserror::Error;

/// Main error type for the split criterion library.
#[derive(Error, Debug)]
pub enum CriterionError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// A label that is not a valid class index for its output
    #[error("Invalid label {value} for sample {sample}, output {output}: expected a class index in [0, {n_classes})")]
    InvalidLabel {
        sample: usize,
        output: usize,
        value: f64,
        n_classes: usize,
    },

    /// Node range outside of the sample index buffer
    #[error("Invalid node range [{start}, {end}) for {length} sample indices")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Out of bounds access
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Numerical computation errors (drift, NaN)
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using CriterionError
pub type Result<T> = std::result::Result<T, CriterionError>;

impl CriterionError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CriterionError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        CriterionError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid label error
    pub fn invalid_label(sample: usize, output: usize, value: f64, n_classes: usize) -> Self {
        CriterionError::InvalidLabel {
            sample,
            output,
            value,
            n_classes,
        }
    }

    /// Create an invalid range error
    pub fn invalid_range(start: usize, end: usize, length: usize) -> Self {
        CriterionError::InvalidRange { start, end, length }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        CriterionError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        CriterionError::IndexOutOfBounds { index, length }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        CriterionError::Numerical {
            message: message.into(),
        }
    }

    /// Whether the error was raised while validating configuration or node
    /// inputs. A criterion that failed this way must be re-initialized.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CriterionError::Config { .. }
                | CriterionError::InvalidParameter { .. }
                | CriterionError::InvalidLabel { .. }
                | CriterionError::InvalidRange { .. }
                | CriterionError::DimensionMismatch { .. }
                | CriterionError::IndexOutOfBounds { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            CriterionError::Config { .. } => "config",
            CriterionError::InvalidParameter { .. } => "invalid_parameter",
            CriterionError::InvalidLabel { .. } => "invalid_label",
            CriterionError::InvalidRange { .. } => "invalid_range",
            CriterionError::DimensionMismatch { .. } => "dimension_mismatch",
            CriterionError::IndexOutOfBounds { .. } => "index_out_of_bounds",
            CriterionError::Numerical { .. } => "numerical",
            CriterionError::IO { .. } => "io",
            CriterionError::Json { .. } => "json",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::CriterionError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::CriterionError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
