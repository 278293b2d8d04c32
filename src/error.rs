//! Error handling
//!
//! Every error is fatal to a benchmark run. Binaries report the `Display` form on standard error
//! and exit with status 1.

use std::collections::TryReserveError;

use thiserror::Error;

/// Invalid or missing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("environment variable {var} is not set")]
    Missing {
        /// Name of the variable
        var: &'static str,
    },
    /// A value does not parse as an integer
    #[error("{var}={value:?} is not a valid integer")]
    NotANumber {
        /// Name of the variable or parameter
        var: &'static str,
        /// The offending text
        value: String,
    },
    /// A count that must be at least one is not
    #[error("{var} must be a positive integer, got {value}")]
    NonPositive {
        /// Name of the variable or parameter
        var: &'static str,
        /// The offending value
        value: i64,
    },
    /// A value lies outside its documented range
    #[error("{var}={value} is outside the range [{min}, {max}]")]
    OutOfRange {
        /// Name of the variable or parameter
        var: &'static str,
        /// The offending value
        value: i64,
        /// Smallest accepted value
        min: usize,
        /// Largest accepted value
        max: usize,
    },
}

/// Errors that terminate a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration was rejected before any work was done
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A parallel result disagrees with the reference sum
    #[error("sum mismatch! {parallel} vs {reference} (tolerance {tolerance:e})")]
    Mismatch {
        /// Result of the strategy under test
        parallel: String,
        /// Result of the sequential reference
        reference: String,
        /// Tolerance the comparison used
        tolerance: f64,
    },
    /// The input array could not be allocated
    #[error("failed to allocate an array of {elements} elements")]
    Allocation {
        /// Requested number of elements
        elements: usize,
        /// Allocator failure
        #[source]
        source: TryReserveError,
    },
    /// The worker thread pool could not be started
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// A collective operation could not complete
    #[error("collective {operation} failed: {reason}")]
    Collective {
        /// Name of the collective
        operation: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl BenchError {
    pub(crate) fn collective(operation: &'static str, reason: impl Into<String>) -> Self {
        BenchError::Collective {
            operation,
            reason: reason.into(),
        }
    }
}

/// Result type used throughout the crate
pub type Result<T, E = BenchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_variable() {
        let err = ConfigError::OutOfRange {
            var: "SIZE",
            value: 5,
            min: 100_000,
            max: 10_000_000,
        };
        assert_eq!(
            err.to_string(),
            "SIZE=5 is outside the range [100000, 10000000]"
        );

        let err: BenchError = ConfigError::Missing { var: "NUM_THREADS" }.into();
        assert_eq!(err.to_string(), "environment variable NUM_THREADS is not set");
    }

    #[test]
    fn mismatch_reports_both_values() {
        let err = BenchError::Mismatch {
            parallel: "14".into(),
            reference: "15".into(),
            tolerance: 0.0,
        };
        let text = err.to_string();
        assert!(text.contains("14 vs 15"));
    }
}
