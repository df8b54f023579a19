//! Error taxonomy for the analytics engines.
//!
//! Every precondition violation is surfaced as its own variant so callers
//! can decide whether to abort, re-fetch data or reconfigure. Nothing in
//! this crate retries or substitutes defaults.

use curvefly_core::{CoreError, Tenor};
use curvefly_math::MathError;
use thiserror::Error;

/// Error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The input cannot support the computation: too few rows, a constant
    /// column, a singular covariance, or a NaN/infinite/out-of-domain cell.
    #[error("degenerate input: {reason}")]
    DegenerateInput {
        /// What made the input unusable.
        reason: String,
    },

    /// A maturity the engine was configured for is not a column of the input.
    #[error("missing maturity column: {tenor}")]
    MissingMaturity {
        /// The absent maturity.
        tenor: Tenor,
    },

    /// Results were requested before a successful fit.
    #[error("{what} requested before a successful fit")]
    NotFitted {
        /// What was requested.
        what: String,
    },

    /// Rolling window size is non-positive or unusable.
    #[error("invalid window {window}: {reason}")]
    InvalidWindow {
        /// The rejected window size.
        window: usize,
        /// Why it was rejected.
        reason: String,
    },

    /// Engine configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Numerical routine failed (e.g. eigen solver did not converge).
    #[error("math error: {0}")]
    Math(MathError),

    /// Table construction failed.
    #[error("table error: {0}")]
    Table(#[from] CoreError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Creates a not fitted error.
    #[must_use]
    pub fn not_fitted(what: impl Into<String>) -> Self {
        Self::NotFitted { what: what.into() }
    }

    /// Creates an invalid window error.
    #[must_use]
    pub fn invalid_window(window: usize, reason: impl Into<String>) -> Self {
        Self::InvalidWindow {
            window,
            reason: reason.into(),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ZeroVariance { .. } | MathError::InsufficientData { .. } => {
                AnalyticsError::degenerate(err.to_string())
            }
            other => AnalyticsError::Math(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::MissingMaturity {
            tenor: Tenor::Years(30),
        };
        assert_eq!(err.to_string(), "missing maturity column: 30Y");

        let err = AnalyticsError::invalid_window(0, "must be at least 2");
        assert!(err.to_string().contains("invalid window 0"));

        let err = AnalyticsError::not_fitted("loadings");
        assert_eq!(err.to_string(), "loadings requested before a successful fit");
    }

    #[test]
    fn test_math_error_mapping() {
        let err: AnalyticsError = MathError::ZeroVariance { column: 2 }.into();
        assert!(matches!(err, AnalyticsError::DegenerateInput { .. }));

        let err: AnalyticsError = MathError::convergence_failed("symmetric eigen", 10).into();
        assert!(matches!(err, AnalyticsError::Math(_)));
    }
}
