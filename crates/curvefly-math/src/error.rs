//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iterative algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations in {algorithm}")]
    ConvergenceFailed {
        /// Name of the algorithm.
        algorithm: String,
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// A column has no dispersion and cannot be standardised.
    #[error("Column {column} has zero variance")]
    ZeroVariance {
        /// Zero-based column index.
        column: usize,
    },

    /// Matrix dimensions are incompatible.
    #[error("Incompatible matrix dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first matrix.
        rows1: usize,
        /// Columns in first matrix.
        cols1: usize,
        /// Rows in second matrix.
        rows2: usize,
        /// Columns in second matrix.
        cols2: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(algorithm: impl Into<String>, iterations: usize) -> Self {
        Self::ConvergenceFailed {
            algorithm: algorithm.into(),
            iterations,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed("symmetric eigen", 1000);
        assert!(err.to_string().contains("1000 iterations"));

        let err = MathError::insufficient_data(5, 3);
        assert_eq!(err.to_string(), "Insufficient data: need at least 5, got 3");
    }
}
