//! Error types for the Curvefly core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core type construction and data retrieval.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date parsing or an out-of-range date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor string could not be parsed.
    #[error("Invalid tenor '{value}': {reason}")]
    InvalidTenor {
        /// The offending input.
        value: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// A table's shape, dates or columns are inconsistent.
    #[error("Invalid table: {reason}")]
    InvalidTable {
        /// Description of what's inconsistent.
        reason: String,
    },

    /// Upstream market data could not be retrieved.
    #[error("Data unavailable from {source_name}: {reason}")]
    DataUnavailable {
        /// Name of the data source.
        source_name: String,
        /// Description of the failure.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid table error.
    #[must_use]
    pub fn invalid_table(reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            reason: reason.into(),
        }
    }

    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
