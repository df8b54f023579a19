//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No yield file was configured.
    #[error("No yield data file given. Pass --data or set data.path in the configuration file.")]
    MissingDataPath,

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(String),
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
