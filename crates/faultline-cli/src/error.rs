//! CLI error types.

use std::process::ExitCode;

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the input or writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The analysis engine rejected the input or configuration.
    #[error(transparent)]
    Core(#[from] faultline_core::FaultlineError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The run was interrupted before it finished.
    #[error("analysis cancelled")]
    Cancelled,
}

impl CliError {
    /// Process exit code for this error. Interrupts use the shell's 128 + SIGINT.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Cancelled => ExitCode::from(130),
            _ => ExitCode::FAILURE,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
