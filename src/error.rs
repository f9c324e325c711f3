//! Top-level error types for the CLI and library entry points.
//!
//! Packaging failures are reported as [`crate::bundler::Error`]; this module
//! wraps them together with argument errors so `main` has a single type to
//! print.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error(transparent)]
    Cli(#[from] CliError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Argument problems exit with the same code clap uses for usage errors.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, BundlerError::Cli(_))
    }
}
