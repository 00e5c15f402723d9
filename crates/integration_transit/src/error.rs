//! Transit error types

use thiserror::Error;

/// Errors that can occur while querying the departure provider
#[derive(Debug, Error)]
pub enum TransitError {
    /// The provider process could not be started
    #[error("Failed to start departure provider '{command}': {reason}")]
    SpawnFailed {
        /// Command that was executed
        command: String,
        /// Underlying I/O error
        reason: String,
    },

    /// The provider did not finish in time
    #[error("Departure provider timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The provider exited without writing anything to stdout
    #[error("Departure provider produced no output")]
    NoOutput,

    /// The provider output is not a valid departure document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider wrote more than the configured limit
    #[error("Departure provider output exceeded {limit} bytes")]
    OutputTooLarge {
        /// Configured output limit
        limit: usize,
    },

    /// The station name cannot be passed to the provider
    #[error("Invalid station: {0}")]
    InvalidStation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TransitError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NoOutput)
    }
}
