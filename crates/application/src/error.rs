//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (malformed request)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Intent name the skill does not know
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    /// Request addressed to a different application
    #[error("Invalid application id: expected {expected}, got {actual}")]
    IdentityMismatch {
        /// Configured application id
        expected: String,
        /// Application id found in the request
        actual: String,
    },

    /// Departure provider produced no usable answer
    #[error("Departure lookup failed: {0}")]
    LookupFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether this error must reach the transport instead of being
    /// turned into a spoken apology
    pub const fn is_hard_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InvalidIntent(_) | Self::IdentityMismatch { .. }
        )
    }
}
