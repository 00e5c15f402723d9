//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Request could not be decoded or lacks required fields
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl DomainError {
    /// Create a malformed request error for a missing field
    pub fn missing_field(field: &str) -> Self {
        Self::MalformedRequest(format!("missing required field `{field}`"))
    }
}
