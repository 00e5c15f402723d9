//! API error handling
//!
//! Maps application failures to HTTP status codes with a JSON body that
//! doesn't leak implementation details.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Identity mismatch: {0}")]
    IdentityMismatch(String),

    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::IdentityMismatch(_) => StatusCode::FORBIDDEN,
            Self::InvalidIntent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "malformed_request",
            Self::IdentityMismatch(_) => "identity_mismatch",
            Self::InvalidIntent(_) => "invalid_intent",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, details) = match &self {
            Self::MalformedRequest(msg) => ("Malformed request".to_string(), Some(msg.clone())),
            Self::IdentityMismatch(msg) => {
                // Never echo the configured application id back
                warn!(reason = %msg, "Rejected request for foreign application");
                ("Application id mismatch".to_string(), None)
            },
            Self::InvalidIntent(name) => ("Invalid intent".to_string(), Some(name.clone())),
            Self::ServiceUnavailable(msg) => {
                warn!(reason = %msg, "Service unavailable");
                ("Service temporarily unavailable".to_string(), None)
            },
            Self::Internal(msg) => {
                error!(reason = %msg, "Internal error");
                ("An internal error occurred".to_string(), None)
            },
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
            details,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::MalformedRequest(e.to_string()),
            e @ ApplicationError::IdentityMismatch { .. } => Self::IdentityMismatch(e.to_string()),
            ApplicationError::InvalidIntent(name) => Self::InvalidIntent(name),
            ApplicationError::LookupFailure(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
