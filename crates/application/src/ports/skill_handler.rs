//! Inbound skill port
//!
//! The single entry point both transports (HTTP server and one-shot CLI
//! invocation) hand decoded requests to.

use async_trait::async_trait;
use domain::{ResponseEnvelope, SkillRequest};

use crate::error::ApplicationError;

/// Handles one skill request per call
#[async_trait]
pub trait SkillRequestHandler: Send + Sync {
    /// Produce the response envelope for `request`
    ///
    /// `Ok(None)` means the turn has no response body (session start and
    /// session end notifications).
    async fn handle(
        &self,
        request: SkillRequest,
    ) -> Result<Option<ResponseEnvelope>, ApplicationError>;
}
