//! Skill request handler

use application::ApplicationError;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::SkillRequest;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Handle one skill request
///
/// Responds with the envelope, or `204 No Content` for session start and
/// session end notifications.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn handle_skill(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = SkillRequest::from_json(&body).map_err(ApplicationError::from)?;

    match state.skill.handle(request).await? {
        Some(envelope) => Ok(Json(envelope).into_response()),
        None => {
            debug!("No response body for this turn");
            Ok(StatusCode::NO_CONTENT.into_response())
        },
    }
}
