//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health::health_check))
        // Skill API (v1)
        .route("/v1/skill", post(handlers::skill::handle_skill))
        .with_state(state)
}

/// Create the router with its middleware stack
///
/// Layers from outermost: request id, tracing, body size limit.
pub fn create_app(state: AppState, max_body_bytes: usize) -> Router {
    create_router(state)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer)
}
