//! Liveness endpoint

use axum::Json;
use serde::Serialize;

/// Body of `GET /health`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Answers as long as the process serves requests; the departure provider
/// is not probed since it is spawned per lookup
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
