//! System endpoints: liveness, health check, instrument catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::InstrumentInfo;
use crate::app_state::AppState;
use crate::domain::{Instrument, Level};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// `GET /` — Plain-text liveness probe.
///
/// Kept as a bare string so uptime monitors and the serverless keep-alive
/// ping need no JSON parsing.
pub async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "SoundComm relay running")
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/instruments` — The fixed instrument catalog.
#[utoipa::path(
    get,
    path = "/config/instruments",
    tag = "System",
    summary = "List the instrument registry",
    description = "Returns the fixed set of instruments every room tracks, in registry order.",
    responses(
        (status = 200, description = "Instrument catalog", body = Vec<InstrumentInfo>),
    )
)]
pub async fn instruments_handler() -> impl IntoResponse {
    let catalog: Vec<InstrumentInfo> = Instrument::ALL
        .iter()
        .map(|i| InstrumentInfo {
            key: i.key(),
            label: i.label(),
            initial_level: Level::INITIAL.get(),
        })
        .collect();
    (StatusCode::OK, Json(catalog))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
        .route("/config/instruments", get(instruments_handler))
}
