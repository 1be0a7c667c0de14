//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; system endpoints
//! (liveness, health, instrument catalog) live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "soundcomm-relay",
        description = "Read-only REST surface of the SoundComm level relay. The relay protocol itself runs over WebSocket at /ws."
    ),
    paths(
        handlers::system::health_handler,
        handlers::system::instruments_handler,
        handlers::room::list_rooms,
        handlers::room::get_room_levels,
    ),
    components(schemas(
        handlers::system::HealthResponse,
        dto::InstrumentInfo,
        dto::RoomSummaryDto,
        dto::RoomLevelsResponse,
        crate::domain::Instrument,
        crate::domain::Level,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "System", description = "Liveness and configuration"),
        (name = "Rooms", description = "Read-only room snapshots"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
