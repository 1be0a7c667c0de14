//! Read-only room endpoints.
//!
//! The REST surface never creates rooms: lazy creation belongs to the relay
//! path (join, level request, adjust). Reading an untouched room is a 404.

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;

use crate::api::dto::{RoomLevelsResponse, RoomSummaryDto};
use crate::app_state::AppState;
use crate::domain::RoomId;
use crate::error::{ErrorResponse, RelayError};

/// `GET /rooms` — List all live rooms with their current levels.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    summary = "List live rooms",
    description = "Returns every room touched since process start, with its current level snapshot.",
    responses(
        (status = 200, description = "Live room list", body = Vec<RoomSummaryDto>),
    )
)]
pub async fn list_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let rooms = state.relay.store().list().await;
    let summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|(room, levels)| RoomSummaryDto {
            room: room.to_string(),
            levels,
        })
        .collect();
    Json(summaries)
}

/// `GET /rooms/{room}/levels` — Current level snapshot of one room.
///
/// # Errors
///
/// Returns [`RelayError::RoomNotFound`] if the room has never been touched.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room}/levels",
    tag = "Rooms",
    summary = "Get a room's level snapshot",
    description = "Returns the full current instrument-level mapping of a room. Does not create the room.",
    params(
        ("room" = String, Path, description = "Room name"),
    ),
    responses(
        (status = 200, description = "Current snapshot", body = RoomLevelsResponse),
        (status = 404, description = "Room has never been touched", body = ErrorResponse),
    )
)]
pub async fn get_room_levels(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<RoomLevelsResponse>, RelayError> {
    let room = RoomId::new(room);
    let levels = state
        .relay
        .store()
        .get(&room)
        .await
        .ok_or_else(|| RelayError::RoomNotFound(room.to_string()))?;

    Ok(Json(RoomLevelsResponse {
        room: room.to_string(),
        levels,
    }))
}

/// Room routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/{room}/levels", get(get_room_levels))
}
