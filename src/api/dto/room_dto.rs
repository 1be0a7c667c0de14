//! DTOs for the room and instrument endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::LevelSnapshot;

/// Summary of one live room, as returned by `GET /api/v1/rooms`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomSummaryDto {
    /// Room name.
    pub room: String,
    /// Current level of every instrument.
    pub levels: LevelSnapshot,
}

/// Snapshot of one room, as returned by `GET /api/v1/rooms/{room}/levels`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomLevelsResponse {
    /// Room name.
    pub room: String,
    /// Current level of every instrument.
    pub levels: LevelSnapshot,
}

/// One entry of the instrument catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InstrumentInfo {
    /// Wire key used in relay payloads.
    pub key: &'static str,
    /// Human-readable display label.
    pub label: &'static str,
    /// Level every room starts this instrument at.
    pub initial_level: u8,
}
