//! REST response DTOs.

pub mod room_dto;

pub use room_dto::{InstrumentInfo, RoomLevelsResponse, RoomSummaryDto};
