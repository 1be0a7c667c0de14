//! Domain layer: instruments, levels, rooms, and the event system.
//!
//! This module contains the relay's domain model: the fixed instrument
//! registry, clamped level values, room identity and state, the lazily
//! populated room store, and the broadcast event bus connecting mutations
//! to WebSocket subscribers.

pub mod event_bus;
pub mod instrument;
pub mod level;
pub mod log_entry;
pub mod role;
pub mod room_event;
pub mod room_id;
pub mod room_state;
pub mod room_store;

pub use event_bus::EventBus;
pub use instrument::Instrument;
pub use level::Level;
pub use log_entry::LogEntry;
pub use role::Role;
pub use room_event::{RoomBroadcast, RoomEvent};
pub use room_id::RoomId;
pub use room_state::{LevelSnapshot, RoomState};
pub use room_store::RoomStore;
