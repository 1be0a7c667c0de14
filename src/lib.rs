//! # soundcomm-relay
//!
//! WebSocket relay coordinating live audio-instrument levels between two
//! roles sharing a room: the requester on stage and the operator at the
//! sound booth. Every mutation broadcasts a full level snapshot and an
//! append-only log entry to all room members.
//!
//! State is volatile and scoped to the running process; rooms are created
//! lazily on first reference and never persisted.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)        join / request / adjust / ack / reset
//!     ├── REST Handlers (api/)    read-only snapshots, health
//!     │
//!     ├── RelayService (service/)
//!     ├── EventBus (domain/)      room-filtered broadcast fan-out
//!     │
//!     └── RoomStore (domain/)     per-room clamped instrument levels
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
