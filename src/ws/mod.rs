//! WebSocket layer: connection handling, wire protocol, sessions.
//!
//! The WebSocket endpoint at `/ws` carries the whole relay protocol:
//! room joins, level requests, adjustments, acknowledgements, and resets.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod session;
