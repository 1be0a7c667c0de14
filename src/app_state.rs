//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::RelayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay service for all room operations.
    pub relay: Arc<RelayService>,
    /// Event bus WebSocket connections subscribe to.
    pub event_bus: EventBus,
}
