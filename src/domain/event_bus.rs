//! Broadcast channel for room events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every relay
//! operation that affects a room publishes a [`RoomEvent`] through the bus,
//! and each WebSocket connection subscribes once and filters by its current
//! room. Publish order is delivery order for all subscribers.

use tokio::sync::broadcast;

use super::RoomEvent;

/// Broadcast bus for [`RoomEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers; delivery is fire-and-forget with no confirmation.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RoomEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event. With no
    /// active receivers the event is silently dropped.
    pub fn publish(&self, event: RoomEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will see all future events.
    ///
    /// Each WebSocket connection calls this once on connect.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
