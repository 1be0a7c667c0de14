//! Relay service: orchestrates room mutations and event fan-out.
//!
//! [`RelayService`] is the core of the relay. Every inbound command follows
//! the same pattern: resolve the target room (payload room → session room →
//! default), mutate the [`RoomStore`] if applicable, then publish the
//! resulting snapshot and/or log entry to the room through the [`EventBus`].
//! All operations are infallible: malformed input has already been defaulted
//! by the parse step, and publishing to an empty bus is a no-op.

use std::sync::Arc;

use crate::domain::{
    EventBus, Instrument, Level, LevelSnapshot, LogEntry, Role, RoomEvent, RoomId, RoomStore,
};
use crate::ws::session::RoomSession;

/// Orchestration layer for all relay operations.
///
/// Stateless coordinator: owns references to [`RoomStore`] for state and
/// [`EventBus`] for broadcasts. Injected into every connection task via
/// [`crate::app_state::AppState`], so tests run against a fresh store.
#[derive(Debug, Clone)]
pub struct RelayService {
    store: Arc<RoomStore>,
    event_bus: EventBus,
}

impl RelayService {
    /// Creates a new `RelayService`.
    #[must_use]
    pub fn new(store: Arc<RoomStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`RoomStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<RoomStore> {
        &self.store
    }

    /// Attaches the session to a room, leaving any previous room first.
    ///
    /// Ensures the room's state exists, broadcasts a join notice to the whole
    /// room, and returns the current snapshot for the joiner-only reply. The
    /// departed room, if different, receives a leave notice.
    pub async fn join(
        &self,
        session: &mut RoomSession,
        room: Option<RoomId>,
        role: Role,
    ) -> LevelSnapshot {
        // Join targets the explicit room or the default, never the
        // session's previous room.
        let target = RoomId::resolve(room, None);

        if let Some(old) = session.room.take()
            && old != target
        {
            self.publish_leave(&old, session);
        }
        session.room = Some(target.clone());
        session.role = role;

        let snapshot = self.store.snapshot(&target).await;
        let entry = LogEntry::new(role, format!("Joined room {target}"), session.id.to_string());
        let _ = self.event_bus.publish(RoomEvent::log(target.clone(), entry));

        tracing::info!(room = %target, conn = %session.id, role = %role, "joined room");
        snapshot
    }

    /// Returns the target room's snapshot for a sender-only reply.
    /// Read-only apart from lazily creating the room.
    pub async fn request_levels(
        &self,
        session: &RoomSession,
        room: Option<RoomId>,
    ) -> LevelSnapshot {
        let target = RoomId::resolve(room, session.room.as_ref());
        self.store.snapshot(&target).await
    }

    /// Broadcasts an informational request from the stage side.
    /// No state mutation.
    pub async fn requester_action(
        &self,
        session: &RoomSession,
        room: Option<RoomId>,
        instrument: Option<Instrument>,
        action: &str,
        text: Option<String>,
    ) {
        let target = RoomId::resolve(room, session.room.as_ref());
        let text = text.unwrap_or_else(|| {
            format!("{} – {action}", Instrument::label_or_unknown(instrument))
        });
        let entry = LogEntry::new(Role::Requester, text, session.id.to_string());
        let _ = self.event_bus.publish(RoomEvent::log(target, entry));
    }

    /// Clamp-adjusts one instrument's level and broadcasts the new snapshot
    /// followed by a log entry.
    ///
    /// A zero delta is a no-op on the value but still broadcasts. An unknown
    /// instrument mutates nothing yet still broadcasts the unchanged
    /// snapshot and an "Unknown"-labeled entry.
    pub async fn operator_adjust(
        &self,
        session: &RoomSession,
        room: Option<RoomId>,
        instrument: Option<Instrument>,
        delta: i64,
        text: Option<String>,
    ) {
        let target = RoomId::resolve(room, session.room.as_ref());

        let (next, snapshot) = match instrument {
            Some(instrument) => {
                let (_, next, snapshot) = self.store.adjust(&target, instrument, delta).await;
                (next, snapshot)
            }
            None => (
                Level::INITIAL.adjust(delta),
                self.store.snapshot(&target).await,
            ),
        };

        let _ = self
            .event_bus
            .publish(RoomEvent::levels(target.clone(), snapshot));

        let (verb, code) = if delta > 0 {
            ("Increased", "IC")
        } else {
            ("Lowered", "LV")
        };
        let text = text.unwrap_or_else(|| {
            format!(
                "{} – {verb} to {next} ({code})",
                Instrument::label_or_unknown(instrument)
            )
        });
        let entry = LogEntry::new(Role::Operator, text, session.id.to_string());
        let _ = self.event_bus.publish(RoomEvent::log(target.clone(), entry));

        tracing::info!(room = %target, conn = %session.id, delta, level = %next, "level adjusted");
    }

    /// Broadcasts a booth-side acknowledgement. No state mutation.
    pub async fn operator_ack(
        &self,
        session: &RoomSession,
        room: Option<RoomId>,
        instrument: Option<Instrument>,
        text: Option<String>,
    ) {
        let target = RoomId::resolve(room, session.room.as_ref());
        let text = text.unwrap_or_else(|| match instrument {
            Some(instrument) => format!("{} – Received ✅", instrument.label()),
            None => "RECEIVED ✅".to_string(),
        });
        let entry = LogEntry::new(Role::Operator, text, session.id.to_string());
        let _ = self.event_bus.publish(RoomEvent::log(target, entry));
    }

    /// Overwrites the room's levels with defaults and broadcasts the fresh
    /// snapshot followed by a "Levels reset" entry.
    pub async fn reset_levels(&self, session: &RoomSession, room: Option<RoomId>) {
        let target = RoomId::resolve(room, session.room.as_ref());
        let snapshot = self.store.reset(&target).await;

        let _ = self
            .event_bus
            .publish(RoomEvent::levels(target.clone(), snapshot));
        let entry = LogEntry::new(Role::Operator, "Levels reset", session.id.to_string());
        let _ = self.event_bus.publish(RoomEvent::log(target.clone(), entry));

        tracing::info!(room = %target, conn = %session.id, "levels reset");
    }

    /// Detaches the session from its room on disconnect, notifying the room.
    pub async fn leave(&self, session: &mut RoomSession) {
        if let Some(room) = session.room.take() {
            self.publish_leave(&room, session);
            tracing::info!(room = %room, conn = %session.id, "left room");
        }
    }

    fn publish_leave(&self, room: &RoomId, session: &RoomSession) {
        let entry = LogEntry::new(
            session.role,
            format!("Left room {room}"),
            session.id.to_string(),
        );
        let _ = self.event_bus.publish(RoomEvent::log(room.clone(), entry));
    }
}
