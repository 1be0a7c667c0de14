//! WebSocket connection loop.
//!
//! Runs the read/forward loop for a single connection: inbound frames are
//! parsed into typed commands and dispatched to the relay service; events
//! from the bus are forwarded when they match the session's current room.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{self, RelayCommand, ServerEvent};
use super::session::RoomSession;
use crate::domain::RoomEvent;
use crate::service::RelayService;

/// Runs one connection to completion.
///
/// The loop handles one inbound event at a time; direct replies (snapshots
/// for the sender alone) go straight onto the socket, room-wide payloads
/// travel through the bus. When the socket closes, the session leaves its
/// room with a notice.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<RoomEvent>,
    relay: Arc<RelayService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut session = RoomSession::new();
    tracing::debug!(conn = %session.id, "ws connection opened");

    loop {
        tokio::select! {
            // Inbound frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let Some(command) = messages::parse_client_frame(&text) else {
                            // Malformed input never faults the handler.
                            tracing::debug!(conn = %session.id, "ignoring unparseable frame");
                            continue;
                        };
                        if let Some(reply) = dispatch(&relay, &mut session, command).await
                            && ws_tx.send(Message::text(reply.to_json())).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(conn = %session.id, error = %e, "ws read error");
                        break;
                    }
                    _ => {}
                }
            }
            // Event from the bus
            event = event_rx.recv() => {
                match event {
                    Ok(event) if session.matches(&event.room) => {
                        let frame = ServerEvent::from(event.broadcast).to_json();
                        if ws_tx.send(Message::text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(conn = %session.id, lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    relay.leave(&mut session).await;
    tracing::debug!(conn = %session.id, "ws connection closed");
}

/// Dispatches a typed command, returning the sender-only reply if the
/// command has one.
async fn dispatch(
    relay: &RelayService,
    session: &mut RoomSession,
    command: RelayCommand,
) -> Option<ServerEvent> {
    match command {
        RelayCommand::Join { room, role } => {
            let snapshot = relay.join(session, room, role).await;
            Some(ServerEvent::Levels(snapshot))
        }
        RelayCommand::RequestLevels { room } => {
            let snapshot = relay.request_levels(session, room).await;
            Some(ServerEvent::Levels(snapshot))
        }
        RelayCommand::RequesterAction {
            room,
            instrument,
            action,
            text,
        } => {
            relay
                .requester_action(session, room, instrument, &action, text)
                .await;
            None
        }
        RelayCommand::OperatorAdjust {
            room,
            instrument,
            delta,
            text,
        } => {
            relay
                .operator_adjust(session, room, instrument, delta, text)
                .await;
            None
        }
        RelayCommand::OperatorAck {
            room,
            instrument,
            text,
        } => {
            relay.operator_ack(session, room, instrument, text).await;
            None
        }
        RelayCommand::ResetLevels { room } => {
            relay.reset_levels(session, room).await;
            None
        }
    }
}
