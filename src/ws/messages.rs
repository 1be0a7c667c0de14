//! Wire protocol: inbound frames, typed commands, and outbound frames.
//!
//! Frames are JSON envelopes of the form `{"event": <name>, "data": {...}}`.
//! Inbound payload fields are untrusted: everything is optional and parsing
//! never fails an event — it produces a typed [`RelayCommand`] with the
//! defaulting policy applied in one place, or `None` for frames that are not
//! valid envelopes at all (which are then ignored).

use serde::{Deserialize, Serialize};

use crate::domain::{Instrument, LevelSnapshot, LogEntry, Role, RoomBroadcast, RoomId};

/// Raw inbound frame, deserialized straight off the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// `join-room {room, role}`
    #[serde(rename = "join-room")]
    JoinRoom(JoinRoomPayload),
    /// `state:requestLevels {room}`
    #[serde(rename = "state:requestLevels")]
    RequestLevels(RoomPayload),
    /// `a:request {room, instrumentKey, action, text}`
    #[serde(rename = "a:request")]
    RequesterAction(RequesterActionPayload),
    /// `b:adjust {room, instrumentKey, delta, text}`
    #[serde(rename = "b:adjust")]
    OperatorAdjust(OperatorAdjustPayload),
    /// `b:ack {room, instrumentKey, text}`
    #[serde(rename = "b:ack")]
    OperatorAck(OperatorAckPayload),
    /// `reset-levels {room}`
    #[serde(rename = "reset-levels")]
    ResetLevels(RoomPayload),
}

/// Payload of `join-room`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinRoomPayload {
    /// Target room name.
    pub room: Option<String>,
    /// Role tag (`"A"` or `"B"`).
    pub role: Option<String>,
}

/// Payload carrying only an optional room name.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomPayload {
    /// Target room name.
    pub room: Option<String>,
}

/// Payload of `a:request`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequesterActionPayload {
    /// Target room name.
    pub room: Option<String>,
    /// Instrument wire key.
    pub instrument_key: Option<String>,
    /// Action label shown in the generated log text.
    pub action: Option<String>,
    /// Full text override.
    pub text: Option<String>,
}

/// Payload of `b:adjust`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperatorAdjustPayload {
    /// Target room name.
    pub room: Option<String>,
    /// Instrument wire key.
    pub instrument_key: Option<String>,
    /// Signed level delta.
    pub delta: Option<i64>,
    /// Full text override.
    pub text: Option<String>,
}

/// Payload of `b:ack`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperatorAckPayload {
    /// Target room name.
    pub room: Option<String>,
    /// Instrument wire key.
    pub instrument_key: Option<String>,
    /// Full text override.
    pub text: Option<String>,
}

/// Typed, defaulted command ready for dispatch.
///
/// Room fields stay optional here: the final room resolution (payload room →
/// session room → default) needs the session and happens in the relay
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Attach the session to a room with a role.
    Join {
        /// Explicit target room, if given.
        room: Option<RoomId>,
        /// Normalized role.
        role: Role,
    },
    /// Read-only snapshot request.
    RequestLevels {
        /// Explicit target room, if given.
        room: Option<RoomId>,
    },
    /// Informational request from the stage side. No state mutation.
    RequesterAction {
        /// Explicit target room, if given.
        room: Option<RoomId>,
        /// Recognized instrument, if the key was known.
        instrument: Option<Instrument>,
        /// Action label for the generated log text.
        action: String,
        /// Full text override.
        text: Option<String>,
    },
    /// Level adjustment from the booth side.
    OperatorAdjust {
        /// Explicit target room, if given.
        room: Option<RoomId>,
        /// Recognized instrument, if the key was known.
        instrument: Option<Instrument>,
        /// Signed delta; a missing field defaults to 0.
        delta: i64,
        /// Full text override.
        text: Option<String>,
    },
    /// Acknowledgement from the booth side. No state mutation.
    OperatorAck {
        /// Explicit target room, if given.
        room: Option<RoomId>,
        /// Recognized instrument, if the key was known.
        instrument: Option<Instrument>,
        /// Full text override.
        text: Option<String>,
    },
    /// Overwrite a room's levels with defaults.
    ResetLevels {
        /// Explicit target room, if given.
        room: Option<RoomId>,
    },
}

/// Parses a raw text frame into a typed command.
///
/// Returns `None` for frames that are not valid envelopes (malformed JSON or
/// unknown event names); such frames are ignored by the connection loop.
/// Valid envelopes always yield a command — missing fields degrade to
/// defaults instead of failing.
#[must_use]
pub fn parse_client_frame(text: &str) -> Option<RelayCommand> {
    let event: ClientEvent = serde_json::from_str(text).ok()?;
    Some(event.into())
}

/// Treats an empty text override like a missing one.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn instrument_from(key: Option<String>) -> Option<Instrument> {
    key.as_deref().and_then(Instrument::from_key)
}

impl From<ClientEvent> for RelayCommand {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::JoinRoom(p) => Self::Join {
                room: RoomId::from_raw(p.room),
                role: Role::from_tag(p.role.as_deref()),
            },
            ClientEvent::RequestLevels(p) => Self::RequestLevels {
                room: RoomId::from_raw(p.room),
            },
            ClientEvent::RequesterAction(p) => Self::RequesterAction {
                room: RoomId::from_raw(p.room),
                instrument: instrument_from(p.instrument_key),
                action: p.action.unwrap_or_default(),
                text: non_empty(p.text),
            },
            ClientEvent::OperatorAdjust(p) => Self::OperatorAdjust {
                room: RoomId::from_raw(p.room),
                instrument: instrument_from(p.instrument_key),
                delta: p.delta.unwrap_or(0),
                text: non_empty(p.text),
            },
            ClientEvent::OperatorAck(p) => Self::OperatorAck {
                room: RoomId::from_raw(p.room),
                instrument: instrument_from(p.instrument_key),
                text: non_empty(p.text),
            },
            ClientEvent::ResetLevels(p) => Self::ResetLevels {
                room: RoomId::from_raw(p.room),
            },
        }
    }
}

/// Outbound frame sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full level snapshot of a room.
    #[serde(rename = "state:levels")]
    Levels(LevelSnapshot),
    /// One appended log entry.
    #[serde(rename = "log:append")]
    Log(LogEntry),
}

impl ServerEvent {
    /// Serializes the frame to its JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<RoomBroadcast> for ServerEvent {
    fn from(broadcast: RoomBroadcast) -> Self {
        match broadcast {
            RoomBroadcast::Levels(snapshot) => Self::Levels(snapshot),
            RoomBroadcast::Log(entry) => Self::Log(entry),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::room_state::default_levels;

    #[test]
    fn parses_join_room() {
        let cmd = parse_client_frame(r#"{"event":"join-room","data":{"room":"main","role":"B"}}"#);
        assert_eq!(
            cmd,
            Some(RelayCommand::Join {
                room: Some(RoomId::new("main")),
                role: Role::Operator,
            })
        );
    }

    #[test]
    fn join_with_empty_payload_defaults() {
        let cmd = parse_client_frame(r#"{"event":"join-room","data":{}}"#);
        assert_eq!(
            cmd,
            Some(RelayCommand::Join {
                room: None,
                role: Role::Requester,
            })
        );
    }

    #[test]
    fn missing_delta_defaults_to_zero() {
        let cmd = parse_client_frame(
            r#"{"event":"b:adjust","data":{"room":"main","instrumentKey":"guitar"}}"#,
        );
        let Some(RelayCommand::OperatorAdjust {
            instrument, delta, ..
        }) = cmd
        else {
            panic!("expected adjust command");
        };
        assert_eq!(instrument, Some(Instrument::Guitar));
        assert_eq!(delta, 0);
    }

    #[test]
    fn unknown_instrument_key_degrades_to_none() {
        let cmd = parse_client_frame(
            r#"{"event":"a:request","data":{"instrumentKey":"kazoo","action":"Louder"}}"#,
        );
        let Some(RelayCommand::RequesterAction {
            instrument, action, ..
        }) = cmd
        else {
            panic!("expected requester action");
        };
        assert_eq!(instrument, None);
        assert_eq!(action, "Louder");
    }

    #[test]
    fn empty_room_and_text_are_treated_as_missing() {
        let cmd =
            parse_client_frame(r#"{"event":"b:ack","data":{"room":"","instrumentKey":"organ","text":""}}"#);
        assert_eq!(
            cmd,
            Some(RelayCommand::OperatorAck {
                room: None,
                instrument: Some(Instrument::Organ),
                text: None,
            })
        );
    }

    #[test]
    fn malformed_and_unknown_frames_are_ignored() {
        assert_eq!(parse_client_frame("not json"), None);
        assert_eq!(parse_client_frame(r#"{"event":"nope","data":{}}"#), None);
        assert_eq!(parse_client_frame(r#"{"data":{}}"#), None);
    }

    #[test]
    fn levels_frame_has_flat_snapshot_payload() {
        let frame = ServerEvent::Levels(default_levels()).to_json();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap_or_default();
        assert_eq!(
            value.get("event").and_then(|v| v.as_str()),
            Some("state:levels")
        );
        let data = value.get("data").cloned().unwrap_or_default();
        assert_eq!(data.get("guitar").and_then(serde_json::Value::as_u64), Some(5));
        assert_eq!(
            data.as_object().map(serde_json::Map::len),
            Some(7)
        );
    }

    #[test]
    fn log_frame_uses_append_event_name() {
        let entry = LogEntry::new(Role::Operator, "Joined room main", "conn");
        let frame = ServerEvent::Log(entry).to_json();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap_or_default();
        assert_eq!(
            value.get("event").and_then(|v| v.as_str()),
            Some("log:append")
        );
        assert_eq!(
            value.pointer("/data/text").and_then(|v| v.as_str()),
            Some("Joined room main")
        );
    }
}
