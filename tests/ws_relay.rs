//! End-to-end relay tests over real sockets.
//!
//! Spins up the full application (router, WebSocket endpoint, REST surface)
//! on an ephemeral port and drives it with `tokio-tungstenite` clients,
//! covering the join/adjust/reset flows, room isolation, and the HTTP
//! liveness surface.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use soundcomm_relay::config::RelayConfig;
use soundcomm_relay::server;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn_relay() -> SocketAddr {
    let config = RelayConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap_or_else(|_| {
            panic!("loopback addr must parse");
        }),
        event_bus_capacity: 256,
    };
    let state = server::build_state(&config);
    let app = server::build_app(state);

    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn connect(addr: SocketAddr) -> WsClient {
    let Ok((ws, _)) = connect_async(format!("ws://{addr}/ws")).await else {
        panic!("ws connect failed");
    };
    ws
}

async fn send_frame(ws: &mut WsClient, frame: Value) {
    let sent = ws.send(Message::text(frame.to_string())).await;
    assert!(sent.is_ok(), "ws send failed");
}

/// Receives the next text frame as JSON, skipping control frames.
async fn recv_frame(ws: &mut WsClient) -> Value {
    let deadline = tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    let Ok(value) = serde_json::from_str(&text) else {
                        panic!("server sent non-JSON frame: {text}");
                    };
                    return value;
                }
                Some(Ok(_)) => continue,
                other => panic!("ws stream ended unexpectedly: {other:?}"),
            }
        }
    });
    match deadline.await {
        Ok(value) => value,
        Err(_) => panic!("timed out waiting for frame"),
    }
}

fn event_name(frame: &Value) -> &str {
    frame
        .get("event")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn log_text(frame: &Value) -> &str {
    frame
        .pointer("/data/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn level_of(frame: &Value, instrument: &str) -> Option<u64> {
    frame
        .pointer(&format!("/data/{instrument}"))
        .and_then(Value::as_u64)
}

async fn join(ws: &mut WsClient, room: &str, role: &str) -> (Value, Value) {
    send_frame(ws, json!({"event": "join-room", "data": {"room": room, "role": role}})).await;
    let snapshot = recv_frame(ws).await;
    let notice = recv_frame(ws).await;
    (snapshot, notice)
}

#[tokio::test]
async fn join_replies_with_snapshot_then_broadcasts_notice() {
    let addr = spawn_relay().await;
    let mut ws = connect(addr).await;

    let (snapshot, notice) = join(&mut ws, "main", "B").await;

    assert_eq!(event_name(&snapshot), "state:levels");
    for key in [
        "keyboard",
        "organ",
        "guitar",
        "drum",
        "conga",
        "monitor",
        "songleader",
    ] {
        assert_eq!(level_of(&snapshot, key), Some(5), "instrument {key}");
    }

    assert_eq!(event_name(&notice), "log:append");
    assert_eq!(log_text(&notice), "Joined room main");
    assert_eq!(
        notice.pointer("/data/from").and_then(Value::as_str),
        Some("B")
    );
    assert!(
        notice
            .pointer("/data/id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty())
    );
}

#[tokio::test]
async fn adjust_fans_out_snapshot_and_log_to_all_members() {
    let addr = spawn_relay().await;

    let mut requester = connect(addr).await;
    let _ = join(&mut requester, "main", "A").await;

    let mut operator = connect(addr).await;
    let _ = join(&mut operator, "main", "B").await;

    // The requester also sees the operator's join notice.
    let seen = recv_frame(&mut requester).await;
    assert_eq!(log_text(&seen), "Joined room main");

    send_frame(
        &mut operator,
        json!({"event": "b:adjust", "data": {"room": "main", "instrumentKey": "guitar", "delta": 3}}),
    )
    .await;

    for ws in [&mut requester, &mut operator] {
        let levels = recv_frame(ws).await;
        assert_eq!(event_name(&levels), "state:levels");
        assert_eq!(level_of(&levels, "guitar"), Some(8));

        let log = recv_frame(ws).await;
        assert_eq!(log_text(&log), "Guitar – Increased to 8 (IC)");
    }
}

#[tokio::test]
async fn adjust_clamps_to_floor_and_reports_lowered() {
    let addr = spawn_relay().await;
    let mut operator = connect(addr).await;
    let _ = join(&mut operator, "main", "B").await;

    send_frame(
        &mut operator,
        json!({"event": "b:adjust", "data": {"instrumentKey": "drum", "delta": -20}}),
    )
    .await;

    let levels = recv_frame(&mut operator).await;
    assert_eq!(level_of(&levels, "drum"), Some(0));
    let log = recv_frame(&mut operator).await;
    assert_eq!(log_text(&log), "Drums – Lowered to 0 (LV)");
}

#[tokio::test]
async fn rooms_are_isolated() {
    let addr = spawn_relay().await;

    let mut operator = connect(addr).await;
    let _ = join(&mut operator, "main", "B").await;

    let mut bystander = connect(addr).await;
    let _ = join(&mut bystander, "other", "A").await;

    send_frame(
        &mut operator,
        json!({"event": "b:adjust", "data": {"instrumentKey": "keyboard", "delta": 4}}),
    )
    .await;
    // Operator's own receipt proves the adjust was processed.
    let _ = recv_frame(&mut operator).await;
    let _ = recv_frame(&mut operator).await;

    // The bystander's very next frame is its own snapshot reply, untouched
    // by room "main" traffic.
    send_frame(&mut bystander, json!({"event": "state:requestLevels", "data": {}})).await;
    let snapshot = recv_frame(&mut bystander).await;
    assert_eq!(event_name(&snapshot), "state:levels");
    assert_eq!(level_of(&snapshot, "keyboard"), Some(5));
}

#[tokio::test]
async fn switching_rooms_ends_membership_in_the_first() {
    let addr = spawn_relay().await;

    let mut watcher = connect(addr).await;
    let _ = join(&mut watcher, "one", "A").await;

    let mut mover = connect(addr).await;
    let _ = join(&mut mover, "one", "B").await;
    let seen = recv_frame(&mut watcher).await;
    assert_eq!(log_text(&seen), "Joined room one");

    let (snapshot, notice) = join(&mut mover, "two", "B").await;
    assert_eq!(event_name(&snapshot), "state:levels");
    assert_eq!(log_text(&notice), "Joined room two");

    // The departed room hears the leave notice.
    let left = recv_frame(&mut watcher).await;
    assert_eq!(log_text(&left), "Left room one");

    // Traffic in room one no longer reaches the mover: its next frame is
    // the reply to its own request in room two.
    send_frame(
        &mut watcher,
        json!({"event": "a:request", "data": {"instrumentKey": "organ", "action": "Louder please"}}),
    )
    .await;
    let echoed = recv_frame(&mut watcher).await;
    assert_eq!(log_text(&echoed), "Organ – Louder please");

    send_frame(&mut mover, json!({"event": "state:requestLevels", "data": {}})).await;
    let reply = recv_frame(&mut mover).await;
    assert_eq!(event_name(&reply), "state:levels");
}

#[tokio::test]
async fn disconnect_notifies_the_room() {
    let addr = spawn_relay().await;

    let mut stayer = connect(addr).await;
    let _ = join(&mut stayer, "main", "A").await;

    let mut leaver = connect(addr).await;
    let _ = join(&mut leaver, "main", "B").await;
    let seen = recv_frame(&mut stayer).await;
    assert_eq!(log_text(&seen), "Joined room main");

    let closed = leaver.close(None).await;
    assert!(closed.is_ok());

    let notice = recv_frame(&mut stayer).await;
    assert_eq!(log_text(&notice), "Left room main");
    assert_eq!(
        notice.pointer("/data/from").and_then(Value::as_str),
        Some("B")
    );
}

#[tokio::test]
async fn reset_restores_defaults_for_the_whole_room() {
    let addr = spawn_relay().await;
    let mut operator = connect(addr).await;
    let _ = join(&mut operator, "main", "B").await;

    send_frame(
        &mut operator,
        json!({"event": "b:adjust", "data": {"instrumentKey": "conga", "delta": 5}}),
    )
    .await;
    let levels = recv_frame(&mut operator).await;
    assert_eq!(level_of(&levels, "conga"), Some(10));
    let _ = recv_frame(&mut operator).await;

    send_frame(&mut operator, json!({"event": "reset-levels", "data": {}})).await;
    let levels = recv_frame(&mut operator).await;
    assert_eq!(level_of(&levels, "conga"), Some(5));
    let log = recv_frame(&mut operator).await;
    assert_eq!(log_text(&log), "Levels reset");
}

#[tokio::test]
async fn unknown_instrument_key_falls_back_to_unknown_label() {
    let addr = spawn_relay().await;
    let mut requester = connect(addr).await;
    let _ = join(&mut requester, "main", "A").await;

    send_frame(
        &mut requester,
        json!({"event": "a:request", "data": {"instrumentKey": "kazoo", "action": "Solo"}}),
    )
    .await;
    let log = recv_frame(&mut requester).await;
    assert_eq!(log_text(&log), "Unknown – Solo");
    assert_eq!(
        log.pointer("/data/from").and_then(Value::as_str),
        Some("A")
    );
}

#[tokio::test]
async fn malformed_frames_are_ignored_without_dropping_the_session() {
    let addr = spawn_relay().await;
    let mut ws = connect(addr).await;
    let _ = join(&mut ws, "main", "B").await;

    send_frame(&mut ws, json!({"event": "no-such-event", "data": {}})).await;
    let sent = ws.send(Message::text("not json at all")).await;
    assert!(sent.is_ok());

    // The session still works.
    send_frame(&mut ws, json!({"event": "state:requestLevels", "data": {}})).await;
    let snapshot = recv_frame(&mut ws).await;
    assert_eq!(event_name(&snapshot), "state:levels");
}

#[tokio::test]
async fn http_surface_reports_liveness_and_room_state() {
    let addr = spawn_relay().await;
    let client = reqwest::Client::new();

    let Ok(resp) = client.get(format!("http://{addr}/")).send().await else {
        panic!("liveness request failed");
    };
    assert_eq!(resp.text().await.unwrap_or_default(), "SoundComm relay running");

    let Ok(resp) = client.get(format!("http://{addr}/health")).send().await else {
        panic!("health request failed");
    };
    let health: Value = resp.json().await.unwrap_or_default();
    assert_eq!(health.get("status").and_then(Value::as_str), Some("healthy"));

    // Untouched room: 404 with the structured error body.
    let Ok(resp) = client
        .get(format!("http://{addr}/api/v1/rooms/main/levels"))
        .send()
        .await
    else {
        panic!("room request failed");
    };
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = resp.json().await.unwrap_or_default();
    assert_eq!(
        body.pointer("/error/code").and_then(Value::as_u64),
        Some(2001)
    );

    // After a join the room is live and readable.
    let mut ws = connect(addr).await;
    let _ = join(&mut ws, "main", "B").await;

    let Ok(resp) = client
        .get(format!("http://{addr}/api/v1/rooms/main/levels"))
        .send()
        .await
    else {
        panic!("room request failed");
    };
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap_or_default();
    assert_eq!(
        body.pointer("/levels/songleader").and_then(Value::as_u64),
        Some(5)
    );

    let Ok(resp) = client
        .get(format!("http://{addr}/config/instruments"))
        .send()
        .await
    else {
        panic!("instruments request failed");
    };
    let catalog: Value = resp.json().await.unwrap_or_default();
    assert_eq!(catalog.as_array().map(Vec::len), Some(7));
}
