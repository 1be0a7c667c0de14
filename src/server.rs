//! Relay core bootstrap shared by every deployment adapter.
//!
//! The original deployment duplicated its bootstrap across a long-running
//! listener and a serverless entry point; here the whole relay (state,
//! router, layers) is assembled once and adapters stay thin. `main.rs` is
//! the long-running adapter; tests embed [`build_app`] directly.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::RelayConfig;
use crate::domain::{EventBus, RoomStore};
use crate::service::RelayService;
use crate::ws::handler::ws_handler;

/// Builds fresh application state: an empty room store, an event bus with
/// the configured capacity, and the relay service wiring them together.
#[must_use]
pub fn build_state(config: &RelayConfig) -> AppState {
    let store = Arc::new(RoomStore::new());
    let event_bus = EventBus::new(config.event_bus_capacity);
    let relay = Arc::new(RelayService::new(store, event_bus.clone()));
    AppState { relay, event_bus }
}

/// Builds the complete application router over the given state.
///
/// CORS stays permissive: origin policy belongs to the deployment, not the
/// relay.
#[must_use]
pub fn build_app(state: AppState) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves the relay until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run(config: RelayConfig) -> anyhow::Result<()> {
    let state = build_state(&config);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "relay listening");

    axum::serve(listener, app).await?;
    Ok(())
}
