//! soundcomm-relay server entry point.
//!
//! Thin long-running adapter around the shared relay core in
//! [`soundcomm_relay::server`].

use tracing_subscriber::EnvFilter;

use soundcomm_relay::config::RelayConfig;
use soundcomm_relay::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting soundcomm-relay");

    server::run(config).await
}
