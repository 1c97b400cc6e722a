//! dynamb-relay server entry point.
//!
//! Binds the configured port and broadcasts admitted dynamb events to all
//! connected WebSocket subscribers.

use dynamb_relay::app_state::RelayState;
use dynamb_relay::config::RelayConfig;
use dynamb_relay::error::RelayError;
use dynamb_relay::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting dynamb-relay");

    // Build relay state and serve
    let state = RelayState::new(config.print_errors);
    server::bind_and_serve(&config, state).await
}
