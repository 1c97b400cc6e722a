//! Construction modes for the subscriber-facing server.
//!
//! Three ways to stand the relay up, mirroring how it may be embedded:
//!
//! - [`bind_and_serve`] — listen on the configured port and accept directly;
//! - [`serve`] — attach to an already-constructed [`TcpListener`];
//! - [`build_router`] — a router to merge into an existing Axum application,
//!   upgrading qualifying requests to persistent connections.
//!
//! All three funnel sockets into the same upgrade handler and registry, and
//! none changes core relay behavior.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::RelayState;
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::ws::handler::ws_handler;

/// Builds the relay's router: the WebSocket endpoint at `ws_path` plus the
/// thin ingest adapter for the upstream aggregator.
#[must_use]
pub fn build_router(state: RelayState, ws_path: &str) -> Router {
    Router::new()
        .route(ws_path, get(ws_handler))
        .route("/events/{kind}", post(ingest_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the relay on an already-constructed listener.
///
/// # Errors
///
/// Returns [`RelayError::Transport`] if the server loop fails.
pub async fn serve(listener: TcpListener, state: RelayState, ws_path: &str) -> Result<(), RelayError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "relay listening");
    }
    axum::serve(listener, build_router(state, ws_path)).await?;
    Ok(())
}

/// Binds the configured address and serves the relay on it.
///
/// # Errors
///
/// Returns [`RelayError::Transport`] if the address cannot be bound or the
/// server loop fails.
pub async fn bind_and_serve(config: &RelayConfig, state: RelayState) -> Result<(), RelayError> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    serve(listener, state, &config.ws_path).await
}

/// `POST /events/{kind}` — ingest adapter for an out-of-process upstream.
///
/// Forwards the body to [`EventRelay::handle_event`]; non-admitted payloads
/// and unrecognized kinds are accepted and dropped, matching the relay's
/// forward-compatible contract.
///
/// [`EventRelay::handle_event`]: crate::relay::EventRelay::handle_event
async fn ingest_handler(
    Path(kind): Path<String>,
    State(state): State<RelayState>,
    Json(payload): Json<Value>,
) -> StatusCode {
    state.relay.handle_event(&kind, &payload);
    StatusCode::NO_CONTENT
}
