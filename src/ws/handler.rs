//! Axum WebSocket upgrade handler.
//!
//! The single funnel from every construction mode into
//! [`ConnectionRegistry::accept`](super::registry::ConnectionRegistry::accept).

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::RelayState;

/// Upgrades a qualifying HTTP request to a persistent subscriber connection.
///
/// The connection is registered only once the socket is established, so a
/// failed upgrade never leaves a stale registry entry.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> impl IntoResponse {
    let registry = Arc::clone(&state.registry);
    let print_errors = state.print_errors;

    ws.on_upgrade(move |socket| async move {
        let (id, outbound) = registry.accept();
        run_connection(socket, id, outbound, registry, print_errors).await;
    })
}
