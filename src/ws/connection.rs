//! Per-connection read/write task.
//!
//! Runs one task per accepted WebSocket: forwards queued broadcast frames to
//! the socket and drains inbound frames until the subscriber disconnects.
//! Lifecycle is `Connecting → Open → Closed`; any transport-level close or
//! error is terminal and deregisters the connection.

use std::sync::Arc;

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::registry::{ConnectionId, ConnectionRegistry};

/// Runs the read/write loop for a single subscriber connection.
///
/// - Forwards frames from the connection's outbound queue to the socket.
/// - Drains inbound frames; subscribers have nothing to say, so everything
///   except close is ignored.
/// - Transport errors are contained here: logged when `print_errors` is
///   enabled, never propagated to the relay or to other connections.
pub async fn run_connection(
    socket: WebSocket,
    id: ConnectionId,
    mut outbound: mpsc::UnboundedReceiver<Utf8Bytes>,
    registry: Arc<ConnectionRegistry>,
    print_errors: bool,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Broadcast frame queued for this subscriber
            frame = outbound.recv() => {
                match frame {
                    Some(text) => {
                        if ws_tx.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            // Inbound frame from the subscriber
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        if print_errors {
                            tracing::error!(connection = %id, error = %err, "ws connection error");
                        }
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.remove(id);
    tracing::debug!(connection = %id, "ws connection closed");
}
