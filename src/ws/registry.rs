//! Concurrent registry of open subscriber connections.
//!
//! [`ConnectionRegistry`] owns the set of currently-open connections and is
//! the only component that mutates it. Broadcast iterates a snapshot of the
//! set taken at iteration start; accept and removal may happen concurrently
//! without the relay ever observing a half-updated set.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::extract::ws::Utf8Bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Opaque, process-assigned identifier for one subscriber connection.
///
/// Used only for registry iteration and log correlation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-connection handle: the outbound frame queue for one subscriber.
///
/// The queue is unbounded so a send never blocks the broadcaster; the
/// connection's writer task drains it at the subscriber's own pace.
#[derive(Debug)]
struct ConnectionHandle {
    sender: mpsc::UnboundedSender<Utf8Bytes>,
}

/// Tracks the set of currently-open subscriber connections.
///
/// # Concurrency
///
/// The map is behind a `std::sync::RwLock` so the synchronous broadcast path
/// can read it without an await point. Sends go through per-connection
/// unbounded channels, so holding the read lock during fan-out never blocks
/// on a slow subscriber.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly-established connection.
    ///
    /// Returns the connection's identity and the receiving end of its
    /// outbound queue; the connection task forwards queued frames to the
    /// socket.
    pub fn accept(&self) -> (ConnectionId, mpsc::UnboundedReceiver<Utf8Bytes>) {
        let id = ConnectionId::new();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.write_map().insert(id, ConnectionHandle { sender });
        tracing::debug!(connection = %id, "subscriber connected");
        (id, receiver)
    }

    /// Deregisters a connection. Idempotent; removing an unknown or
    /// already-removed connection is a no-op.
    pub fn remove(&self, id: ConnectionId) {
        if self.write_map().remove(&id).is_some() {
            tracing::debug!(connection = %id, "subscriber removed");
        }
    }

    /// Returns a snapshot of the connections currently known to be open,
    /// in no particular order.
    #[must_use]
    pub fn open_connections(&self) -> Vec<ConnectionId> {
        self.read_map().keys().copied().collect()
    }

    /// Queues `frame` for delivery to `id` if the connection is still open.
    ///
    /// A connection that has closed or been removed since the caller's
    /// snapshot is silently skipped; a dropped subscriber is normal churn,
    /// not a failure.
    pub fn send(&self, id: ConnectionId, frame: Utf8Bytes) {
        if let Some(handle) = self.read_map().get(&id) {
            // The receiver drops when the connection task exits; a failed
            // send here is the lazy-removal path.
            let _ = handle.sender.send(frame);
        }
    }

    /// Returns the number of open connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    /// Returns `true` if no subscribers are connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<ConnectionId, ConnectionHandle>> {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<ConnectionId, ConnectionHandle>> {
        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accept_adds_to_open_set() {
        let registry = ConnectionRegistry::new();
        assert!(registry.is_empty());

        let (id, _rx) = registry.accept();
        assert_eq!(registry.len(), 1);
        assert!(registry.open_connections().contains(&id));
    }

    #[test]
    fn remove_is_eager_and_idempotent() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = registry.accept();

        registry.remove(id);
        assert!(registry.is_empty());
        registry.remove(id);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn send_delivers_to_open_connection() {
        let registry = ConnectionRegistry::new();
        let (id, mut rx) = registry.accept();

        registry.send(id, Utf8Bytes::from_static("hello"));
        let Some(frame) = rx.recv().await else {
            panic!("expected a queued frame");
        };
        assert_eq!(frame.as_str(), "hello");
    }

    #[test]
    fn send_to_removed_connection_is_silently_skipped() {
        let registry = ConnectionRegistry::new();
        let (id, rx) = registry.accept();
        registry.remove(id);
        drop(rx);

        registry.send(id, Utf8Bytes::from_static("late"));
    }

    #[test]
    fn send_with_dropped_receiver_is_silently_skipped() {
        let registry = ConnectionRegistry::new();
        let (id, rx) = registry.accept();
        // Connection task died without deregistering yet.
        drop(rx);

        registry.send(id, Utf8Bytes::from_static("late"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn open_connections_is_a_snapshot() {
        let registry = ConnectionRegistry::new();
        let (a, _rx_a) = registry.accept();
        let (b, _rx_b) = registry.accept();

        let snapshot = registry.open_connections();
        registry.remove(a);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&a));
        assert!(snapshot.contains(&b));
        assert_eq!(registry.len(), 1);
    }
}
