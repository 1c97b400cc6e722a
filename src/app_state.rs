//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::relay::EventRelay;
use crate::ws::ConnectionRegistry;

/// Shared state available to the upgrade and ingest handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct RelayState {
    /// The relay performing admission and broadcast.
    pub relay: Arc<EventRelay>,
    /// Registry of open subscriber connections.
    pub registry: Arc<ConnectionRegistry>,
    /// Whether per-connection transport errors are logged.
    pub print_errors: bool,
}

impl RelayState {
    /// Builds state around a fresh registry and a relay with the default
    /// `"dynamb"` strategy registered.
    #[must_use]
    pub fn new(print_errors: bool) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let relay = Arc::new(EventRelay::new(Arc::clone(&registry)));
        Self {
            relay,
            registry,
            print_errors,
        }
    }
}
