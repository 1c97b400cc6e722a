//! Event ingestion and fan-out broadcast.
//!
//! [`EventRelay`] is the sole ingestion entry point for the upstream
//! aggregator. Per inbound event it dispatches on kind, applies the
//! registered admission strategy, serializes the envelope exactly once, and
//! queues the shared frame to every open connection in the registry.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Utf8Bytes;
use serde_json::Value;

use super::strategy::{DynambStrategy, EventStrategy};
use crate::domain::OutboundMessage;
use crate::ws::ConnectionRegistry;

/// Decides, per inbound event, whether it is relevant to the subscriber
/// audience, and if so broadcasts it to every open connection.
///
/// Holds a reference to one [`ConnectionRegistry`]; multiple relay instances
/// may coexist with independent registries.
#[derive(Debug)]
pub struct EventRelay {
    registry: Arc<ConnectionRegistry>,
    strategies: HashMap<String, Box<dyn EventStrategy>>,
}

impl EventRelay {
    /// Creates a relay over the given registry with the `"dynamb"` strategy
    /// registered.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        let mut relay = Self {
            registry,
            strategies: HashMap::new(),
        };
        relay.register("dynamb", Box::new(DynambStrategy));
        relay
    }

    /// Registers (or replaces) the strategy for an event kind.
    ///
    /// Kinds without a registered strategy are ignored by
    /// [`handle_event`](Self::handle_event).
    pub fn register(&mut self, kind: impl Into<String>, strategy: Box<dyn EventStrategy>) {
        self.strategies.insert(kind.into(), strategy);
    }

    /// Handles one inbound event from the upstream aggregator.
    ///
    /// Synchronous and bounded: the admission check and fan-out run to
    /// completion with no internal suspension, and frames are queued per
    /// connection so a slow subscriber never blocks the caller. Unrecognized
    /// kinds and non-admitted payloads result in zero sends, silently.
    pub fn handle_event(&self, kind: &str, payload: &Value) {
        let Some(strategy) = self.strategies.get(kind) else {
            return;
        };
        if !strategy.admits(payload) {
            return;
        }

        let data = strategy.transform(payload);
        let frame = match OutboundMessage::new(kind, data.as_ref()).to_frame() {
            Ok(json) => Utf8Bytes::from(json),
            Err(err) => {
                tracing::warn!(kind, error = %err, "failed to serialize outbound event");
                return;
            }
        };

        let connections = self.registry.open_connections();
        tracing::debug!(kind, subscribers = connections.len(), "broadcasting event");
        for id in connections {
            // A connection that closed since the snapshot is skipped by the
            // registry; the loop never aborts for remaining subscribers.
            self.registry.send(id, frame.clone());
        }
    }

    /// The registry of open subscriber connections this relay broadcasts to.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc::error::TryRecvError;

    fn relay_with_registry() -> (EventRelay, Arc<ConnectionRegistry>) {
        let registry = Arc::new(ConnectionRegistry::new());
        let relay = EventRelay::new(Arc::clone(&registry));
        (relay, registry)
    }

    #[test]
    fn admitted_event_reaches_every_open_subscriber() {
        let (relay, registry) = relay_with_registry();
        let (_a, mut rx_a) = registry.accept();
        let (_b, mut rx_b) = registry.accept();

        relay.handle_event("dynamb", &json!({ "isMotionDetected": [true] }));

        let expected = json!({ "type": "dynamb", "data": { "isMotionDetected": [true] } });
        for rx in [&mut rx_a, &mut rx_b] {
            let Ok(frame) = rx.try_recv() else {
                panic!("subscriber missed the broadcast");
            };
            let Ok(parsed) = serde_json::from_str::<Value>(frame.as_str()) else {
                panic!("frame is not valid JSON");
            };
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn subscribers_receive_byte_identical_frames() {
        let (relay, registry) = relay_with_registry();
        let (_a, mut rx_a) = registry.accept();
        let (_b, mut rx_b) = registry.accept();

        relay.handle_event("dynamb", &json!({ "isContactDetected": [] }));

        let frame_a = rx_a.try_recv().ok();
        let frame_b = rx_b.try_recv().ok();
        assert!(frame_a.is_some());
        assert_eq!(
            frame_a.as_ref().map(Utf8Bytes::as_str),
            frame_b.as_ref().map(Utf8Bytes::as_str)
        );
    }

    #[test]
    fn non_admitted_payload_sends_nothing() {
        let (relay, registry) = relay_with_registry();
        let (_id, mut rx) = registry.accept();

        relay.handle_event("dynamb", &json!({ "batteryPercentage": 80 }));

        assert_eq!(rx.try_recv().err(), Some(TryRecvError::Empty));
    }

    #[test]
    fn unrecognized_kind_is_a_no_op() {
        let (relay, registry) = relay_with_registry();
        let (_id, mut rx) = registry.accept();

        relay.handle_event("raddec", &json!({ "isMotionDetected": [true] }));

        assert_eq!(rx.try_recv().err(), Some(TryRecvError::Empty));
    }

    #[test]
    fn event_produces_exactly_one_send_per_subscriber() {
        let (relay, registry) = relay_with_registry();
        let (_id, mut rx) = registry.accept();

        relay.handle_event("dynamb", &json!({ "isMotionDetected": [true] }));

        assert!(rx.try_recv().is_ok());
        assert_eq!(rx.try_recv().err(), Some(TryRecvError::Empty));
    }

    #[test]
    fn closed_connection_never_aborts_the_broadcast() {
        let (relay, registry) = relay_with_registry();
        let (_a, mut rx_a) = registry.accept();
        let (_b, rx_b) = registry.accept();
        let (_c, mut rx_c) = registry.accept();

        // Subscriber b dies without deregistering; its send must be skipped
        // while a and c still receive.
        drop(rx_b);
        relay.handle_event("dynamb", &json!({ "isMotionDetected": [true] }));

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_c.try_recv().is_ok());
    }

    #[test]
    fn connection_removed_before_broadcast_receives_nothing() {
        let (relay, registry) = relay_with_registry();
        let (id, mut rx) = registry.accept();
        registry.remove(id);

        relay.handle_event("dynamb", &json!({ "isContactDetected": [true] }));

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn custom_kind_is_added_by_registration() {
        #[derive(Debug)]
        struct AdmitAll;
        impl EventStrategy for AdmitAll {
            fn admits(&self, _payload: &Value) -> bool {
                true
            }
        }

        let (mut relay, _registry) = relay_with_registry();
        let registry = Arc::clone(relay.registry());
        relay.register("spatem", Box::new(AdmitAll));
        let (_id, mut rx) = registry.accept();

        relay.handle_event("spatem", &json!({ "anything": 1 }));

        let Ok(frame) = rx.try_recv() else {
            panic!("registered kind should broadcast");
        };
        assert!(frame.as_str().contains("\"type\":\"spatem\""));
    }
}
