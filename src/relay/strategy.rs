//! Per-kind admission-and-transform strategies.
//!
//! Event kinds are handled by registration rather than a central switch:
//! [`EventRelay`](super::EventRelay) maps each recognized kind to an
//! [`EventStrategy`], and any unregistered kind is a forward-compatible
//! no-op. Adding a kind never touches broadcast logic.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::domain::admission;

/// Admission-and-transform strategy for one event kind.
pub trait EventStrategy: fmt::Debug + Send + Sync {
    /// Pure membership test: should this payload be broadcast?
    ///
    /// Must be side-effect free; repeated evaluation on the same payload
    /// yields the same result.
    fn admits(&self, payload: &Value) -> bool;

    /// Maps an admitted payload to the outbound `data` field.
    ///
    /// The default is the identity: the payload is forwarded unmodified.
    fn transform<'a>(&self, payload: &'a Value) -> Cow<'a, Value> {
        Cow::Borrowed(payload)
    }
}

/// Strategy for `"dynamb"` events: admit when the payload carries at least
/// one recognized detection signal, forward the payload as-is.
#[derive(Debug, Default)]
pub struct DynambStrategy;

impl EventStrategy for DynambStrategy {
    fn admits(&self, payload: &Value) -> bool {
        admission::has_detection_signal(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dynamb_strategy_gates_on_detection_signals() {
        let strategy = DynambStrategy;
        assert!(strategy.admits(&json!({ "isMotionDetected": [true] })));
        assert!(!strategy.admits(&json!({ "batteryPercentage": 80 })));
    }

    #[test]
    fn default_transform_is_identity() {
        let strategy = DynambStrategy;
        let payload = json!({ "isContactDetected": [true] });
        assert_eq!(strategy.transform(&payload).as_ref(), &payload);
    }
}
