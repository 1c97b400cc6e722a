//! Structural admission predicate for dynamb events.
//!
//! An event is relevant to this relay's audience when its payload carries at
//! least one recognized detection signal. The predicate checks *shape* only:
//! the expected key must be present and array-typed. Values are never
//! inspected, so an empty detection array still admits.

use serde_json::Value;

/// Detection signal keys recognized by the admission predicate.
///
/// Extending admission to a new signal means adding its key here; broadcast
/// logic is untouched. A device whitelist refinement would also live in this
/// module.
pub const DETECTION_KEYS: &[&str] = &["isContactDetected", "isMotionDetected"];

/// Returns `true` if `payload` carries at least one recognized detection
/// signal as an array-typed field.
///
/// Pure and side-effect free. A payload that is not a JSON object, or that
/// has a recognized key with a non-array value, is simply not admitted;
/// malformed shape is indistinguishable from irrelevance.
#[must_use]
pub fn has_detection_signal(payload: &Value) -> bool {
    DETECTION_KEYS
        .iter()
        .any(|key| payload.get(key).is_some_and(Value::is_array))
}
