//! Outbound wire envelope.
//!
//! Each admitted event becomes exactly one [`OutboundMessage`], serialized a
//! single time and shared read-only across every send in the broadcast.

use serde::Serialize;
use serde_json::Value;

/// Wire-level envelope for one admitted event: `{"type": kind, "data": payload}`.
///
/// The payload is forwarded unmodified. The baseline contract carries no
/// sequence number; if one is ever added, this envelope is the single place
/// it goes.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage<'a> {
    /// Event kind discriminator (e.g. `"dynamb"`).
    #[serde(rename = "type")]
    pub kind: &'a str,
    /// The original event payload, unmodified.
    pub data: &'a Value,
}

impl<'a> OutboundMessage<'a> {
    /// Wraps an admitted event's kind and payload.
    #[must_use]
    pub fn new(kind: &'a str, data: &'a Value) -> Self {
        Self { kind, data }
    }

    /// Serializes the envelope into its single wire representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails
    /// (not expected for `Value` payloads).
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
