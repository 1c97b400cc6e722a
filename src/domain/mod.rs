//! Domain layer: event admission and the outbound wire envelope.
//!
//! The relay interprets no domain semantics. Admission is a structural test
//! over the payload, and the envelope wraps the payload unmodified.

pub mod admission;
pub mod event;

pub use event::OutboundMessage;
