//! Relay core: per-kind admission strategies and the fan-out broadcaster.

pub mod event_relay;
pub mod strategy;

pub use event_relay::EventRelay;
pub use strategy::{DynambStrategy, EventStrategy};
