//! # dynamb-relay
//!
//! Real-time WebSocket relay for "dynamb" (dynamic ambient) events.
//!
//! An upstream aggregator pushes named events into the relay through a single
//! [`relay::EventRelay::handle_event`] entry point. Events whose payload
//! carries at least one recognized detection signal are serialized once and
//! broadcast to every currently-connected WebSocket subscriber. Delivery is
//! live-only and best-effort: no persistence, no replay, no acknowledgment.
//!
//! ## Architecture
//!
//! ```text
//! Upstream aggregator
//!     │  handle_event(kind, payload)
//!     ▼
//! EventRelay (relay/) ── kind → EventStrategy (admission)
//!     │  serialize once, fan out
//!     ▼
//! ConnectionRegistry (ws/) ── per-connection outbound queue
//!     │
//!     ▼
//! WebSocket subscribers (axum ws upgrade, server)
//! ```

pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod relay;
pub mod server;
pub mod ws;
