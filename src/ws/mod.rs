//! WebSocket layer: subscriber connection tracking and lifecycle.
//!
//! Every construction mode funnels accepted sockets through the same
//! [`registry::ConnectionRegistry::accept`] entry point.

pub mod connection;
pub mod handler;
pub mod registry;

pub use registry::{ConnectionId, ConnectionRegistry};
