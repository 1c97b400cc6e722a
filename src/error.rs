//! Relay error types.
//!
//! [`RelayError`] covers the few fallible operations the relay has:
//! loading configuration and binding/serving the listener. Per-connection
//! transport failures are deliberately *not* represented here; they are
//! contained at the connection boundary and never surface as errors.

/// Top-level error type for relay startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Configuration could not be loaded or validated.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The listener could not be bound or the server loop failed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
