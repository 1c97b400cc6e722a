//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults suitable for running
//! alongside an upstream aggregator on the same host.

use std::net::SocketAddr;

use crate::error::RelayError;

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the WebSocket server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// Whether per-connection transport errors are logged. Observability
    /// only; delivery behavior is identical either way.
    pub print_errors: bool,

    /// Route at which subscribers connect (must start with `/`).
    pub ws_path: String,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` is set but cannot be
    /// parsed as a [`SocketAddr`], or if `WS_PATH` does not start with `/`.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .map_err(|e| RelayError::Config(format!("invalid LISTEN_ADDR: {e}")))?;

        let print_errors = parse_env_bool("PRINT_ERRORS", false);

        let ws_path = std::env::var("WS_PATH").unwrap_or_else(|_| "/".to_string());
        if !ws_path.starts_with('/') {
            return Err(RelayError::Config(format!(
                "WS_PATH must start with '/', got {ws_path:?}"
            )));
        }

        Ok(Self {
            listen_addr,
            print_errors,
            ws_path,
        })
    }
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"`. Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_bool_falls_back_on_unset_key() {
        assert!(parse_env_bool("DYNAMB_RELAY_UNSET_KEY", true));
        assert!(!parse_env_bool("DYNAMB_RELAY_UNSET_KEY", false));
    }
}
