//! Server configuration.
//!
//! The wire protocol and CLI surface take no flags — the only knobs are
//! two optional environment overrides so the binary isn't hardcoded to
//! one port. Grounded on `quadrelay_wire::config`'s `BufferConfig`
//! pattern: a small `Copy` struct with a `Default` impl and named
//! constructors, rather than a flags parser this server has no other
//! use for.

use std::env;

/// The port `main.c`'s `get_listener()` hardcodes via `DF_PORT`.
pub const DEFAULT_PORT: u16 = 7557;

/// `main.c`'s `listen(sock, 10)` backlog.
pub const DEFAULT_BACKLOG: u32 = 10;

/// Listener configuration for the relay server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// TCP port to listen on, `INADDR_ANY`.
    pub port: u16,
    /// Listen backlog passed to the socket.
    pub backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

impl ServerConfig {
    /// Overlay `QUADRELAY_PORT` (if set and a valid `u16`) onto the
    /// default configuration. The backlog has no environment override;
    /// it was never a tunable in the original server either.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = env::var("QUADRELAY_PORT") {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => {
                    tracing::warn!(value = %raw, "QUADRELAY_PORT is not a valid port, ignoring");
                }
            }
        }
        config
    }
}
