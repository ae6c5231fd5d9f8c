//! Server configuration types.
//!
//! [`ServerConfig`] holds every runtime setting the HTTP layer needs.  It is
//! assembled once at startup from CLI flags, environment variables and the
//! optional TOML file (see `main.rs`); nothing in here reads the environment.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Largest accepted request body (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// All runtime configuration for the HTTP server.
///
/// # Example
///
/// ```rust
/// use galactic_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address and port the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Requests with a larger body are answered with `413 Payload Too Large`.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    /// | Field          | Default        |
    /// |----------------|----------------|
    /// | bind_addr      | `0.0.0.0:3000` |
    /// | max_body_bytes | 1 MiB          |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
