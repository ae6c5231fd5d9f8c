//! galactic-server library crate.
//!
//! An HTTP service whose request and response bodies are GalacticBuf
//! messages.  It keeps an in-memory list of trades and exposes it over a
//! small set of routes.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! HTTP client (application/octet-stream bodies)
//!         ↕
//! [galactic-server]
//!   ├── domain/           Pure types: ServerConfig, Trade
//!   ├── application/      Trade store and request handlers (bytes in, bytes out)
//!   └── infrastructure/
//!         ├── http_server/ hyper routing, body limits, graceful shutdown
//!         └── config_file/ TOML configuration file
//! ```
//!
//! # Layer rules
//!
//! - `domain` depends only on `galactic-core`.
//! - `application` depends on `domain` and `galactic-core`; it never sees an
//!   HTTP type, so every handler can be tested with plain byte slices.
//! - `infrastructure` depends on all other layers plus `hyper` and `tokio`.

/// Domain layer: configuration and the trade record.
pub mod domain;

/// Application layer: trade storage and the request handlers.
pub mod application;

/// Infrastructure layer: HTTP server and configuration file.
pub mod infrastructure;
