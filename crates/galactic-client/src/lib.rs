//! galactic-client library crate.
//!
//! A small command-line client that builds GalacticBuf messages, sends them
//! to a `galactic-server`, and prints what comes back as hex and as JSON.
//!
//! # Architecture
//!
//! ```text
//! [galactic-client]
//!   ├── application/
//!   │     ├── samples/  The demo messages and trade submissions
//!   │     └── render/   Bytes → header line, hex dump, pretty JSON
//!   └── infrastructure/
//!         └── http_client/ hyper client for the server's routes
//! ```

/// Application layer: message construction and rendering.
pub mod application;

/// Infrastructure layer: HTTP transport.
pub mod infrastructure;
