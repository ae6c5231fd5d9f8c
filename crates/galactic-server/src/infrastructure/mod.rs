//! Infrastructure layer for galactic-server.
//!
//! - `http_server`: hyper-based HTTP listener and router.
//! - `config_file`: the optional TOML configuration file.

pub mod config_file;
pub mod http_server;

pub use config_file::{load_config, ConfigError, FileConfig};
pub use http_server::{run_server, serve};
