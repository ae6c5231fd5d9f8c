//! GalacticBuf HTTP server: entry point.
//!
//! # Usage
//!
//! ```text
//! galactic-server [OPTIONS]
//!
//! Options:
//!   --port           <PORT>  HTTP listener port [default: 3000]
//!   --bind           <ADDR>  IP address to bind [default: 0.0.0.0]
//!   --max-body-bytes <N>     Largest accepted request body [default: 1048576]
//!   --config         <PATH>  TOML config file
//! ```
//!
//! # Configuration sources
//!
//! Each setting is taken from the first source that provides it:
//! CLI flag, then environment variable, then the `[server]` table of the
//! config file, then the built-in default.
//!
//! | Variable                  | Flag               |
//! |---------------------------|--------------------|
//! | `PORT`                    | `--port`           |
//! | `GALACTIC_BIND`           | `--bind`           |
//! | `GALACTIC_MAX_BODY_BYTES` | `--max-body-bytes` |
//! | `GALACTIC_CONFIG`         | `--config`         |
//!
//! Logging follows `RUST_LOG`; when unset, the config file's `log_level`
//! (default `info`) is used.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use galactic_server::application::{InMemoryTradeStore, TradeRepository};
use galactic_server::domain::ServerConfig;
use galactic_server::infrastructure::{load_config, run_server, FileConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// HTTP server exchanging GalacticBuf binary messages.
///
/// Flags without a value fall through to the config file and then to the
/// built-in defaults, so none of them carry a clap default.
#[derive(Debug, Parser)]
#[command(
    name = "galactic-server",
    about = "HTTP server exchanging GalacticBuf binary messages",
    version
)]
struct Cli {
    /// TCP port for the HTTP listener.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// IP address to bind the listener to.
    ///
    /// `0.0.0.0` accepts connections on every interface; `127.0.0.1` only
    /// from this machine.
    #[arg(long, env = "GALACTIC_BIND")]
    bind: Option<String>,

    /// Largest accepted request body in bytes.
    #[arg(long, env = "GALACTIC_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,

    /// Path to a TOML config file.  It must exist when given.
    #[arg(long, env = "GALACTIC_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file named by `--config`, or the defaults if none.
    fn load_file_config(&self) -> anyhow::Result<FileConfig> {
        match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config file {}", path.display())),
            None => Ok(FileConfig::default()),
        }
    }

    /// Merges the parsed arguments over `file` into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting bind address is not an IP address.
    fn into_server_config(self, file: &FileConfig) -> anyhow::Result<ServerConfig> {
        let bind = self
            .bind
            .unwrap_or_else(|| file.server.bind_address.clone());
        let port = self.port.unwrap_or(file.server.port);

        let ip: IpAddr = bind
            .parse()
            .with_context(|| format!("invalid bind address: '{bind}'"))?;

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(ip, port),
            max_body_bytes: self.max_body_bytes.unwrap_or(file.server.max_body_bytes),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. Parses CLI arguments and loads the optional config file.
/// 2. Initialises `tracing_subscriber`.
/// 3. Spawns a Ctrl+C handler that clears the shared `running` flag.
/// 4. Runs the HTTP server until the flag is cleared.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = cli.load_file_config()?;

    // `RUST_LOG` wins; otherwise the config file's level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&file.server.log_level)),
        )
        .init();

    let config = cli.into_server_config(&file)?;
    info!(
        "GalacticBuf server starting on {} (max body {} bytes)",
        config.bind_addr, config.max_body_bytes
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    let store: Arc<dyn TradeRepository> = Arc::new(InMemoryTradeStore::new());
    run_server(config, store, running).await?;

    info!("GalacticBuf server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
