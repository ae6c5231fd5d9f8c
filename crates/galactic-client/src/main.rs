//! GalacticBuf demo client: entry point.
//!
//! # Usage
//!
//! ```text
//! galactic-client [--server <URL>] <COMMAND>
//!
//! Commands:
//!   demo      Encode the sample messages and print them (no network)
//!   example   POST a small message to /example and print the echo
//!   trades    GET /trades and print the trade list
//!   submit    POST a trade to /trades
//!   inspect   Decode a hex-encoded message given on the command line
//! ```
//!
//! `--server` defaults to `http://127.0.0.1:3000` and can be set with the
//! `GALACTIC_SERVER` environment variable.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use galactic_client::application::{parse_hex, render, samples};
use galactic_client::infrastructure::GalacticHttpClient;
use galactic_core::encode_message;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line client for the GalacticBuf HTTP server.
#[derive(Debug, Parser)]
#[command(
    name = "galactic-client",
    about = "Send and inspect GalacticBuf messages",
    version
)]
struct Cli {
    /// Base URL of the server.
    #[arg(long, default_value = "http://127.0.0.1:3000", env = "GALACTIC_SERVER")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode the two sample messages and print hex and JSON.
    Demo,

    /// POST `{name: "Alice", user_id: 1001}` to /example.
    Example,

    /// Fetch and print every stored trade.
    Trades,

    /// Submit one trade.
    Submit {
        #[arg(long)]
        buyer_id: String,
        #[arg(long)]
        seller_id: String,
        #[arg(long)]
        price: i64,
        #[arg(long)]
        quantity: i64,
    },

    /// Decode a hex-encoded message, e.g. `01000004`.
    Inspect {
        /// Message bytes as hex; whitespace and a `0x` prefix are ignored.
        hex: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Demo => {
            for (label, msg) in [
                ("user", samples::user_message()),
                ("trades", samples::trades_message()),
            ] {
                let bytes = encode_message(&msg)
                    .with_context(|| format!("failed to encode {label} message"))?;
                println!("== {label} ==\n{}\n", render(&bytes)?);
            }
        }
        Command::Example => {
            let client = GalacticHttpClient::new(&cli.server)?;
            let request = samples::example_request();
            let sent = encode_message(&request)?;
            println!("== request ==\n{}\n", render(&sent)?);
            let reply = client.post("/example", &request).await?;
            println!("== response ==\n{}", render(&reply)?);
        }
        Command::Trades => {
            let client = GalacticHttpClient::new(&cli.server)?;
            let reply = client.get("/trades").await?;
            println!("{}", render(&reply)?);
        }
        Command::Submit {
            buyer_id,
            seller_id,
            price,
            quantity,
        } => {
            let client = GalacticHttpClient::new(&cli.server)?;
            let request = samples::trade_submission(&buyer_id, &seller_id, price, quantity);
            let reply = client.post("/trades", &request).await?;
            info!("trade submitted to {}", cli.server);
            println!("{}", render(&reply)?);
        }
        Command::Inspect { hex } => {
            let bytes = parse_hex(&hex)?;
            println!("{}", render(&bytes)?);
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
