//! Domain layer for galactic-server.
//!
//! Pure types with no I/O: the runtime configuration and the trade record
//! together with its mapping to and from GalacticBuf objects.

pub mod config;
pub mod trade;

pub use config::ServerConfig;
pub use trade::{Trade, TradeError};
