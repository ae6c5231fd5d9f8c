//! Application layer for galactic-server.
//!
//! Holds the trade store and the route handlers.  Handlers take and return
//! raw GalacticBuf bytes so they can be exercised without an HTTP stack.

pub mod handlers;
pub mod trade_store;

pub use handlers::{echo, list_trades, submit_trade, HandlerError};
pub use trade_store::{InMemoryTradeStore, StoreError, TradeRepository, DEFAULT_TRADE_CAPACITY};
