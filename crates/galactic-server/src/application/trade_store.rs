//! Trade storage.
//!
//! [`TradeRepository`] is the seam between the handlers and wherever trades
//! live.  The server ships one implementation, [`InMemoryTradeStore`]; all
//! trades are lost when the process exits.

use std::sync::RwLock;

use thiserror::Error;

use crate::domain::Trade;

/// Trades an [`InMemoryTradeStore`] holds before refusing appends.
pub const DEFAULT_TRADE_CAPACITY: usize = 100_000;

/// Error type for trade storage operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A thread panicked while holding the store lock.
    #[error("trade store lock poisoned")]
    Poisoned,

    /// The store already holds its maximum number of trades.
    #[error("trade store is full ({capacity} trades)")]
    Full { capacity: usize },
}

/// Append-only collection of trades shared by every request.
#[cfg_attr(test, mockall::automock)]
pub trait TradeRepository: Send + Sync {
    /// Adds a trade after all existing ones.
    fn append(&self, trade: Trade) -> Result<(), StoreError>;

    /// Returns a copy of every stored trade in insertion order.
    fn snapshot(&self) -> Result<Vec<Trade>, StoreError>;
}

/// [`TradeRepository`] backed by a `Vec` behind a read/write lock.
///
/// Many requests may read the list at once; an append takes the lock
/// exclusively for the duration of one `push`.  Appends past `capacity`
/// fail with [`StoreError::Full`].
#[derive(Debug)]
pub struct InMemoryTradeStore {
    trades: RwLock<Vec<Trade>>,
    capacity: usize,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::with_capacity_limit(DEFAULT_TRADE_CAPACITY)
    }

    /// Creates an empty store that accepts at most `capacity` trades.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            trades: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Creates a store that already holds `trades`.
    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self {
            trades: RwLock::new(trades),
            capacity: DEFAULT_TRADE_CAPACITY,
        }
    }
}

impl Default for InMemoryTradeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeRepository for InMemoryTradeStore {
    fn append(&self, trade: Trade) -> Result<(), StoreError> {
        let mut trades = self.trades.write().map_err(|_| StoreError::Poisoned)?;
        if trades.len() >= self.capacity {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }
        trades.push(trade);
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Trade>, StoreError> {
        Ok(self
            .trades
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
