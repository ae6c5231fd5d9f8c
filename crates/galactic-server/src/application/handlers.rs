//! Request handlers: GalacticBuf bytes in, GalacticBuf bytes out.
//!
//! The HTTP layer picks a handler by route and maps a [`HandlerError`] to a
//! status code with [`HandlerError::status_code`].  Decode failures are the
//! caller's fault (400); encode failures are ours (500); a full store is 503.

use galactic_core::protocol::encoder::Encoder;
use galactic_core::protocol::types::{HEADER_SIZE, MAX_MESSAGE_LEN};
use galactic_core::{decode_message, encode_message, Object, ProtocolError, Value};
use thiserror::Error;
use tracing::debug;

use crate::application::trade_store::{StoreError, TradeRepository};
use crate::domain::trade::{now_millis, Trade, TradeError};

/// Error type for request handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request body is not a valid GalacticBuf message.
    #[error("malformed request message: {0}")]
    Decode(#[source] ProtocolError),

    /// The request decoded but does not describe a valid trade.
    #[error("invalid trade: {0}")]
    InvalidTrade(#[from] TradeError),

    /// The response could not be encoded (usually: over the size limit).
    #[error("failed to encode response: {0}")]
    Encode(#[source] ProtocolError),

    /// The trade store could not be accessed.
    #[error("trade store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl HandlerError {
    /// HTTP status code to answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::Decode(_) | HandlerError::InvalidTrade(_) => 400,
            HandlerError::Store(StoreError::Full { .. }) => 503,
            HandlerError::Encode(_) | HandlerError::Store(_) => 500,
        }
    }
}

const TRADES_FIELD: &str = "trades";

/// Bytes left for list elements once the header, the `trades` field prefix
/// and the list header are written.
const LISTING_BUDGET: usize =
    MAX_MESSAGE_LEN - HEADER_SIZE - (1 + TRADES_FIELD.len() + 1) - 3;

/// `GET /trades`: stored trades, newest first.
///
/// Trades with equal timestamps keep their insertion order.  When the whole
/// store does not fit in one message, the listing holds the newest trades
/// that do.
pub fn list_trades(repo: &dyn TradeRepository) -> Result<Vec<u8>, HandlerError> {
    let mut trades = repo.snapshot()?;
    trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut listed = Vec::new();
    let mut used = 0;
    for trade in &trades {
        let object = trade.to_object();
        let mut enc = Encoder::with_limit(LISTING_BUDGET);
        enc.encode_object(&object, 2).map_err(HandlerError::Encode)?;
        if used + enc.len() > LISTING_BUDGET {
            break;
        }
        used += enc.len();
        listed.push(Value::Object(object));
    }

    if listed.len() < trades.len() {
        debug!(
            listed = listed.len(),
            stored = trades.len(),
            "listing truncated to the message size limit"
        );
    } else {
        debug!(count = listed.len(), "listing trades");
    }

    let mut response = Object::new();
    response.insert(TRADES_FIELD.to_string(), Value::List(listed));
    encode_message(&response).map_err(HandlerError::Encode)
}

/// `POST /trades`: stores one trade and answers with its id and timestamp.
pub fn submit_trade(repo: &dyn TradeRepository, body: &[u8]) -> Result<Vec<u8>, HandlerError> {
    let message = decode_message(body).map_err(HandlerError::Decode)?;
    let trade = Trade::from_submission(&message, now_millis())?;

    let mut response = Object::new();
    response.insert("trade_id".to_string(), Value::from(trade.trade_id.as_str()));
    response.insert("timestamp".to_string(), Value::Int(trade.timestamp));
    let bytes = encode_message(&response).map_err(HandlerError::Encode)?;

    debug!(
        trade_id = %trade.trade_id,
        price = trade.price,
        quantity = trade.quantity,
        "trade accepted"
    );
    repo.append(trade)?;
    Ok(bytes)
}

/// `POST /example`: returns the request message with a `received_fields`
/// count of its top-level fields appended.
pub fn echo(body: &[u8]) -> Result<Vec<u8>, HandlerError> {
    let mut message = decode_message(body).map_err(HandlerError::Decode)?;
    let received = message.len() as i64;
    message.insert("received_fields".to_string(), Value::Int(received));
    encode_message(&message).map_err(HandlerError::Encode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
