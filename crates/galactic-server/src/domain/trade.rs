//! The trade record kept by the server.
//!
//! On the wire a trade is a GalacticBuf object with six fields, always
//! written in this order:
//!
//! | Field       | Kind   |
//! |-------------|--------|
//! | `trade_id`  | string |
//! | `buyer_id`  | string |
//! | `seller_id` | string |
//! | `price`     | int    |
//! | `quantity`  | int    |
//! | `timestamp` | int    |
//!
//! `timestamp` is Unix time in milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

use galactic_core::{Object, Value};
use thiserror::Error;
use uuid::Uuid;

/// Reasons an object cannot be read as a [`Trade`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeError {
    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present but holds the wrong kind of value.
    #[error("field `{field}` must be {expected}, got {found}")]
    WrongKind {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// One executed trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub trade_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub price: i64,
    pub quantity: i64,
    pub timestamp: i64,
}

impl Trade {
    /// Builds the wire object for this trade, fields in canonical order.
    pub fn to_object(&self) -> Object {
        let mut obj = Object::with_capacity(6);
        obj.insert("trade_id".to_string(), Value::from(self.trade_id.as_str()));
        obj.insert("buyer_id".to_string(), Value::from(self.buyer_id.as_str()));
        obj.insert("seller_id".to_string(), Value::from(self.seller_id.as_str()));
        obj.insert("price".to_string(), Value::Int(self.price));
        obj.insert("quantity".to_string(), Value::Int(self.quantity));
        obj.insert("timestamp".to_string(), Value::Int(self.timestamp));
        obj
    }

    /// Reads a complete trade; every field must be present.
    ///
    /// Fields not listed in the module table are ignored.
    pub fn from_object(obj: &Object) -> Result<Self, TradeError> {
        Ok(Self {
            trade_id: required_str(obj, "trade_id")?,
            buyer_id: required_str(obj, "buyer_id")?,
            seller_id: required_str(obj, "seller_id")?,
            price: required_int(obj, "price")?,
            quantity: required_int(obj, "quantity")?,
            timestamp: required_int(obj, "timestamp")?,
        })
    }

    /// Reads a trade submitted by a client.
    ///
    /// `trade_id` and `timestamp` may be omitted: a missing id is replaced
    /// with a fresh UUID v4 and a missing timestamp with `now_ms`.  When
    /// present they must still have the right kind.
    pub fn from_submission(obj: &Object, now_ms: i64) -> Result<Self, TradeError> {
        let trade_id = match optional_str(obj, "trade_id")? {
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };
        Ok(Self {
            trade_id,
            buyer_id: required_str(obj, "buyer_id")?,
            seller_id: required_str(obj, "seller_id")?,
            price: required_int(obj, "price")?,
            quantity: required_int(obj, "quantity")?,
            timestamp: optional_int(obj, "timestamp")?.unwrap_or(now_ms),
        })
    }
}

/// Current Unix time in milliseconds, or 0 if the clock is before 1970.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

// ── Field helpers ─────────────────────────────────────────────────────────────

fn optional_str(obj: &Object, field: &'static str) -> Result<Option<String>, TradeError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s.clone())),
        Some(other) => Err(TradeError::WrongKind {
            field,
            expected: "string",
            found: other.kind_name(),
        }),
    }
}

fn optional_int(obj: &Object, field: &'static str) -> Result<Option<i64>, TradeError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Int(n)) => Ok(Some(*n)),
        Some(other) => Err(TradeError::WrongKind {
            field,
            expected: "int",
            found: other.kind_name(),
        }),
    }
}

fn required_str(obj: &Object, field: &'static str) -> Result<String, TradeError> {
    optional_str(obj, field)?.ok_or(TradeError::MissingField(field))
}

fn required_int(obj: &Object, field: &'static str) -> Result<i64, TradeError> {
    optional_int(obj, field)?.ok_or(TradeError::MissingField(field))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
