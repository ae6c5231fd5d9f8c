//! The GalacticBuf value model.
//!
//! A [`Value`] is one of four kinds, matching the four wire type tags:
//!
//! | Variant  | Wire tag | Rust payload            |
//! |----------|----------|-------------------------|
//! | `Int`    | `0x01`   | `i64`                   |
//! | `Str`    | `0x02`   | `String` (UTF-8)        |
//! | `List`   | `0x03`   | `Vec<Value>`            |
//! | `Object` | `0x04`   | [`Object`] (ordered map) |
//!
//! The enum is closed, so there is no way to hold a float, boolean or null
//! in a value tree; those kinds have no wire representation.
//!
//! A `Value::List` may hold any values in memory (even nested lists or mixed
//! kinds).  Homogeneity and the "no lists of lists" rule are checked by the
//! encoder, which reports them as errors instead of coercing.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// An insertion-ordered mapping from field name to value.
///
/// Iteration follows insertion order, which is the order fields are written
/// to the wire.  Inserting a name that is already present replaces the value
/// in place (the field keeps its original position).  Equality compares
/// entries as a map, so two objects with the same fields in a different
/// order are equal even though they encode to different bytes.
pub type Object = IndexMap<String, Value>;

/// A GalacticBuf value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Int(i64),
    /// A UTF-8 string of at most 65535 bytes.
    Str(String),
    /// An ordered sequence of `Int`, `Str` or `Object` elements, all of one kind.
    List(Vec<Value>),
    /// A nested record of named fields.
    Object(Object),
}

impl Value {
    /// Returns a short name for the kind of this value, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

// ── JSON-style rendering ──────────────────────────────────────────────────────

/// Serializes a value the way a JSON document would show it: integers as
/// numbers, strings as strings, lists as arrays and objects as maps in
/// field order.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (name, value) in obj {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
