//! Maps values to their wire type tag.
//!
//! [`Value`] is a closed enum, so classifying it cannot fail.  Values built
//! from loosely typed input (`serde_json::Value`) go through
//! [`classify_json`] or `Value::try_from`, which reject kinds the wire
//! cannot carry: floats with a fractional part, booleans, null, and
//! integers outside the `i64` range.

use serde_json::Value as Json;

use crate::protocol::codec::ProtocolError;
use crate::protocol::types::TypeTag;
use crate::value::{Object, Value};

/// Returns the wire tag for `value`.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Int(_) => TypeTag::Int,
        Value::Str(_) => TypeTag::Str,
        Value::List(_) => TypeTag::List,
        Value::Object(_) => TypeTag::Object,
    }
}

/// Returns the wire tag a JSON value would be encoded with.
///
/// Only the top level is inspected; nested values are checked when the
/// whole tree is converted with `Value::try_from`.
pub fn classify_json(value: &Json) -> Result<TypeTag, ProtocolError> {
    match value {
        Json::Number(n) => json_int(n).map(|_| TypeTag::Int),
        Json::String(_) => Ok(TypeTag::Str),
        Json::Array(_) => Ok(TypeTag::List),
        Json::Object(_) => Ok(TypeTag::Object),
        Json::Bool(_) | Json::Null => Err(unsupported(value)),
    }
}

fn unsupported(value: &Json) -> ProtocolError {
    match value {
        Json::Bool(b) => ProtocolError::UnsupportedValueType(format!("boolean {b}")),
        Json::Null => ProtocolError::UnsupportedValueType("null".to_string()),
        other => ProtocolError::UnsupportedValueType(other.to_string()),
    }
}

/// Extracts an `i64` from a JSON number.
///
/// Floats are accepted when they hold an integral value in range, since
/// JSON itself does not tell `3` from `3.0` reliably.
fn json_int(n: &serde_json::Number) -> Result<i64, ProtocolError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(ProtocolError::UnsupportedValueType(format!(
            "integer {n} out of 64-bit signed range"
        )));
    }
    match n.as_f64() {
        // 2^63 is exactly representable; anything at or above it overflows.
        Some(f) if f.fract() == 0.0 && f >= -(2f64.powi(63)) && f < 2f64.powi(63) => Ok(f as i64),
        _ => Err(ProtocolError::UnsupportedValueType(format!("float {n}"))),
    }
}

impl TryFrom<Json> for Value {
    type Error = ProtocolError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Number(n) => json_int(&n).map(Value::Int),
            Json::String(s) => Ok(Value::Str(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Json::Object(map) => map
                .into_iter()
                .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                .collect::<Result<Object, _>>()
                .map(Value::Object),
            other @ (Json::Bool(_) | Json::Null) => Err(unsupported(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_every_variant() {
        assert_eq!(classify(&Value::Int(1)), TypeTag::Int);
        assert_eq!(classify(&Value::from("x")), TypeTag::Str);
        assert_eq!(classify(&Value::List(vec![])), TypeTag::List);
        assert_eq!(classify(&Value::Object(Object::new())), TypeTag::Object);
    }

    #[test]
    fn test_classify_json_accepts_integral_numbers() {
        assert_eq!(classify_json(&json!(42)), Ok(TypeTag::Int));
        assert_eq!(classify_json(&json!(-1)), Ok(TypeTag::Int));
        assert_eq!(classify_json(&json!(3.0)), Ok(TypeTag::Int));
    }

    #[test]
    fn test_classify_json_rejects_fractional_float() {
        assert!(matches!(
            classify_json(&json!(1.5)),
            Err(ProtocolError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_classify_json_rejects_u64_above_i64_max() {
        let big = json!(u64::MAX);
        assert!(matches!(
            classify_json(&big),
            Err(ProtocolError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_classify_json_rejects_bool_and_null() {
        assert!(classify_json(&json!(true)).is_err());
        assert!(classify_json(&json!(null)).is_err());
    }

    #[test]
    fn test_try_from_json_builds_nested_tree() {
        let json = json!({"user_id": 1001, "name": "Alice", "scores": [100, 200, 300]});

        let value = Value::try_from(json).unwrap();

        let obj = value.as_object().unwrap();
        assert_eq!(obj["user_id"], Value::Int(1001));
        assert_eq!(obj["name"], Value::from("Alice"));
        assert_eq!(obj["scores"], Value::from(vec![100i64, 200, 300]));
    }

    #[test]
    fn test_try_from_json_rejects_nested_null() {
        let json = json!({"trades": [{"id": 1, "note": null}]});
        assert_eq!(
            Value::try_from(json),
            Err(ProtocolError::UnsupportedValueType("null".to_string()))
        );
    }
}
