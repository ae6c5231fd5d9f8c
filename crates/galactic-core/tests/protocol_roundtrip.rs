//! Integration tests for the galactic-core codec.
//!
//! These tests drive the public API only: the reference byte vector, nested
//! round-trips, the list and header rules, and bounds safety on hostile
//! input.

use galactic_core::protocol::types::{HEADER_SIZE, MAX_NESTING_DEPTH};
use galactic_core::{
    decode_message, encode_message, peek_header, Object, ProtocolError, TypeTag, Value,
};
use proptest::prelude::*;

/// Reference encoding of `{user_id: 1001, name: "Alice", scores: [100, 200, 300]}`.
const USER_MESSAGE_HEX: &str = "0103004507757365725f69640100000000000003e9046e616d65020005416c6963650673636f72657303010003000000000000006400000000000000c8000000000000012c";

fn object(fields: Vec<(&str, Value)>) -> Object {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn user_message() -> Object {
    object(vec![
        ("user_id", Value::Int(1001)),
        ("name", Value::from("Alice")),
        ("scores", Value::from(vec![100i64, 200, 300])),
    ])
}

fn trades_message() -> Object {
    object(vec![
        ("timestamp", Value::Int(1_698_765_432)),
        (
            "trades",
            Value::List(vec![
                Value::Object(object(vec![("id", Value::Int(1)), ("price", Value::Int(100))])),
                Value::Object(object(vec![("id", Value::Int(2)), ("price", Value::Int(200))])),
            ]),
        ),
    ])
}

/// Encodes a message and then decodes it, asserting the header agrees with
/// the buffer along the way.
fn roundtrip(msg: &Object) -> Object {
    let bytes = encode_message(msg).expect("encode must succeed");
    let header = peek_header(&bytes).expect("header must parse");
    assert_eq!(usize::from(header.total_length), bytes.len());
    assert_eq!(usize::from(header.field_count), msg.len());
    decode_message(&bytes).expect("decode must succeed")
}

// ── Reference vector ──────────────────────────────────────────────────────────

#[test]
fn test_user_message_matches_reference_bytes() {
    let bytes = encode_message(&user_message()).unwrap();

    assert_eq!(hex::encode(&bytes), USER_MESSAGE_HEX);
    assert_eq!(bytes.len(), 0x45);
}

#[test]
fn test_reference_bytes_decode_to_user_message() {
    let bytes = hex::decode(USER_MESSAGE_HEX).unwrap();

    let decoded = decode_message(&bytes).unwrap();

    assert_eq!(decoded, user_message());
    let names: Vec<&str> = decoded.keys().map(String::as_str).collect();
    assert_eq!(names, ["user_id", "name", "scores"]);
}

// ── Nested structures ─────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_list_of_objects() {
    let original = trades_message();

    let decoded = roundtrip(&original);

    assert_eq!(decoded, original);
    let trades = decoded["trades"].as_list().unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[1].as_object().unwrap()["price"], Value::Int(200));
}

#[test]
fn test_list_of_objects_layout() {
    let bytes = encode_message(&trades_message()).unwrap();

    // header + timestamp field + trades field prefix + list header + 2 objects
    assert_eq!(bytes.len(), 4 + 19 + 8 + 3 + 2 * 28);
    // "trades" list header: object elements, count 2.
    let list_header = 4 + 19 + 8;
    assert_eq!(
        &bytes[list_header..list_header + 3],
        &[TypeTag::Object as u8, 0x00, 0x02]
    );
}

#[test]
fn test_roundtrip_preserves_field_order_of_nested_objects() {
    let original = object(vec![(
        "outer",
        Value::Object(object(vec![
            ("z", Value::Int(1)),
            ("a", Value::from("x")),
            ("m", Value::from(vec!["p", "q"])),
        ])),
    )]);

    let decoded = roundtrip(&original);

    let inner = decoded["outer"].as_object().unwrap();
    let names: Vec<&str> = inner.keys().map(String::as_str).collect();
    assert_eq!(names, ["z", "a", "m"]);
}

#[test]
fn test_reordered_objects_are_equal_but_encode_differently() {
    let ab = object(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);
    let ba = object(vec![("b", Value::Int(2)), ("a", Value::Int(1))]);

    assert_eq!(ab, ba);
    assert_ne!(encode_message(&ab).unwrap(), encode_message(&ba).unwrap());
}

// ── List rules ────────────────────────────────────────────────────────────────

#[test]
fn test_mixed_list_is_rejected() {
    let msg = object(vec![(
        "mixed",
        Value::List(vec![Value::Int(1), Value::from("two")]),
    )]);

    assert_eq!(
        encode_message(&msg),
        Err(ProtocolError::ListElementTypeMismatch {
            expected: TypeTag::Int,
            found: TypeTag::Str,
        })
    );
}

#[test]
fn test_nested_list_is_rejected() {
    let msg = object(vec![(
        "grid",
        Value::List(vec![Value::from(vec![1i64]), Value::from(vec![2i64])]),
    )]);

    assert_eq!(
        encode_message(&msg),
        Err(ProtocolError::ListElementTypeUnsupported(TypeTag::List))
    );
}

#[test]
fn test_empty_list_round_trips_as_empty_list() {
    // The element type of an empty list is not recoverable; only emptiness is.
    let msg = object(vec![("none", Value::List(vec![]))]);

    let decoded = roundtrip(&msg);

    assert_eq!(decoded["none"], Value::List(vec![]));
}

// ── Header guards ─────────────────────────────────────────────────────────────

#[test]
fn test_foreign_version_is_rejected() {
    let mut bytes = hex::decode(USER_MESSAGE_HEX).unwrap();
    bytes[0] = 0x02;

    assert_eq!(
        decode_message(&bytes),
        Err(ProtocolError::UnsupportedVersion(0x02))
    );
}

#[test]
fn test_declared_length_must_match_buffer() {
    let mut bytes = hex::decode(USER_MESSAGE_HEX).unwrap();
    bytes[3] = 0x46;

    assert_eq!(
        decode_message(&bytes),
        Err(ProtocolError::LengthMismatch {
            declared: 0x46,
            actual: 0x45,
        })
    );
}

// ── Bounds safety ─────────────────────────────────────────────────────────────

#[test]
fn test_every_truncation_of_a_valid_message_fails_cleanly() {
    let bytes = encode_message(&trades_message()).unwrap();

    for cut in 0..bytes.len() {
        let result = decode_message(&bytes[..cut]);
        assert!(result.is_err(), "prefix of {cut} bytes must not decode");
    }
}

#[test]
fn test_oversized_string_length_is_caught_before_reading() {
    // One field "s" whose string claims 0xFFFF bytes but the message ends.
    let bytes = [0x01, 0x01, 0x00, 0x09, 0x01, b's', 0x02, 0xFF, 0xFF];

    assert_eq!(
        decode_message(&bytes),
        Err(ProtocolError::BufferTooShort {
            offset: 9,
            needed: 0xFFFF,
            available: 0,
        })
    );
}

#[test]
fn test_header_only_input_shorter_than_header() {
    assert!(matches!(
        decode_message(&[0x01, 0x00]),
        Err(ProtocolError::BufferTooShort { needed: HEADER_SIZE, .. })
    ));
}

/// `levels` objects, each holding the next under `n`.
fn object_chain(levels: usize) -> Value {
    let mut value = Value::Int(0);
    for _ in 0..levels {
        value = Value::Object(object(vec![("n", value)]));
    }
    value
}

/// `levels` containers alternating object and single-element list, with an
/// object innermost so no list ever holds a list.
fn list_object_chain(levels: usize) -> Value {
    let mut value = Value::Int(0);
    for level in 0..levels {
        value = if level % 2 == 0 {
            Value::Object(object(vec![("n", value)]))
        } else {
            Value::List(vec![value])
        };
    }
    value
}

#[test]
fn test_object_chain_at_nesting_limit_roundtrips() {
    let msg = object(vec![("deep", object_chain(MAX_NESTING_DEPTH))]);

    assert_eq!(roundtrip(&msg), msg);
}

#[test]
fn test_list_object_chain_at_nesting_limit_roundtrips() {
    // Arrange
    let msg = object(vec![("deep", list_object_chain(MAX_NESTING_DEPTH))]);

    // Act
    let decoded = roundtrip(&msg);

    // Assert
    assert_eq!(decoded, msg);
    assert!(matches!(decoded["deep"], Value::List(_)));
}

#[test]
fn test_every_depth_the_encoder_accepts_decodes() {
    for levels in 0..=MAX_NESTING_DEPTH + 2 {
        for chain in [object_chain(levels), list_object_chain(levels)] {
            let msg = object(vec![("deep", chain)]);
            match encode_message(&msg) {
                Ok(bytes) => {
                    assert!(levels <= MAX_NESTING_DEPTH, "encoded {levels} levels");
                    assert_eq!(decode_message(&bytes), Ok(msg), "{levels} levels");
                }
                Err(err) => {
                    assert!(levels > MAX_NESTING_DEPTH, "rejected {levels} levels");
                    assert_eq!(
                        err,
                        ProtocolError::NestingTooDeep {
                            max: MAX_NESTING_DEPTH
                        }
                    );
                }
            }
        }
    }
}

#[test]
fn test_nesting_limit_applies_to_encode() {
    let mut value = Value::Int(0);
    for _ in 0..=MAX_NESTING_DEPTH {
        value = Value::Object(object(vec![("n", value)]));
    }
    let msg = object(vec![("deep", value)]);

    assert_eq!(
        encode_message(&msg),
        Err(ProtocolError::NestingTooDeep {
            max: MAX_NESTING_DEPTH
        })
    );
}

// ── Property tests ────────────────────────────────────────────────────────────

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}"
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \u{e9}\u{4e16}]{0,12}"
}

fn object_of(value: impl Strategy<Value = Value>) -> impl Strategy<Value = Object> {
    prop::collection::vec((field_name(), value), 0..4)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Value trees that satisfy every encoder rule: lists are non-empty,
/// homogeneous and never hold lists.
fn value_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![any::<i64>().prop_map(Value::Int), text().prop_map(Value::Str)];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(any::<i64>(), 1..5)
                .prop_map(|v| Value::List(v.into_iter().map(Value::Int).collect())),
            prop::collection::vec(text(), 1..5)
                .prop_map(|v| Value::List(v.into_iter().map(Value::Str).collect())),
            prop::collection::vec(object_of(inner.clone()), 1..4)
                .prop_map(|v| Value::List(v.into_iter().map(Value::Object).collect())),
            object_of(inner).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn prop_encoded_messages_decode_to_themselves(
        msg in prop::collection::vec((field_name(), value_tree()), 0..8)
            .prop_map(|fields| fields.into_iter().collect::<Object>())
    ) {
        let bytes = encode_message(&msg).unwrap();
        let decoded = decode_message(&bytes).unwrap();

        prop_assert_eq!(&decoded, &msg);
        let names: Vec<&String> = decoded.keys().collect();
        let expected: Vec<&String> = msg.keys().collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_message(&bytes);
    }

    #[test]
    fn prop_arbitrary_body_behind_valid_header_never_panics(
        count in any::<u8>(),
        body in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let total = (HEADER_SIZE + body.len()) as u16;
        let mut bytes = vec![0x01, count];
        bytes.extend_from_slice(&total.to_be_bytes());
        bytes.extend_from_slice(&body);

        let _ = decode_message(&bytes);
    }
}
