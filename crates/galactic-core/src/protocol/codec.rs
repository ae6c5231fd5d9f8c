//! Message framing: the public encode/decode entry points.
//!
//! Wire format:
//! ```text
//! [version:1][field_count:1][total_len:2][field]*
//! field := [name_len:1][name][type:1][value]
//! ```
//! `total_len` counts the whole message, header included, and must equal the
//! buffer length exactly on decode.  All multi-byte integers are big-endian.

use thiserror::Error;
use tracing::trace;

use crate::protocol::decoder::{decode_fields, decode_header, Reader};
use crate::protocol::encoder::Encoder;
use crate::protocol::types::{
    MessageHeader, TypeTag, HEADER_SIZE, MAX_FIELDS, PROTOCOL_VERSION,
};
use crate::value::Object;

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    // ── Encode-time ──────────────────────────────────────────────────────────
    /// A value has no wire representation (float, boolean, null, or an
    /// integer outside the 64-bit range).
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// A string payload exceeds 65535 bytes.
    #[error("string too long: {len} bytes (limit 65535)")]
    StringTooLong { len: usize },

    /// A field name exceeds 255 bytes.
    #[error("field name too long: {len} bytes (limit 255)")]
    FieldNameTooLong { len: usize },

    /// An object or message has more than 255 fields.
    #[error("too many fields: {count} (limit 255)")]
    TooManyFields { count: usize },

    /// A list has more than 65535 elements.
    #[error("list too long: {len} elements (limit 65535)")]
    ListTooLong { len: usize },

    /// The first element of a list is of a kind lists cannot hold.
    #[error("list elements must be int, string or object, got {0}")]
    ListElementTypeUnsupported(TypeTag),

    /// A list element differs in kind from the first element.
    #[error("list elements must share one type: expected {expected}, found {found}")]
    ListElementTypeMismatch { expected: TypeTag, found: TypeTag },

    /// The encoded message would exceed 65535 bytes.
    #[error("message too long: {len} bytes (limit 65535)")]
    MessageTooLong { len: usize },

    // ── Encode- and decode-time ──────────────────────────────────────────────
    /// Lists and objects are nested deeper than the codec accepts.
    #[error("nesting too deep: more than {max} levels")]
    NestingTooDeep { max: usize },

    // ── Decode-time ──────────────────────────────────────────────────────────
    /// A read would run past the end of the buffer.
    #[error("buffer too short: need {needed} bytes at offset {offset}, {available} available")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The version byte is not [`PROTOCOL_VERSION`].
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// The header's total length differs from the buffer length.
    #[error("length mismatch: header says {declared}, buffer is {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// A field carries a type byte that is not a known tag.
    #[error("unknown type code: 0x{0:02X}")]
    UnknownTypeCode(u8),

    /// A list header names an element type lists cannot hold.
    #[error("unsupported list element type: 0x{0:02X}")]
    UnsupportedListElementType(u8),

    /// A string or field name is not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Bytes remain after the declared number of fields was read.
    #[error("{remaining} trailing bytes after the last field")]
    TrailingBytes { remaining: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an object as a complete message, header included.
///
/// Fields are written in the object's iteration (insertion) order, so the
/// same object always produces the same bytes.
///
/// # Errors
///
/// Returns [`ProtocolError`] if any size limit is exceeded, a list is not
/// homogeneous, or the tree nests too deeply.
///
/// # Examples
///
/// ```rust
/// use galactic_core::{decode_message, encode_message, Object, Value};
///
/// let mut msg = Object::new();
/// msg.insert("id".to_string(), Value::Int(7));
/// let bytes = encode_message(&msg).unwrap();
/// assert_eq!(&bytes[..4], &[0x01, 0x01, 0x00, bytes.len() as u8]);
/// assert_eq!(decode_message(&bytes).unwrap(), msg);
/// ```
pub fn encode_message(message: &Object) -> Result<Vec<u8>, ProtocolError> {
    if message.len() > MAX_FIELDS {
        return Err(ProtocolError::TooManyFields {
            count: message.len(),
        });
    }

    let mut enc = Encoder::new();

    // Header: version (1) + field_count (1) + total_len (2, patched below)
    enc.put_u8(PROTOCOL_VERSION)?;
    enc.put_u8(message.len() as u8)?;
    enc.put_u16(0)?;

    for (name, value) in message {
        enc.encode_field(name, value, 0)?;
    }

    // The encoder refuses to grow past MAX_MESSAGE_LEN, so the total fits in u16.
    let total_len = enc.len() as u16;
    enc.patch_u16(2, total_len);

    trace!(
        fields = message.len(),
        bytes = total_len,
        "encoded GalacticBuf message"
    );
    Ok(enc.into_bytes())
}

/// Decodes a complete message into an object.
///
/// The buffer must hold exactly one message: the header's total length has
/// to match `bytes.len()`.  Duplicate field names are accepted; the last
/// occurrence wins and keeps the position of the first.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the header is invalid, a length prefix runs
/// past the end of the buffer, or a type byte is unknown.
///
/// # Examples
///
/// ```rust
/// use galactic_core::{decode_message, ProtocolError};
///
/// // Version 2 is not supported.
/// let err = decode_message(&[0x02, 0x00, 0x00, 0x04]).unwrap_err();
/// assert_eq!(err, ProtocolError::UnsupportedVersion(2));
/// ```
pub fn decode_message(bytes: &[u8]) -> Result<Object, ProtocolError> {
    let mut reader = Reader::new(bytes);
    let header = decode_header(&mut reader)?;

    let declared = usize::from(header.total_length);
    if declared != bytes.len() {
        return Err(ProtocolError::LengthMismatch {
            declared,
            actual: bytes.len(),
        });
    }

    let fields = decode_fields(&mut reader, usize::from(header.field_count), 0)?;

    if !reader.is_empty() {
        return Err(ProtocolError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }

    trace!(
        fields = fields.len(),
        bytes = bytes.len(),
        "decoded GalacticBuf message"
    );
    Ok(fields)
}

/// Reads and validates only the 4-byte header at the start of `bytes`.
///
/// Useful for a transport that wants to know how many bytes a message
/// occupies before it has all of them.  Only the version is checked; the
/// declared length is returned as-is.
///
/// # Errors
///
/// Returns [`ProtocolError::BufferTooShort`] for fewer than 4 bytes and
/// [`ProtocolError::UnsupportedVersion`] for a foreign version byte.
pub fn peek_header(bytes: &[u8]) -> Result<MessageHeader, ProtocolError> {
    let mut reader = Reader::new(bytes);
    let header = decode_header(&mut reader)?;
    debug_assert_eq!(reader.position(), HEADER_SIZE);
    Ok(header)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
