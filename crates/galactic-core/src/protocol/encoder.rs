//! Value encoder: serializes value trees into the GalacticBuf wire layout.
//!
//! ```text
//! Int     := i64 (8 bytes, two's complement)
//! String  := len:u16 utf8[len]
//! List    := elem_type:u8 count:u16 elem*      (elements carry no tag)
//! Object  := field_count:u8 field*
//! field   := name_len:u8 name type:u8 value
//! ```
//!
//! Everything is written into one growing buffer.  The buffer has a hard
//! size limit (by default the 65535-byte message limit) that is checked
//! before every write, so an oversized tree fails early instead of
//! allocating its full encoding first.

use crate::protocol::classify::classify;
use crate::protocol::codec::ProtocolError;
use crate::protocol::types::{
    TypeTag, MAX_FIELDS, MAX_FIELD_NAME_LEN, MAX_LIST_LEN, MAX_MESSAGE_LEN, MAX_NESTING_DEPTH,
    MAX_STRING_LEN,
};
use crate::value::{Object, Value};

/// A size-limited output buffer with one method per wire construct.
///
/// `depth` arguments count the containers (lists and objects) enclosing the
/// value being written; the fields of a top-level message are at depth 0.
#[derive(Debug)]
pub struct Encoder {
    buf: Vec<u8>,
    limit: usize,
}

impl Encoder {
    /// Creates an encoder limited to [`MAX_MESSAGE_LEN`] bytes.
    pub fn new() -> Self {
        Self::with_limit(MAX_MESSAGE_LEN)
    }

    /// Creates an encoder that refuses to grow past `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit.min(256)),
            limit,
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the encoder and returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // ── Primitive writes ─────────────────────────────────────────────────────

    fn put(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let new_len = self.buf.len() + bytes.len();
        if new_len > self.limit {
            return Err(ProtocolError::MessageTooLong { len: new_len });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn put_u8(&mut self, value: u8) -> Result<(), ProtocolError> {
        self.put(&[value])
    }

    pub(crate) fn put_u16(&mut self, value: u16) -> Result<(), ProtocolError> {
        self.put(&value.to_be_bytes())
    }

    /// Overwrites two already-written bytes at `offset` with `value`.
    pub(crate) fn patch_u16(&mut self, offset: usize, value: u16) {
        self.buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    // ── Values ───────────────────────────────────────────────────────────────

    /// Writes an integer as 8 big-endian bytes.
    pub fn encode_int(&mut self, value: i64) -> Result<(), ProtocolError> {
        self.put(&value.to_be_bytes())
    }

    /// Writes a 2-byte length prefix followed by the UTF-8 bytes.
    pub fn encode_string(&mut self, value: &str) -> Result<(), ProtocolError> {
        let bytes = value.as_bytes();
        if bytes.len() > MAX_STRING_LEN {
            return Err(ProtocolError::StringTooLong { len: bytes.len() });
        }
        self.put_u16(bytes.len() as u16)?;
        self.put(bytes)
    }

    /// Writes a list header and its elements, value-only.
    ///
    /// An empty list is written as an `Int` list with zero elements.
    /// Otherwise the first element fixes the element type and every other
    /// element must match it.
    pub fn encode_list(&mut self, items: &[Value], depth: usize) -> Result<(), ProtocolError> {
        if items.len() > MAX_LIST_LEN {
            return Err(ProtocolError::ListTooLong { len: items.len() });
        }

        let Some(first) = items.first() else {
            self.put_u8(TypeTag::Int as u8)?;
            return self.put_u16(0);
        };

        let elem_type = classify(first);
        if !elem_type.is_list_element() {
            return Err(ProtocolError::ListElementTypeUnsupported(elem_type));
        }

        self.put_u8(elem_type as u8)?;
        self.put_u16(items.len() as u16)?;

        for item in items {
            let found = classify(item);
            if found != elem_type {
                return Err(ProtocolError::ListElementTypeMismatch {
                    expected: elem_type,
                    found,
                });
            }
            self.encode_value(item, depth)?;
        }
        Ok(())
    }

    /// Writes a 1-byte field count followed by each field in order.
    pub fn encode_object(&mut self, object: &Object, depth: usize) -> Result<(), ProtocolError> {
        if object.len() > MAX_FIELDS {
            return Err(ProtocolError::TooManyFields {
                count: object.len(),
            });
        }
        self.put_u8(object.len() as u8)?;
        for (name, value) in object {
            self.encode_field(name, value, depth)?;
        }
        Ok(())
    }

    /// Writes one named, tagged field.
    pub fn encode_field(
        &mut self,
        name: &str,
        value: &Value,
        depth: usize,
    ) -> Result<(), ProtocolError> {
        let name_bytes = name.as_bytes();
        if name_bytes.len() > MAX_FIELD_NAME_LEN {
            return Err(ProtocolError::FieldNameTooLong {
                len: name_bytes.len(),
            });
        }
        self.put_u8(name_bytes.len() as u8)?;
        self.put(name_bytes)?;
        self.put_u8(classify(value) as u8)?;
        self.encode_value(value, depth)
    }

    /// Writes a value without its type tag.
    fn encode_value(&mut self, value: &Value, depth: usize) -> Result<(), ProtocolError> {
        match value {
            Value::Int(n) => self.encode_int(*n),
            Value::Str(s) => self.encode_string(s),
            Value::List(items) => self.encode_list(items, enter(depth)?),
            Value::Object(object) => self.encode_object(object, enter(depth)?),
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the depth inside a new container, or an error past the limit.
fn enter(depth: usize) -> Result<usize, ProtocolError> {
    let inner = depth + 1;
    if inner > MAX_NESTING_DEPTH {
        return Err(ProtocolError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    Ok(inner)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
