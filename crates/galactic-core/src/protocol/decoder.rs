//! Value decoder: parses the GalacticBuf wire layout with a forward-only cursor.
//!
//! Every length read from the input is checked against the bytes that remain
//! before anything is read, so a crafted length prefix produces
//! [`ProtocolError::BufferTooShort`] instead of an out-of-bounds read.

use crate::protocol::codec::ProtocolError;
use crate::protocol::types::{
    MessageHeader, TypeTag, HEADER_SIZE, MAX_NESTING_DEPTH, PROTOCOL_VERSION,
};
use crate::value::{Object, Value};

/// Smallest encoding of one list element, by element type.
const MIN_INT_ELEM: usize = 8;
const MIN_STR_ELEM: usize = 2;
const MIN_OBJECT_ELEM: usize = 1;

// ── Cursor ────────────────────────────────────────────────────────────────────

/// A read cursor over a byte slice that only ever moves forward.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a cursor at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Returns `true` once every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails unless at least `needed` bytes remain.
    pub fn require(&self, needed: usize) -> Result<(), ProtocolError> {
        if self.remaining() < needed {
            return Err(ProtocolError::BufferTooShort {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Reads the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        self.require(len)?;
        let bytes = self.bytes;
        let slice = &bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ProtocolError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_i64(&mut self) -> Result<i64, ProtocolError> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Reads `len` bytes and checks that they are valid UTF-8.
    fn read_utf8(&mut self, len: usize) -> Result<String, ProtocolError> {
        let offset = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| ProtocolError::InvalidUtf8 {
                offset: offset + e.valid_up_to(),
            })
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

/// Reads the 4-byte message header and checks the version byte.
///
/// The declared total length is returned unchecked; comparing it to the
/// buffer is the caller's job.
pub fn decode_header(r: &mut Reader<'_>) -> Result<MessageHeader, ProtocolError> {
    r.require(HEADER_SIZE)?;
    let version = r.read_u8()?;
    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version));
    }
    let field_count = r.read_u8()?;
    let total_length = r.read_u16()?;
    Ok(MessageHeader {
        version,
        field_count,
        total_length,
    })
}

// ── Values ────────────────────────────────────────────────────────────────────

/// Reads an 8-byte big-endian integer.
pub fn decode_int(r: &mut Reader<'_>) -> Result<i64, ProtocolError> {
    r.read_i64()
}

/// Reads a 2-byte length prefix and that many UTF-8 bytes.
pub fn decode_string(r: &mut Reader<'_>) -> Result<String, ProtocolError> {
    let len = usize::from(r.read_u16()?);
    r.read_utf8(len)
}

/// Reads a list header and `count` value-only elements.
///
/// `depth` is the depth of the list itself.
pub fn decode_list(r: &mut Reader<'_>, depth: usize) -> Result<Vec<Value>, ProtocolError> {
    let elem_byte = r.read_u8()?;
    let count = usize::from(r.read_u16()?);

    let (elem_type, min_elem) = match TypeTag::try_from(elem_byte) {
        Ok(TypeTag::Int) => (TypeTag::Int, MIN_INT_ELEM),
        Ok(TypeTag::Str) => (TypeTag::Str, MIN_STR_ELEM),
        Ok(TypeTag::Object) => (TypeTag::Object, MIN_OBJECT_ELEM),
        _ => return Err(ProtocolError::UnsupportedListElementType(elem_byte)),
    };

    // Reject counts the remaining bytes cannot possibly hold before
    // allocating for them.
    r.require(count * min_elem)?;

    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(decode_value(r, elem_type, depth)?);
    }
    Ok(items)
}

/// Reads a 1-byte field count and that many fields.
///
/// `depth` is the depth of the object itself.
pub fn decode_object(r: &mut Reader<'_>, depth: usize) -> Result<Object, ProtocolError> {
    let count = usize::from(r.read_u8()?);
    decode_fields(r, count, depth)
}

/// Reads `count` fields into an object.  A repeated name replaces the
/// earlier value.
pub fn decode_fields(
    r: &mut Reader<'_>,
    count: usize,
    depth: usize,
) -> Result<Object, ProtocolError> {
    // Each field is at least name_len + type + a 1-byte value.
    let mut fields = Object::with_capacity(count.min(r.remaining() / 3));
    for _ in 0..count {
        let (name, value) = decode_field(r, depth)?;
        fields.insert(name, value);
    }
    Ok(fields)
}

/// Reads one field: name length, name, type tag, and the tagged value.
pub fn decode_field(r: &mut Reader<'_>, depth: usize) -> Result<(String, Value), ProtocolError> {
    let name_len = usize::from(r.read_u8()?);
    let name = r.read_utf8(name_len)?;
    let type_byte = r.read_u8()?;
    let tag = TypeTag::try_from(type_byte).map_err(|_| ProtocolError::UnknownTypeCode(type_byte))?;
    let value = decode_value(r, tag, depth)?;
    Ok((name, value))
}

/// Reads an untagged value of kind `tag` found inside a container at `depth`.
fn decode_value(r: &mut Reader<'_>, tag: TypeTag, depth: usize) -> Result<Value, ProtocolError> {
    match tag {
        TypeTag::Int => decode_int(r).map(Value::Int),
        TypeTag::Str => decode_string(r).map(Value::Str),
        TypeTag::List => decode_list(r, enter(depth)?).map(Value::List),
        TypeTag::Object => decode_object(r, enter(depth)?).map(Value::Object),
    }
}

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
