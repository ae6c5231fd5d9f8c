//! Wire-level constants and types shared by the encoder and decoder.
//!
//! All multi-byte integers on the wire are big-endian.

use std::fmt;

// ── Protocol constants ────────────────────────────────────────────────────────

/// The only protocol version this codec reads or writes.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Size of the message header: version (1) + field count (1) + total length (2).
pub const HEADER_SIZE: usize = 4;

/// Largest total message size, header included.
pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize;

/// Largest string payload in bytes.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Largest number of elements in a list.
pub const MAX_LIST_LEN: usize = u16::MAX as usize;

/// Largest field name in bytes.
pub const MAX_FIELD_NAME_LEN: usize = u8::MAX as usize;

/// Largest number of fields in an object or message.
pub const MAX_FIELDS: usize = u8::MAX as usize;

/// Deepest container nesting accepted by the encoder and decoder.
///
/// The top-level message is depth 0; every `List` or `Object` entered adds
/// one.  The limit bounds recursion (and therefore stack use) on input
/// crafted to nest without end.
pub const MAX_NESTING_DEPTH: usize = 64;

// ── Type tags ─────────────────────────────────────────────────────────────────

/// The 1-byte discriminator identifying a value's kind on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Int = 0x01,
    Str = 0x02,
    List = 0x03,
    Object = 0x04,
}

impl TypeTag {
    /// Returns `true` for the kinds a list may contain (`Int`, `Str`, `Object`).
    pub fn is_list_element(self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Str | TypeTag::Object)
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x01 => Ok(TypeTag::Int),
            0x02 => Ok(TypeTag::Str),
            0x03 => Ok(TypeTag::List),
            0x04 => Ok(TypeTag::Object),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Str => "string",
            TypeTag::List => "list",
            TypeTag::Object => "object",
        };
        f.write_str(name)
    }
}

// ── Message header ────────────────────────────────────────────────────────────

/// The 4-byte header in front of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Protocol version; always [`PROTOCOL_VERSION`] for a valid message.
    pub version: u8,
    /// Number of top-level fields that follow.
    pub field_count: u8,
    /// Total message length in bytes, header included.
    pub total_length: u16,
}
