//! # galactic-core
//!
//! The GalacticBuf value model and the binary codec that turns value trees
//! into compact, self-describing messages and back.
//!
//! This crate is shared by the HTTP server and the demo client.  It does no
//! I/O, holds no global state, and every entry point is a pure function of
//! its input, so it can be called from any number of threads at once.
//!
//! # Architecture overview
//!
//! - **`value`** – The in-memory data model: [`Value`] is a closed enum of
//!   `Int`, `Str`, `List` and `Object`; [`Object`] is an insertion-ordered map
//!   from field name to value.
//!
//! - **`protocol`** – How values travel as bytes.  A message is a 4-byte
//!   header (version, field count, total length) followed by named, tagged
//!   fields:
//!
//! ```text
//! Message  := version:u8 field_count:u8 total_len:u16 Field*
//! Field    := name_len:u8 name type:u8 Value
//! ```
//!
//! # Example
//!
//! ```rust
//! use galactic_core::{decode_message, encode_message, Object, Value};
//!
//! let mut msg = Object::new();
//! msg.insert("user_id".to_string(), Value::Int(1001));
//! msg.insert("name".to_string(), Value::from("Alice"));
//!
//! let bytes = encode_message(&msg).unwrap();
//! assert_eq!(decode_message(&bytes).unwrap(), msg);
//! ```

pub mod protocol;
pub mod value;

// Re-export the codec entry points and the value model at the crate root so
// callers can write `galactic_core::encode_message`.
pub use protocol::codec::{decode_message, encode_message, peek_header, ProtocolError};
pub use protocol::types::{MessageHeader, TypeTag};
pub use value::{Object, Value};
