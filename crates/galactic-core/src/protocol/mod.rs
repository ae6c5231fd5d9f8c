//! Protocol module containing wire types, the value classifier, and the
//! binary encoder/decoder.

pub mod classify;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod types;

pub use classify::{classify, classify_json};
pub use codec::{decode_message, encode_message, peek_header, ProtocolError};
pub use types::*;
