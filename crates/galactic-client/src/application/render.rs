//! Human-readable views of encoded messages.
//!
//! [`render`] turns raw message bytes into a header summary, a hex dump and
//! a pretty-printed JSON rendering of the decoded value tree.  [`parse_hex`]
//! reads the hex text accepted by `galactic-client inspect`.

use std::fmt;

use galactic_core::{decode_message, peek_header, MessageHeader, ProtocolError};
use thiserror::Error;

/// Error type for rendering and hex parsing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input text is not valid hex.
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The bytes are not a valid GalacticBuf message.
    #[error("not a valid GalacticBuf message: {0}")]
    Protocol(#[from] ProtocolError),

    /// The decoded tree could not be written as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One message, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: MessageHeader,
    pub hex: String,
    pub json: String,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "version={} fields={} length={}",
            self.header.version, self.header.field_count, self.header.total_length
        )?;
        writeln!(f, "hex:  {}", self.hex)?;
        write!(f, "json: {}", self.json)
    }
}

/// Decodes `bytes` and builds its printable views.
pub fn render(bytes: &[u8]) -> Result<Rendered, RenderError> {
    let header = peek_header(bytes)?;
    let message = decode_message(bytes)?;
    Ok(Rendered {
        header,
        hex: hex::encode(bytes),
        json: serde_json::to_string_pretty(&message)?,
    })
}

/// Parses hex text, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, RenderError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(hex::decode(compact)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::samples::user_message;
    use galactic_core::encode_message;

    const USER_MESSAGE_HEX: &str = "0103004507757365725f69640100000000000003e9046e616d65020005416c6963650673636f72657303010003000000000000006400000000000000c8000000000000012c";

    #[test]
    fn test_render_user_message() {
        // Arrange
        let bytes = encode_message(&user_message()).unwrap();

        // Act
        let rendered = render(&bytes).unwrap();

        // Assert
        assert_eq!(rendered.hex, USER_MESSAGE_HEX);
        assert_eq!(rendered.header.field_count, 3);
        assert_eq!(rendered.header.total_length, 69);
        let json: serde_json::Value = serde_json::from_str(&rendered.json).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": 1001, "name": "Alice", "scores": [100, 200, 300]})
        );
    }

    #[test]
    fn test_rendered_json_keeps_field_order() {
        let bytes = encode_message(&user_message()).unwrap();

        let rendered = render(&bytes).unwrap();

        let user_id = rendered.json.find("user_id").unwrap();
        let name = rendered.json.find("name").unwrap();
        let scores = rendered.json.find("scores").unwrap();
        assert!(user_id < name && name < scores);
    }

    #[test]
    fn test_display_has_three_sections() {
        let rendered = render(&encode_message(&user_message()).unwrap()).unwrap();

        let text = rendered.to_string();

        assert!(text.starts_with("version=1 fields=3 length=69\n"));
        assert!(text.contains("hex:  0103"));
        assert!(text.contains("json: {"));
    }

    #[test]
    fn test_render_rejects_bad_version() {
        let err = render(&[0x07, 0, 0, 4]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Protocol(ProtocolError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn test_parse_hex_accepts_prefix_and_spaces() {
        let bytes = parse_hex("  0x01 00\n00 04 ").unwrap();
        assert_eq!(bytes, [0x01, 0x00, 0x00, 0x04]);
    }

    #[test]
    fn test_parse_hex_rejects_odd_length() {
        assert!(matches!(parse_hex("010"), Err(RenderError::Hex(_))));
    }

    #[test]
    fn test_parse_then_render_reference_vector() {
        let bytes = parse_hex(USER_MESSAGE_HEX).unwrap();
        let rendered = render(&bytes).unwrap();
        assert!(rendered.json.contains("\"Alice\""));
    }
}
