//! Hex payload encoding.
//!
//! Every byte read from the headset travels to the ESP32 as two lowercase hex
//! digits, with single spaces between bytes: `[0x41, 0x0a]` becomes `"41 0a"`.

use crate::error::{Error, Result};
use std::fmt;

/// Text form of one Byte Buffer, ready to be attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexPayload {
    text: String,
    byte_count: usize,
}

impl HexPayload {
    /// Render `bytes` in order, two lowercase digits per byte.
    pub fn encode(bytes: &[u8]) -> Self {
        let mut text = String::with_capacity(bytes.len().saturating_mul(3));
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&hex::encode([*byte]));
        }
        Self {
            text,
            byte_count: bytes.len(),
        }
    }

    /// Parse payload text back into the bytes it was rendered from.
    ///
    /// Tokens must be exactly two hex digits separated by single spaces.
    pub fn decode(text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        text.split(' ')
            .map(|token| {
                if token.len() != 2 {
                    return Err(Error::Payload(format!(
                        "expected two hex digits, got {token:?}"
                    )));
                }
                let mut byte = [0u8; 1];
                hex::decode_to_slice(token, &mut byte)
                    .map_err(|e| Error::Payload(format!("{token:?}: {e}")))?;
                Ok(byte[0])
            })
            .collect()
    }

    /// Payload text as posted.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of raw bytes encoded, not the length of the text.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }
}

impl fmt::Display for HexPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
