//! Hex text codec for payload buffers.
//!
//! Payloads are conventionally hex-encoded text at rest; this module is the
//! single entry point between that text form and raw bytes.

use crate::errors::{BudsError, Result};

/// Decodes hex text into bytes.
///
/// Strips surrounding whitespace and an optional `0x` prefix. An empty
/// string decodes to an empty buffer, not an error.
///
/// # Errors
/// - [`BudsError::InvalidHexLength`] if the digit count is odd.
/// - [`BudsError::InvalidHexDigit`] if a non-hex character remains.
///
/// # Example
/// ```
/// use segop_buds::hex::decode_hex;
///
/// assert_eq!(decode_hex("0xF006").unwrap(), vec![0xf0, 0x06]);
/// assert!(decode_hex("  ").unwrap().is_empty());
/// ```
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let clean = text.trim();
    let clean = clean
        .strip_prefix("0x")
        .or_else(|| clean.strip_prefix("0X"))
        .unwrap_or(clean);
    if clean.is_empty() {
        return Ok(Vec::new());
    }
    ::hex::decode(clean).map_err(|e| match e {
        ::hex::FromHexError::InvalidHexCharacter { c, .. } => BudsError::InvalidHexDigit(c),
        ::hex::FromHexError::OddLength | ::hex::FromHexError::InvalidStringLength => {
            BudsError::InvalidHexLength
        }
    })
}

/// Encodes bytes as lower-case hex: two digits per byte, no separators,
/// no prefix. `decode_hex(encode_hex(b)) == b` for all `b`.
pub fn encode_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_prefix_and_whitespace() {
        assert_eq!(decode_hex(" 0xf006 ").unwrap(), vec![0xf0, 0x06]);
        assert_eq!(decode_hex("F006").unwrap(), vec![0xf0, 0x06]);
    }

    #[test]
    fn test_decode_empty_is_empty_buffer() {
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_odd_length() {
        assert!(matches!(decode_hex("f06"), Err(BudsError::InvalidHexLength)));
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert!(matches!(
            decode_hex("f0zz"),
            Err(BudsError::InvalidHexDigit('z'))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let bytes = vec![0x00, 0x6a, 0xff, 0x10];
        assert_eq!(decode_hex(&encode_hex(&bytes)).unwrap(), bytes);
        assert_eq!(encode_hex(&bytes), "006aff10");
    }
}
