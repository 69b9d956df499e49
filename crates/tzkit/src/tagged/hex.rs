//! Hex text forms for raw byte blobs.

use crate::error::DecodeError;

/// Parses a hex string, accepting an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, DecodeError> {
    let body = text.strip_prefix("0x").unwrap_or(text);
    if body.len() % 2 != 0 {
        return Err(DecodeError::InvalidHex {
            reason: "odd number of digits",
        });
    }
    hex::decode(body).map_err(|_| DecodeError::InvalidHex {
        reason: "invalid hex digit",
    })
}

/// Formats bytes as bare lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Formats bytes as `0x`-prefixed lowercase hex.
pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_bare_and_prefixed() {
        let bytes = vec![0x0a, 0xff, 0x00];
        assert_eq!(to_hex(&bytes), "0aff00");
        assert_eq!(to_hex_prefixed(&bytes), "0x0aff00");
        assert_eq!(parse_hex("0aff00").unwrap(), bytes);
        assert_eq!(parse_hex("0x0aff00").unwrap(), bytes);
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid() {
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
        assert!(parse_hex("0xg1").is_err());
    }
}
