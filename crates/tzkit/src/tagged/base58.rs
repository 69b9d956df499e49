//! base58check encoding with chain version prefixes.
//!
//! Every tagged value type has a fixed version prefix and payload length;
//! the textual form is `base58(prefix ++ payload ++ checksum)` where the
//! checksum is the first four bytes of a double SHA-256.

use sha2::{Digest, Sha256};

use crate::error::DecodeError;

/// Computes the 4-byte double-SHA-256 checksum.
fn checksum(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

/// Encodes `payload` under the given version prefix.
pub fn encode(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len() + 4);
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    bs58::encode(&data).into_string()
}

/// Decodes a base58check string, validating prefix, length, and checksum.
///
/// Returns the raw payload without the version prefix.
pub fn decode(
    prefix: &[u8],
    payload_len: usize,
    text: &str,
    kind: &'static str,
) -> Result<Vec<u8>, DecodeError> {
    let data = bs58::decode(text)
        .into_vec()
        .map_err(|_| DecodeError::InvalidBase58 {
            kind,
            reason: "not valid base58",
        })?;

    let expected_len = prefix.len() + payload_len + 4;
    if data.len() != expected_len {
        return Err(DecodeError::InvalidBase58 {
            kind,
            reason: "wrong length",
        });
    }
    if &data[..prefix.len()] != prefix {
        return Err(DecodeError::InvalidBase58 {
            kind,
            reason: "wrong version prefix",
        });
    }

    let (body, check) = data.split_at(data.len() - 4);
    if checksum(body) != check {
        return Err(DecodeError::InvalidBase58 {
            kind,
            reason: "checksum mismatch",
        });
    }

    Ok(body[prefix.len()..].to_vec())
}
