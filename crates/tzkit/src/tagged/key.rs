//! Public and secret key types.
//!
//! Public keys are curve-tagged on the wire (0x00 ed25519, 0x01
//! secp256k1, 0x02 p256). Ed25519 public keys are 32 bytes; the two
//! ECDSA curves use 33-byte compressed points. Secret keys never appear
//! on the wire, only in base58check text form.

use std::fmt;

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::tagged::{base58, Curve};

const PREFIX_EDPK: &[u8] = &[13, 15, 37, 217];
const PREFIX_SPPK: &[u8] = &[3, 254, 226, 86];
const PREFIX_P2PK: &[u8] = &[3, 178, 139, 127];

const PREFIX_EDSK: &[u8] = &[13, 15, 58, 7];
const PREFIX_SPSK: &[u8] = &[17, 162, 224, 201];
const PREFIX_P2SK: &[u8] = &[16, 81, 238, 189];

/// A curve-tagged public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519([u8; 32]),
    Secp256k1([u8; 33]),
    P256([u8; 33]),
}

impl PublicKey {
    /// Returns the curve family.
    pub fn curve(&self) -> Curve {
        match self {
            PublicKey::Ed25519(_) => Curve::Ed25519,
            PublicKey::Secp256k1(_) => Curve::Secp256k1,
            PublicKey::P256(_) => Curve::P256,
        }
    }

    /// Returns the raw key bytes (32 or 33 depending on the curve).
    pub fn raw(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
            PublicKey::Secp256k1(bytes) => bytes,
            PublicKey::P256(bytes) => bytes,
        }
    }

    fn prefix(curve: Curve) -> &'static [u8] {
        match curve {
            Curve::Ed25519 => PREFIX_EDPK,
            Curve::Secp256k1 => PREFIX_SPPK,
            Curve::P256 => PREFIX_P2PK,
        }
    }

    /// Returns the base58check form (edpk/sppk/p2pk...).
    pub fn to_base58(&self) -> String {
        base58::encode(Self::prefix(self.curve()), self.raw())
    }

    /// Parses a base58check public key, inferring the curve from the
    /// prefix.
    pub fn from_base58(text: &str) -> Result<PublicKey, DecodeError> {
        if let Ok(payload) = base58::decode(PREFIX_EDPK, 32, text, "public key") {
            // decode guarantees the payload length
            return Ok(PublicKey::Ed25519(payload.try_into().unwrap()));
        }
        if let Ok(payload) = base58::decode(PREFIX_SPPK, 33, text, "public key") {
            return Ok(PublicKey::Secp256k1(payload.try_into().unwrap()));
        }
        if let Ok(payload) = base58::decode(PREFIX_P2PK, 33, text, "public key") {
            return Ok(PublicKey::P256(payload.try_into().unwrap()));
        }
        Err(DecodeError::InvalidBase58 {
            kind: "public key",
            reason: "no matching prefix",
        })
    }

    /// Writes the curve-tagged wire form (33 or 34 bytes).
    pub fn write(&self, writer: &mut Writer) {
        writer.write_byte(self.curve().tag());
        writer.write_bytes(self.raw());
    }

    /// Reads the curve-tagged wire form.
    pub fn read(reader: &mut Reader<'_>) -> Result<PublicKey, DecodeError> {
        let tag = reader.read_byte("public key curve tag")?;
        match Curve::from_tag(tag) {
            Some(Curve::Ed25519) => Ok(PublicKey::Ed25519(
                reader.read_array::<32>("ed25519 public key")?,
            )),
            Some(Curve::Secp256k1) => Ok(PublicKey::Secp256k1(
                reader.read_array::<33>("secp256k1 public key")?,
            )),
            Some(Curve::P256) => Ok(PublicKey::P256(reader.read_array::<33>("p256 public key")?)),
            None => Err(DecodeError::InvalidValueTag {
                kind: "public key curve",
                tag,
            }),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A 32-byte secret key seed, tagged with its curve.
///
/// Deliberately has no wire codec: secret keys exist only to be handed
/// to a signing backend.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    Ed25519([u8; 32]),
    Secp256k1([u8; 32]),
    P256([u8; 32]),
}

impl SecretKey {
    /// Returns the curve family.
    pub fn curve(&self) -> Curve {
        match self {
            SecretKey::Ed25519(_) => Curve::Ed25519,
            SecretKey::Secp256k1(_) => Curve::Secp256k1,
            SecretKey::P256(_) => Curve::P256,
        }
    }

    /// Returns the raw 32-byte seed.
    pub fn raw(&self) -> &[u8; 32] {
        match self {
            SecretKey::Ed25519(bytes) => bytes,
            SecretKey::Secp256k1(bytes) => bytes,
            SecretKey::P256(bytes) => bytes,
        }
    }

    fn prefix(curve: Curve) -> &'static [u8] {
        match curve {
            Curve::Ed25519 => PREFIX_EDSK,
            Curve::Secp256k1 => PREFIX_SPSK,
            Curve::P256 => PREFIX_P2SK,
        }
    }

    /// Returns the base58check form (edsk/spsk/p2sk...).
    pub fn to_base58(&self) -> String {
        base58::encode(Self::prefix(self.curve()), self.raw())
    }

    /// Parses a base58check secret key, inferring the curve from the
    /// prefix.
    pub fn from_base58(text: &str) -> Result<SecretKey, DecodeError> {
        for (curve, make) in [
            (Curve::Ed25519, SecretKey::Ed25519 as fn([u8; 32]) -> SecretKey),
            (Curve::Secp256k1, SecretKey::Secp256k1),
            (Curve::P256, SecretKey::P256),
        ] {
            if let Ok(payload) = base58::decode(Self::prefix(curve), 32, text, "secret key") {
                // decode guarantees a 32-byte payload
                return Ok(make(payload.try_into().unwrap()));
            }
        }
        Err(DecodeError::InvalidBase58 {
            kind: "secret key",
            reason: "no matching prefix",
        })
    }
}

// Key material stays out of debug output.
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({:?}, <redacted>)", self.curve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_key_base58_roundtrip() {
        let keys = [
            PublicKey::Ed25519([0x11; 32]),
            PublicKey::Secp256k1([0x22; 33]),
            PublicKey::P256([0x33; 33]),
        ];
        let prefixes = ["edpk", "sppk", "p2pk"];
        for (key, prefix) in keys.iter().zip(prefixes) {
            let text = key.to_base58();
            assert!(text.starts_with(prefix), "{text}");
            assert_eq!(PublicKey::from_base58(&text).unwrap(), *key);
        }
    }

    #[test]
    fn test_public_key_wire_roundtrip() {
        let keys = [
            PublicKey::Ed25519([0x11; 32]),
            PublicKey::Secp256k1([0x22; 33]),
            PublicKey::P256([0x33; 33]),
        ];
        for key in keys {
            let mut writer = Writer::new();
            key.write(&mut writer);
            let expected_len = 1 + key.raw().len();
            assert_eq!(writer.len(), expected_len);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(PublicKey::read(&mut reader).unwrap(), key);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_public_key_bad_tag() {
        let mut reader = Reader::new(&[0x03; 34]);
        assert!(matches!(
            PublicKey::read(&mut reader),
            Err(DecodeError::InvalidValueTag { tag: 0x03, .. })
        ));
    }

    #[test]
    fn test_secret_key_base58_roundtrip() {
        let keys = [
            SecretKey::Ed25519([0x44; 32]),
            SecretKey::Secp256k1([0x55; 32]),
            SecretKey::P256([0x66; 32]),
        ];
        let prefixes = ["edsk", "spsk", "p2sk"];
        for (key, prefix) in keys.iter().zip(prefixes) {
            let text = key.to_base58();
            assert!(text.starts_with(prefix), "{text}");
            assert_eq!(SecretKey::from_base58(&text).unwrap(), *key);
        }
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        let key = SecretKey::Ed25519([0x44; 32]);
        let debug = format!("{key:?}");
        assert!(!debug.contains("0x44"));
        assert!(!debug.contains("68")); // 0x44 in decimal
        assert!(debug.contains("redacted"));
    }
}
