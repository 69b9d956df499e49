//! Address types: implicit accounts and originated contracts.
//!
//! Binary layout is part of the chain protocol: an address is 22 bytes,
//! tag 0x00 + curve sub-tag + 20-byte key hash for implicit accounts, or
//! tag 0x01 + 20-byte contract hash + one zero padding byte for
//! originated contracts.

use std::fmt;

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::tagged::{base58, Curve};

/// base58check version prefixes (protocol constants).
const PREFIX_TZ1: &[u8] = &[6, 161, 159];
const PREFIX_TZ2: &[u8] = &[6, 161, 161];
const PREFIX_TZ3: &[u8] = &[6, 161, 164];
const PREFIX_KT1: &[u8] = &[2, 90, 121];

const HASH_LEN: usize = 20;

const TAG_IMPLICIT: u8 = 0x00;
const TAG_ORIGINATED: u8 = 0x01;

/// A 20-byte public key hash with its curve (tz1/tz2/tz3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyHash {
    pub curve: Curve,
    pub hash: [u8; HASH_LEN],
}

impl PublicKeyHash {
    /// Creates a key hash from raw bytes.
    pub fn new(curve: Curve, hash: [u8; HASH_LEN]) -> PublicKeyHash {
        PublicKeyHash { curve, hash }
    }

    fn prefix(curve: Curve) -> &'static [u8] {
        match curve {
            Curve::Ed25519 => PREFIX_TZ1,
            Curve::Secp256k1 => PREFIX_TZ2,
            Curve::P256 => PREFIX_TZ3,
        }
    }

    /// Returns the base58check form (tz1/tz2/tz3...).
    pub fn to_base58(&self) -> String {
        base58::encode(Self::prefix(self.curve), &self.hash)
    }

    /// Parses a base58check key hash, inferring the curve from the
    /// prefix.
    pub fn from_base58(text: &str) -> Result<PublicKeyHash, DecodeError> {
        for curve in [Curve::Ed25519, Curve::Secp256k1, Curve::P256] {
            if let Ok(payload) = base58::decode(Self::prefix(curve), HASH_LEN, text, "key hash") {
                // decode guarantees exactly HASH_LEN payload bytes
                let hash = payload.try_into().unwrap();
                return Ok(PublicKeyHash { curve, hash });
            }
        }
        Err(DecodeError::InvalidBase58 {
            kind: "key hash",
            reason: "no matching prefix",
        })
    }

    /// Writes the 21-byte wire form (curve sub-tag + hash).
    pub fn write(&self, writer: &mut Writer) {
        writer.write_byte(self.curve.tag());
        writer.write_bytes(&self.hash);
    }

    /// Reads the 21-byte wire form.
    pub fn read(reader: &mut Reader<'_>) -> Result<PublicKeyHash, DecodeError> {
        let tag = reader.read_byte("key hash curve tag")?;
        let curve = Curve::from_tag(tag).ok_or(DecodeError::InvalidValueTag {
            kind: "key hash curve",
            tag,
        })?;
        let hash = reader.read_array::<HASH_LEN>("key hash")?;
        Ok(PublicKeyHash { curve, hash })
    }
}

impl fmt::Display for PublicKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A 20-byte originated contract hash (KT1...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractHash(pub [u8; HASH_LEN]);

impl ContractHash {
    /// Returns the base58check form (KT1...).
    pub fn to_base58(&self) -> String {
        base58::encode(PREFIX_KT1, &self.0)
    }

    /// Parses a base58check contract hash.
    pub fn from_base58(text: &str) -> Result<ContractHash, DecodeError> {
        let payload = base58::decode(PREFIX_KT1, HASH_LEN, text, "contract hash")?;
        // decode guarantees exactly HASH_LEN payload bytes
        Ok(ContractHash(payload.try_into().unwrap()))
    }
}

impl fmt::Display for ContractHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// An address: implicit account or originated contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Implicit(PublicKeyHash),
    Originated(ContractHash),
}

impl Address {
    /// Returns the base58check form.
    pub fn to_base58(&self) -> String {
        match self {
            Address::Implicit(pkh) => pkh.to_base58(),
            Address::Originated(hash) => hash.to_base58(),
        }
    }

    /// Parses any address form (tz1/tz2/tz3/KT1...).
    pub fn from_base58(text: &str) -> Result<Address, DecodeError> {
        if let Ok(pkh) = PublicKeyHash::from_base58(text) {
            return Ok(Address::Implicit(pkh));
        }
        if let Ok(hash) = ContractHash::from_base58(text) {
            return Ok(Address::Originated(hash));
        }
        Err(DecodeError::InvalidBase58 {
            kind: "address",
            reason: "no matching prefix",
        })
    }

    /// Writes the 22-byte wire form.
    pub fn write(&self, writer: &mut Writer) {
        match self {
            Address::Implicit(pkh) => {
                writer.write_byte(TAG_IMPLICIT);
                pkh.write(writer);
            }
            Address::Originated(hash) => {
                writer.write_byte(TAG_ORIGINATED);
                writer.write_bytes(&hash.0);
                // Originated addresses are padded to the implicit width.
                writer.write_byte(0x00);
            }
        }
    }

    /// Reads the 22-byte wire form, validating originated padding.
    pub fn read(reader: &mut Reader<'_>) -> Result<Address, DecodeError> {
        let tag = reader.read_byte("address tag")?;
        match tag {
            TAG_IMPLICIT => Ok(Address::Implicit(PublicKeyHash::read(reader)?)),
            TAG_ORIGINATED => {
                let hash = reader.read_array::<HASH_LEN>("contract hash")?;
                let padding = reader.read_byte("contract padding")?;
                if padding != 0x00 {
                    return Err(DecodeError::InvalidPadding { found: padding });
                }
                Ok(Address::Originated(ContractHash(hash)))
            }
            _ => Err(DecodeError::InvalidValueTag {
                kind: "address",
                tag,
            }),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
