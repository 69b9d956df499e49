//! Tagged chain value types: addresses, keys, signatures, hashes.
//!
//! Each type wraps fixed-length bytes, owns a closed binary tag table
//! (protocol constants), and has a base58check textual form. Equality is
//! over the canonical byte representation.

pub mod address;
pub mod base58;
pub mod hashes;
pub mod hex;
pub mod key;
pub mod signature;

pub use address::{Address, ContractHash, PublicKeyHash};
pub use hashes::{BlockHash, ChainId, OperationHash};
pub use hex::{parse_hex, to_hex, to_hex_prefixed};
pub use key::{PublicKey, SecretKey};
pub use signature::Signature;

/// Elliptic-curve family of a key or signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    Ed25519,
    Secp256k1,
    P256,
}

impl Curve {
    /// Binary sub-tag (protocol constant, shared by implicit addresses
    /// and public keys).
    pub fn tag(self) -> u8 {
        match self {
            Curve::Ed25519 => 0x00,
            Curve::Secp256k1 => 0x01,
            Curve::P256 => 0x02,
        }
    }

    /// Decodes a curve sub-tag.
    pub fn from_tag(tag: u8) -> Option<Curve> {
        match tag {
            0x00 => Some(Curve::Ed25519),
            0x01 => Some(Curve::Secp256k1),
            0x02 => Some(Curve::P256),
            _ => None,
        }
    }
}
