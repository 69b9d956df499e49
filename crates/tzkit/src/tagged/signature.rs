//! Signature type, generic and curve-specific.
//!
//! All supported curves produce 64-byte signatures, so the generic
//! `sig` form and the curve-specific forms carry the same raw bytes and
//! differ only in the base58check prefix. The wire form is always the
//! raw 64 bytes with no tag.

use std::fmt;

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::tagged::{base58, Curve};

const PREFIX_EDSIG: &[u8] = &[9, 245, 205, 134, 18];
const PREFIX_SPSIG: &[u8] = &[13, 115, 101, 19, 63];
const PREFIX_P2SIG: &[u8] = &[54, 240, 44, 52];
const PREFIX_SIG: &[u8] = &[4, 130, 43];

const SIG_LEN: usize = 64;

/// A 64-byte signature, optionally tagged with its curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    Ed25519([u8; SIG_LEN]),
    Secp256k1([u8; SIG_LEN]),
    P256([u8; SIG_LEN]),
    /// Curve-agnostic form (the `sig` prefix).
    Generic([u8; SIG_LEN]),
}

impl Signature {
    /// Returns the curve, or `None` for the generic form.
    pub fn curve(&self) -> Option<Curve> {
        match self {
            Signature::Ed25519(_) => Some(Curve::Ed25519),
            Signature::Secp256k1(_) => Some(Curve::Secp256k1),
            Signature::P256(_) => Some(Curve::P256),
            Signature::Generic(_) => None,
        }
    }

    /// Returns the raw 64 signature bytes.
    pub fn raw(&self) -> &[u8; SIG_LEN] {
        match self {
            Signature::Ed25519(bytes)
            | Signature::Secp256k1(bytes)
            | Signature::P256(bytes)
            | Signature::Generic(bytes) => bytes,
        }
    }

    /// Builds a curve-specific signature from raw bytes.
    pub fn from_raw(curve: Curve, bytes: [u8; SIG_LEN]) -> Signature {
        match curve {
            Curve::Ed25519 => Signature::Ed25519(bytes),
            Curve::Secp256k1 => Signature::Secp256k1(bytes),
            Curve::P256 => Signature::P256(bytes),
        }
    }

    /// Re-tags a generic signature with a concrete curve.
    ///
    /// Already-specific signatures are returned unchanged, even when
    /// their curve differs from `curve`; callers detect that mismatch
    /// separately.
    pub fn specialize(self, curve: Curve) -> Signature {
        match self {
            Signature::Generic(bytes) => Signature::from_raw(curve, bytes),
            other => other,
        }
    }

    /// Returns the base58check form matching the tag (edsig/spsig/p2sig
    /// for specific curves, sig for generic).
    pub fn to_base58(&self) -> String {
        let prefix = match self.curve() {
            Some(Curve::Ed25519) => PREFIX_EDSIG,
            Some(Curve::Secp256k1) => PREFIX_SPSIG,
            Some(Curve::P256) => PREFIX_P2SIG,
            None => PREFIX_SIG,
        };
        base58::encode(prefix, self.raw())
    }

    /// Parses any base58check signature form.
    pub fn from_base58(text: &str) -> Result<Signature, DecodeError> {
        let forms: [(&[u8], fn([u8; SIG_LEN]) -> Signature); 4] = [
            (PREFIX_EDSIG, Signature::Ed25519),
            (PREFIX_SPSIG, Signature::Secp256k1),
            (PREFIX_P2SIG, Signature::P256),
            (PREFIX_SIG, Signature::Generic),
        ];
        for (prefix, make) in forms {
            if let Ok(payload) = base58::decode(prefix, SIG_LEN, text, "signature") {
                // decode guarantees a 64-byte payload
                return Ok(make(payload.try_into().unwrap()));
            }
        }
        Err(DecodeError::InvalidBase58 {
            kind: "signature",
            reason: "no matching prefix",
        })
    }

    /// Writes the untagged 64-byte wire form.
    pub fn write(&self, writer: &mut Writer) {
        writer.write_bytes(self.raw());
    }

    /// Reads 64 bytes as a generic signature.
    pub fn read(reader: &mut Reader<'_>) -> Result<Signature, DecodeError> {
        Ok(Signature::Generic(
            reader.read_array::<SIG_LEN>("signature")?,
        ))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_base58())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
