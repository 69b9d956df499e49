//! Watermarked operation signing and verification.
//!
//! All curve math lives behind [`CryptoProvider`]; this module only
//! assembles the watermarked message, dispatches on the key's curve,
//! and packages the result. Signing hashes `watermark byte ++ forged
//! unsigned bytes` down to 32 bytes and signs that digest.

use crate::error::EncodeError;
use crate::operation::{forge, Operation};
use crate::tagged::{PublicKey, SecretKey, Signature};

/// Injected cryptographic capability.
///
/// Implementations are expected to be stateless and thread-safe; the
/// signing protocol holds key material only for the duration of a call.
pub trait CryptoProvider {
    /// Domain hash of `data` to `size` bytes (blake2b on chain).
    fn hash(&self, data: &[u8], size: usize) -> Vec<u8>;

    fn sign_ed25519(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64];
    fn sign_secp256k1(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64];
    fn sign_p256(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64];

    fn verify_ed25519(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool;
    fn verify_secp256k1(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool;
    fn verify_p256(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool;
}

/// Signature-purpose prefix byte mixed into the hash input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watermark {
    Block,
    Consensus,
    GenericOperation,
}

impl Watermark {
    pub fn byte(self) -> u8 {
        match self {
            Watermark::Block => 0x01,
            Watermark::Consensus => 0x02,
            Watermark::GenericOperation => 0x03,
        }
    }
}

/// Digest length signed by every curve scheme.
const DIGEST_LEN: usize = 32;

fn operation_digest(
    provider: &dyn CryptoProvider,
    operation: &Operation,
    watermark: Watermark,
) -> Result<Vec<u8>, EncodeError> {
    let forged = forge::forge_unsigned(operation)?;
    let mut message = Vec::with_capacity(1 + forged.len());
    message.push(watermark.byte());
    message.extend_from_slice(&forged);
    Ok(provider.hash(&message, DIGEST_LEN))
}

/// Signs an operation with the generic-operation watermark, replacing
/// any existing signature.
pub fn sign_operation(
    provider: &dyn CryptoProvider,
    operation: Operation,
    secret: &SecretKey,
) -> Result<Operation, EncodeError> {
    sign_operation_with(provider, operation, secret, Watermark::GenericOperation)
}

/// Signs an operation under an explicit watermark.
pub fn sign_operation_with(
    provider: &dyn CryptoProvider,
    operation: Operation,
    secret: &SecretKey,
    watermark: Watermark,
) -> Result<Operation, EncodeError> {
    let digest = operation_digest(provider, &operation, watermark)?;
    let raw = match secret {
        SecretKey::Ed25519(seed) => provider.sign_ed25519(&digest, seed),
        SecretKey::Secp256k1(seed) => provider.sign_secp256k1(&digest, seed),
        SecretKey::P256(seed) => provider.sign_p256(&digest, seed),
    };
    Ok(operation.with_signature(Signature::from_raw(secret.curve(), raw)))
}

/// Verifies a signed operation against a public key.
///
/// Returns `Ok(false)` for a missing signature or a curve family
/// mismatch between the signature and the key; errors are reserved for
/// operations that cannot be forged at all.
pub fn verify_operation(
    provider: &dyn CryptoProvider,
    operation: &Operation,
    public: &PublicKey,
) -> Result<bool, EncodeError> {
    let Some(signature) = operation.signature else {
        return Ok(false);
    };

    // Generic signatures take the key's curve; an already-specific
    // signature on a different curve can never verify.
    let signature = signature.specialize(public.curve());
    if signature.curve() != Some(public.curve()) {
        return Ok(false);
    }

    let digest = operation_digest(provider, operation, Watermark::GenericOperation)?;
    let verified = match public {
        PublicKey::Ed25519(pk) => provider.verify_ed25519(&digest, signature.raw(), pk),
        PublicKey::Secp256k1(pk) => provider.verify_secp256k1(&digest, signature.raw(), pk),
        PublicKey::P256(pk) => provider.verify_p256(&digest, signature.raw(), pk),
    };
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Content, ManagerFields};
    use crate::tagged::{BlockHash, Curve, PublicKeyHash};
    use sha2::{Digest, Sha256};

    /// Deterministic stand-in backend: "signing" is a keyed hash over
    /// the message, and a public key matches when it equals
    /// SHA-256(seed). Good enough to exercise the dispatch and
    /// mismatch paths without real curve math.
    struct MockProvider;

    impl MockProvider {
        fn keyed(&self, message: &[u8], secret: &[u8]) -> [u8; 64] {
            let mut hasher = Sha256::new();
            hasher.update(secret);
            hasher.update(message);
            let first: [u8; 32] = hasher.finalize().into();
            let second: [u8; 32] = Sha256::digest(first).into();
            let mut out = [0u8; 64];
            out[..32].copy_from_slice(&first);
            out[32..].copy_from_slice(&second);
            out
        }

        fn check(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool {
            // The mock public key starts with the seed bytes (compressed
            // point keys are one byte longer than the seed).
            &self.keyed(message, &public[..32]) == signature
        }
    }

    impl CryptoProvider for MockProvider {
        fn hash(&self, data: &[u8], size: usize) -> Vec<u8> {
            Sha256::digest(data)[..size].to_vec()
        }

        fn sign_ed25519(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64] {
            self.keyed(message, secret)
        }
        fn sign_secp256k1(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64] {
            self.keyed(message, secret)
        }
        fn sign_p256(&self, message: &[u8], secret: &[u8; 32]) -> [u8; 64] {
            self.keyed(message, secret)
        }

        fn verify_ed25519(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool {
            self.check(message, signature, public)
        }
        fn verify_secp256k1(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool {
            self.check(message, signature, public)
        }
        fn verify_p256(&self, message: &[u8], signature: &[u8; 64], public: &[u8]) -> bool {
            self.check(message, signature, public)
        }
    }

    fn sample_operation() -> Operation {
        Operation::unsigned(
            BlockHash([3u8; 32]),
            vec![Content::Delegation {
                manager: ManagerFields {
                    source: PublicKeyHash::new(Curve::Ed25519, [1u8; 20]),
                    fee: 1_000,
                    counter: 7,
                    gas_limit: 1_000,
                    storage_limit: 0,
                },
                delegate: None,
            }],
        )
    }

    // Mock key pair: public key bytes equal the seed.
    const SEED: [u8; 32] = [0x11; 32];

    #[test]
    fn test_sign_then_verify_all_curves() {
        let provider = MockProvider;
        let pairs = [
            (
                SecretKey::Ed25519([0x11; 32]),
                PublicKey::Ed25519([0x11; 32]),
            ),
            (
                SecretKey::Secp256k1([0x22; 32]),
                PublicKey::Secp256k1([0x22; 33]),
            ),
            (SecretKey::P256([0x33; 32]), PublicKey::P256([0x33; 33])),
        ];
        for (secret, public) in pairs {
            let signed = sign_operation(&provider, sample_operation(), &secret).unwrap();
            assert!(signed.is_signed());
            assert_eq!(
                signed.signature.unwrap().curve(),
                Some(secret.curve()),
                "{:?}",
                secret.curve()
            );
            assert_eq!(
                verify_operation(&provider, &signed, &public),
                Ok(true),
                "{:?}",
                secret.curve()
            );
        }
    }

    #[test]
    fn test_generic_signature_specialized_on_verify() {
        let provider = MockProvider;
        let signed = sign_operation(&provider, sample_operation(), &SecretKey::Ed25519(SEED))
            .unwrap();
        let raw = *signed.signature.unwrap().raw();
        let generic = Operation {
            signature: Some(Signature::Generic(raw)),
            ..signed
        };
        assert!(verify_operation(&provider, &generic, &PublicKey::Ed25519(SEED)).unwrap());
    }

    #[test]
    fn test_tampered_content_fails() {
        let provider = MockProvider;
        let signed = sign_operation(&provider, sample_operation(), &SecretKey::Ed25519(SEED))
            .unwrap();
        let mut tampered = signed;
        tampered.branch = BlockHash([4u8; 32]);
        assert!(!verify_operation(&provider, &tampered, &PublicKey::Ed25519(SEED)).unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let provider = MockProvider;
        let signed = sign_operation(&provider, sample_operation(), &SecretKey::Ed25519(SEED))
            .unwrap();
        assert!(!verify_operation(&provider, &signed, &PublicKey::Ed25519([0x22; 32])).unwrap());
    }

    #[test]
    fn test_curve_mismatch_is_false_not_error() {
        let provider = MockProvider;
        let signed = sign_operation(&provider, sample_operation(), &SecretKey::Ed25519(SEED))
            .unwrap();
        // An ed25519 signature checked against a p256 key.
        let result = verify_operation(&provider, &signed, &PublicKey::P256([0x11; 33])).unwrap();
        assert!(!result);
    }

    #[test]
    fn test_unsigned_never_verifies() {
        let provider = MockProvider;
        assert!(!verify_operation(&provider, &sample_operation(), &PublicKey::Ed25519(SEED))
            .unwrap());
    }

    #[test]
    fn test_resigning_replaces_signature() {
        let provider = MockProvider;
        let once = sign_operation(&provider, sample_operation(), &SecretKey::Ed25519(SEED))
            .unwrap();
        let twice =
            sign_operation(&provider, once.clone(), &SecretKey::Secp256k1([0x33; 32])).unwrap();
        assert_ne!(once.signature, twice.signature);
        assert_eq!(twice.signature.unwrap().curve(), Some(Curve::Secp256k1));
        // The signed-over bytes are unchanged by the first signature.
        assert_eq!(
            forge::forge_unsigned(&once).unwrap(),
            forge::forge_unsigned(&twice).unwrap()
        );
    }

    #[test]
    fn test_watermark_bytes() {
        assert_eq!(Watermark::Block.byte(), 0x01);
        assert_eq!(Watermark::Consensus.byte(), 0x02);
        assert_eq!(Watermark::GenericOperation.byte(), 0x03);
    }

    #[test]
    fn test_watermark_separates_domains() {
        let provider = MockProvider;
        let op = sample_operation();
        let block = sign_operation_with(
            &provider,
            op.clone(),
            &SecretKey::Ed25519(SEED),
            Watermark::Block,
        )
        .unwrap();
        let generic = sign_operation(&provider, op, &SecretKey::Ed25519(SEED)).unwrap();
        assert_ne!(block.signature, generic.signature);
    }
}
