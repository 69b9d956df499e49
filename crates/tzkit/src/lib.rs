//! tzkit: Micheline codec, typed Michelson grammar, and operation
//! forging/signing for Tezos.
//!
//! This crate covers the client-side protocol surface: the Micheline
//! wire AST and its binary codec, the zarith variable-length integer
//! codec, a typed view of the full Michelson grammar with bidirectional
//! conversion, pair/or normalization, base58check tagged values
//! (addresses, keys, signatures, hashes), and operation forging plus
//! watermarked sign/verify over an injected crypto backend.
//!
//! # Quick Start
//!
//! ```rust
//! use tzkit::micheline::Micheline;
//! use tzkit::codec::{decode_expr, encode_expr};
//!
//! // Build `Pair 1 "ok"` and round-trip it through the binary codec.
//! let expr = Micheline::prim(
//!     "Pair",
//!     vec![Micheline::int(1), Micheline::string("ok").unwrap()],
//! )
//! .unwrap();
//!
//! let bytes = encode_expr(&expr).unwrap();
//! let decoded = decode_expr(&bytes).unwrap();
//! assert_eq!(expr, decoded);
//! ```
//!
//! # Modules
//!
//! - [`micheline`]: Wire AST and normalization
//! - [`codec`]: Binary encoding/decoding (expressions, zarith, primitives)
//! - [`prim`]: The closed primitive table (names, tags, families, arities)
//! - [`typed`]: Typed grammar layer and Micheline conversion
//! - [`tagged`]: Addresses, keys, signatures, hashes, base58check
//! - [`operation`]: Operation model and forging
//! - [`crypto`]: Watermarked signing protocol over an injected backend
//! - [`storage`]: Contract storage interpreted against its type
//! - [`cache`]: Scope-local compute-once memoization
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! The decoders are designed to safely handle untrusted input:
//! - All allocations are bounded by the limits in [`limits`]
//! - Zarith integers are length-capped to prevent unbounded allocation
//! - Expression nesting depth is capped on both encode and decode
//! - Invalid data is rejected with descriptive errors

pub mod cache;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod limits;
pub mod micheline;
pub mod operation;
pub mod prim;
pub mod storage;
pub mod tagged;
pub mod typed;

// Re-export commonly used types at crate root
pub use codec::{decode_expr, encode_expr};
pub use crypto::{sign_operation, verify_operation, CryptoProvider, Watermark};
pub use error::{ConvertError, DecodeError, EncodeError};
pub use micheline::{normalize, Micheline};
pub use operation::{forge, Content, Entrypoint, ManagerFields, Operation};
pub use storage::StorageEntry;
pub use tagged::{
    Address, BlockHash, ChainId, ContractHash, Curve, OperationHash, PublicKey, PublicKeyHash,
    SecretKey, Signature,
};
pub use typed::{from_micheline, to_micheline, TypedExpr};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
