//! Error types for tzkit encoding/decoding and typed-layer conversion.

use thiserror::Error;

/// Error during binary or textual decoding.
///
/// Every variant is a hard stop: malformed input is never partially
/// recovered, the caller decides whether to retry at a higher level.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("unknown expression tag: 0x{tag:02x}")]
    InvalidTag { tag: u8 },

    #[error("unknown primitive code: 0x{code:02x}")]
    InvalidPrimCode { code: u8 },

    #[error("unknown {kind} tag: 0x{tag:02x}")]
    InvalidValueTag { kind: &'static str, tag: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("zarith integer exceeds maximum length ({max} bytes)")]
    ZarithTooLong { max: usize },

    #[error("expression nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("{context} has {len} trailing bytes")]
    TrailingBytes { context: &'static str, len: usize },

    #[error("invalid base58check string for {kind}: {reason}")]
    InvalidBase58 {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("invalid hex string: {reason}")]
    InvalidHex { reason: &'static str },

    #[error("invalid primitive name: {name:?}")]
    InvalidPrimName { name: String },

    #[error("invalid annotation: {annot:?}")]
    InvalidAnnotation { annot: String },

    #[error("originated address padding byte is 0x{found:02x}, expected 0x00")]
    InvalidPadding { found: u8 },

    #[error("malformed encoding: {context}")]
    MalformedEncoding { context: &'static str },
}

/// Error during binary encoding.
///
/// Encoding is infallible for well-formed values; these arise only from
/// values that violate wire-format bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("expression nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("negative value for unsigned field {field}")]
    NegativeNat { field: &'static str },

    #[error("primitive {name:?} is not in the protocol table")]
    UnknownPrimitive { name: String },

    #[error("entrypoint name length {len} exceeds maximum 255")]
    EntrypointTooLong { len: usize },
}

/// Error during Micheline <-> typed-layer conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The primitive name is not in the closed grammar table.
    #[error("unrecognized primitive: {name:?}")]
    UnknownPrimitive { name: String },

    /// Candidates existed for the name, but none accepted the children.
    #[error("no candidate for {name:?} accepts {args} argument(s)")]
    NoMatchingCandidate { name: String, args: usize },

    /// A sequence matched none of the recognized shapes.
    #[error("sequence is neither a map, an instruction block, nor data")]
    UnclassifiableSequence,

    /// A cast to a specific typed sub-family failed.
    #[error("expected {expected} expression, found {found}")]
    UnexpectedVariant {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
