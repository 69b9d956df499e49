//! Security limits for decoding untrusted input.
//!
//! All decoder allocations and recursion are bounded by these constants,
//! so a hostile peer cannot force unbounded memory or stack growth.

/// Maximum byte length of a single zarith integer (unsigned or signed).
///
/// 4096 bytes covers integers far beyond anything the chain produces
/// while still bounding decoder work.
pub const MAX_ZARITH_BYTES: usize = 4096;

/// Maximum byte length of a Micheline string payload.
pub const MAX_STRING_LEN: usize = 1 << 20;

/// Maximum byte length of a Micheline bytes payload.
pub const MAX_BYTES_LEN: usize = 1 << 24;

/// Maximum byte length of a length-prefixed section (sequences, argument
/// lists, nested operation parameters).
pub const MAX_SECTION_LEN: usize = 1 << 26;

/// Maximum Micheline nesting depth for encode and decode.
///
/// Both directions recurse; the cap keeps adversarial inputs from
/// overflowing the call stack.
pub const MAX_EXPR_DEPTH: usize = 512;

/// Maximum number of annotations on a single primitive application.
pub const MAX_ANNOTS: usize = 256;

/// Maximum byte length of one annotation string.
pub const MAX_ANNOT_LEN: usize = 255;
