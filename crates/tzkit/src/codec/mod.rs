//! Binary encoding/decoding for Micheline and zarith integers.

pub mod expr;
pub mod primitives;
pub mod zarith;

pub use expr::{decode_expr, encode_expr, read_expr, write_expr};
pub use primitives::{Reader, Writer};
pub use zarith::{encode_int, encode_nat, read_int, read_nat, write_int, write_nat};
