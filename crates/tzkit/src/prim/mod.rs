//! The closed-world Michelson primitive registry.
//!
//! One static ordered table drives everything that touches primitives:
//! binary prim codes, typed-layer candidate resolution, and arity
//! validation. Tag values are chain protocol constants, not an
//! implementation choice.

mod table;

pub use table::{candidates, name_for_tag, tag_for_name, Arity, Family, PrimDef, REGISTRY};
