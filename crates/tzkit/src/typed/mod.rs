//! The typed Michelson layer.
//!
//! `TypedExpr` interprets a Micheline tree against the closed grammar in
//! [`crate::prim`]: every application carries a resolved registry row
//! (name, binary tag, family, arity already checked), annotations are
//! kind-split, and sequences are classified as data, instructions, or
//! maps.

pub mod annots;
pub mod convert;

use num_bigint::BigInt;

use crate::error::ConvertError;
use crate::prim::{Family, PrimDef};

pub use annots::Annotations;
pub use convert::{from_micheline, to_micheline};

/// A typed expression node.
///
/// Nodes exclusively own their children; the tree is acyclic by
/// construction, with depth bounded only by input size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedExpr {
    /// Integer data constant.
    Int(BigInt),
    /// String data constant.
    String(String),
    /// Bytes data constant.
    Bytes(Vec<u8>),
    /// Primitive application resolved against the registry.
    App(TypedApp),
    /// Sequence of data values.
    DataSeq(Vec<TypedExpr>),
    /// Sequence of instructions (a code block).
    InstrSeq(Vec<TypedExpr>),
    /// Map literal: ordered key/value pairs.
    Map(Vec<(TypedExpr, TypedExpr)>),
}

/// A resolved primitive application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedApp {
    /// The registry row this application resolved to.
    pub def: &'static PrimDef,
    pub args: Vec<TypedExpr>,
    pub annots: Annotations,
}

impl TypedApp {
    /// Primitive name.
    pub fn name(&self) -> &'static str {
        self.def.name
    }

    /// Binary prim code.
    pub fn tag(&self) -> u8 {
        self.def.tag
    }

    /// Grammar family.
    pub fn family(&self) -> Family {
        self.def.family
    }
}

impl TypedExpr {
    /// Short description of the node shape, for error reporting.
    pub fn describe(&self) -> &'static str {
        match self {
            TypedExpr::Int(_) => "int constant",
            TypedExpr::String(_) => "string constant",
            TypedExpr::Bytes(_) => "bytes constant",
            TypedExpr::App(app) => match app.family() {
                Family::Constant => "data constant",
                Family::Instruction => "instruction",
                Family::Type => "type",
                Family::ComparableType => "comparable type",
                Family::Keyword => "script keyword",
            },
            TypedExpr::DataSeq(_) => "data sequence",
            TypedExpr::InstrSeq(_) => "instruction sequence",
            TypedExpr::Map(_) => "map",
        }
    }

    /// True if this node can stand where a data value is expected.
    pub fn is_data(&self) -> bool {
        match self {
            TypedExpr::App(app) => app.family().is_data(),
            TypedExpr::Int(_)
            | TypedExpr::String(_)
            | TypedExpr::Bytes(_)
            | TypedExpr::DataSeq(_)
            | TypedExpr::InstrSeq(_)
            | TypedExpr::Map(_) => true,
        }
    }

    /// True if this node can stand where an instruction is expected.
    pub fn is_instr(&self) -> bool {
        match self {
            TypedExpr::App(app) => app.family() == Family::Instruction,
            TypedExpr::InstrSeq(_) => true,
            _ => false,
        }
    }

    /// True if this node is a type expression.
    pub fn is_type(&self) -> bool {
        matches!(self, TypedExpr::App(app) if app.family().is_type())
    }

    /// True if this node is a comparable type expression.
    pub fn is_comparable_type(&self) -> bool {
        matches!(self, TypedExpr::App(app) if app.family() == Family::ComparableType)
    }

    /// Casts to a type application.
    pub fn expect_type(&self) -> Result<&TypedApp, ConvertError> {
        match self {
            TypedExpr::App(app) if app.family().is_type() => Ok(app),
            other => Err(ConvertError::UnexpectedVariant {
                expected: "type",
                found: other.describe(),
            }),
        }
    }

    /// Casts to a comparable type application.
    pub fn expect_comparable_type(&self) -> Result<&TypedApp, ConvertError> {
        match self {
            TypedExpr::App(app) if app.family() == Family::ComparableType => Ok(app),
            other => Err(ConvertError::UnexpectedVariant {
                expected: "comparable type",
                found: other.describe(),
            }),
        }
    }

    /// Casts to a data value.
    pub fn expect_data(&self) -> Result<&TypedExpr, ConvertError> {
        if self.is_data() {
            Ok(self)
        } else {
            Err(ConvertError::UnexpectedVariant {
                expected: "data",
                found: self.describe(),
            })
        }
    }

    /// Casts to an instruction.
    pub fn expect_instr(&self) -> Result<&TypedExpr, ConvertError> {
        if self.is_instr() {
            Ok(self)
        } else {
            Err(ConvertError::UnexpectedVariant {
                expected: "instruction",
                found: self.describe(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::micheline::Micheline;

    fn typed(e: &Micheline) -> TypedExpr {
        from_micheline(e).unwrap()
    }

    #[test]
    fn test_family_predicates() {
        let int_ty = typed(&Micheline::prim("int", vec![]).unwrap());
        assert!(int_ty.is_type());
        assert!(int_ty.is_comparable_type());
        assert!(!int_ty.is_data());

        let operation_ty = typed(&Micheline::prim("operation", vec![]).unwrap());
        assert!(operation_ty.is_type());
        assert!(!operation_ty.is_comparable_type());

        let unit = typed(&Micheline::prim("Unit", vec![]).unwrap());
        assert!(unit.is_data());
        assert!(!unit.is_type());
        assert!(!unit.is_instr());

        let swap = typed(&Micheline::prim("SWAP", vec![]).unwrap());
        assert!(swap.is_instr());
        assert!(swap.is_data());
    }

    #[test]
    fn test_expect_casts() {
        let int_ty = typed(&Micheline::prim("int", vec![]).unwrap());
        assert!(int_ty.expect_type().is_ok());
        assert!(int_ty.expect_comparable_type().is_ok());
        assert!(matches!(
            int_ty.expect_instr(),
            Err(ConvertError::UnexpectedVariant {
                expected: "instruction",
                ..
            })
        ));

        let unit = typed(&Micheline::prim("Unit", vec![]).unwrap());
        assert!(unit.expect_data().is_ok());
        assert!(unit.expect_type().is_err());
    }
}
