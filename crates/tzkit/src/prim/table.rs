//! The primitive table.
//!
//! Entries are declared in protocol tag order. Where one name belongs to
//! several grammar families, its rows are adjacent and their order is
//! load-bearing: typed-layer conversion tries candidates in declaration
//! order and the first row whose validator accepts wins (the comparable
//! refinement is declared before the plain type row).

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Grammar family of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Data constant (`Pair`, `Some`, `True`, ...).
    Constant,
    /// Instruction (`ADD`, `IF_LEFT`, ...).
    Instruction,
    /// Type (`list`, `lambda`, ...).
    Type,
    /// Comparable type, a refinement of `Type`.
    ComparableType,
    /// Script structure keyword (`parameter`, `storage`, `code`, `view`).
    Keyword,
}

impl Family {
    /// Constants and instructions together form the data family.
    pub fn is_data(self) -> bool {
        matches!(self, Family::Constant | Family::Instruction)
    }

    /// Comparable types are also types.
    pub fn is_type(self) -> bool {
        matches!(self, Family::Type | Family::ComparableType)
    }
}

/// Argument-count rule for a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(u8),
    AtLeast(u8),
    Range(u8, u8),
}

impl Arity {
    /// Whether `n` arguments satisfy this rule.
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k as usize,
            Arity::AtLeast(k) => n >= k as usize,
            Arity::Range(lo, hi) => (lo as usize..=hi as usize).contains(&n),
        }
    }
}

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimDef {
    /// Primitive name as it appears on the wire and in source.
    pub name: &'static str,
    /// Binary prim code (index in the protocol's primitive table).
    pub tag: u8,
    pub family: Family,
    pub arity: Arity,
}

const fn def(name: &'static str, tag: u8, family: Family, arity: Arity) -> PrimDef {
    PrimDef {
        name,
        tag,
        family,
        arity,
    }
}

use Arity::{AtLeast, Exact, Range};
use Family::{ComparableType, Constant, Instruction, Keyword, Type};

/// The complete ordered registry.
///
/// Tags 0x00..=0x92 match the protocol's primitive name table byte for
/// byte. Comparable rows share the tag of their type row.
pub static REGISTRY: &[PrimDef] = &[
    def("parameter", 0x00, Keyword, Exact(1)),
    def("storage", 0x01, Keyword, Exact(1)),
    def("code", 0x02, Keyword, Exact(1)),
    def("False", 0x03, Constant, Exact(0)),
    def("Elt", 0x04, Constant, Exact(2)),
    def("Left", 0x05, Constant, Exact(1)),
    def("None", 0x06, Constant, Exact(0)),
    def("Pair", 0x07, Constant, AtLeast(2)),
    def("Right", 0x08, Constant, Exact(1)),
    def("Some", 0x09, Constant, Exact(1)),
    def("True", 0x0a, Constant, Exact(0)),
    def("Unit", 0x0b, Constant, Exact(0)),
    def("PACK", 0x0c, Instruction, Exact(0)),
    def("UNPACK", 0x0d, Instruction, Exact(1)),
    def("BLAKE2B", 0x0e, Instruction, Exact(0)),
    def("SHA256", 0x0f, Instruction, Exact(0)),
    def("SHA512", 0x10, Instruction, Exact(0)),
    def("ABS", 0x11, Instruction, Exact(0)),
    def("ADD", 0x12, Instruction, Exact(0)),
    def("AMOUNT", 0x13, Instruction, Exact(0)),
    def("AND", 0x14, Instruction, Exact(0)),
    def("BALANCE", 0x15, Instruction, Exact(0)),
    def("CAR", 0x16, Instruction, Exact(0)),
    def("CDR", 0x17, Instruction, Exact(0)),
    def("CHECK_SIGNATURE", 0x18, Instruction, Exact(0)),
    def("COMPARE", 0x19, Instruction, Exact(0)),
    def("CONCAT", 0x1a, Instruction, Exact(0)),
    def("CONS", 0x1b, Instruction, Exact(0)),
    def("CREATE_ACCOUNT", 0x1c, Instruction, Exact(0)),
    def("CREATE_CONTRACT", 0x1d, Instruction, Exact(1)),
    def("IMPLICIT_ACCOUNT", 0x1e, Instruction, Exact(0)),
    def("DIP", 0x1f, Instruction, Range(1, 2)),
    def("DROP", 0x20, Instruction, Range(0, 1)),
    def("DUP", 0x21, Instruction, Range(0, 1)),
    def("EDIV", 0x22, Instruction, Exact(0)),
    def("EMPTY_MAP", 0x23, Instruction, Exact(2)),
    def("EMPTY_SET", 0x24, Instruction, Exact(1)),
    def("EQ", 0x25, Instruction, Exact(0)),
    def("EXEC", 0x26, Instruction, Exact(0)),
    def("FAILWITH", 0x27, Instruction, Exact(0)),
    def("GE", 0x28, Instruction, Exact(0)),
    def("GET", 0x29, Instruction, Range(0, 1)),
    def("GT", 0x2a, Instruction, Exact(0)),
    def("HASH_KEY", 0x2b, Instruction, Exact(0)),
    def("IF", 0x2c, Instruction, Exact(2)),
    def("IF_CONS", 0x2d, Instruction, Exact(2)),
    def("IF_LEFT", 0x2e, Instruction, Exact(2)),
    def("IF_NONE", 0x2f, Instruction, Exact(2)),
    def("INT", 0x30, Instruction, Exact(0)),
    def("LAMBDA", 0x31, Instruction, Exact(3)),
    def("LE", 0x32, Instruction, Exact(0)),
    def("LEFT", 0x33, Instruction, Exact(1)),
    def("LOOP", 0x34, Instruction, Exact(1)),
    def("LSL", 0x35, Instruction, Exact(0)),
    def("LSR", 0x36, Instruction, Exact(0)),
    def("LT", 0x37, Instruction, Exact(0)),
    def("MAP", 0x38, Instruction, Exact(1)),
    def("MEM", 0x39, Instruction, Exact(0)),
    def("MUL", 0x3a, Instruction, Exact(0)),
    def("NEG", 0x3b, Instruction, Exact(0)),
    def("NEQ", 0x3c, Instruction, Exact(0)),
    def("NIL", 0x3d, Instruction, Exact(1)),
    def("NONE", 0x3e, Instruction, Exact(1)),
    def("NOT", 0x3f, Instruction, Exact(0)),
    def("NOW", 0x40, Instruction, Exact(0)),
    def("OR", 0x41, Instruction, Exact(0)),
    def("PAIR", 0x42, Instruction, Range(0, 1)),
    def("PUSH", 0x43, Instruction, Exact(2)),
    def("RIGHT", 0x44, Instruction, Exact(1)),
    def("SIZE", 0x45, Instruction, Exact(0)),
    def("SOME", 0x46, Instruction, Exact(0)),
    def("SOURCE", 0x47, Instruction, Exact(0)),
    def("SENDER", 0x48, Instruction, Exact(0)),
    def("SELF", 0x49, Instruction, Exact(0)),
    def("STEPS_TO_QUOTA", 0x4a, Instruction, Exact(0)),
    def("SUB", 0x4b, Instruction, Exact(0)),
    def("SWAP", 0x4c, Instruction, Exact(0)),
    def("TRANSFER_TOKENS", 0x4d, Instruction, Exact(0)),
    def("SET_DELEGATE", 0x4e, Instruction, Exact(0)),
    def("UNIT", 0x4f, Instruction, Exact(0)),
    def("UPDATE", 0x50, Instruction, Range(0, 1)),
    def("XOR", 0x51, Instruction, Exact(0)),
    def("ITER", 0x52, Instruction, Exact(1)),
    def("LOOP_LEFT", 0x53, Instruction, Exact(1)),
    def("ADDRESS", 0x54, Instruction, Exact(0)),
    def("CONTRACT", 0x55, Instruction, Exact(1)),
    def("ISNAT", 0x56, Instruction, Exact(0)),
    def("CAST", 0x57, Instruction, Exact(1)),
    def("RENAME", 0x58, Instruction, Exact(0)),
    def("bool", 0x59, ComparableType, Exact(0)),
    def("bool", 0x59, Type, Exact(0)),
    def("contract", 0x5a, Type, Exact(1)),
    def("int", 0x5b, ComparableType, Exact(0)),
    def("int", 0x5b, Type, Exact(0)),
    def("key", 0x5c, ComparableType, Exact(0)),
    def("key", 0x5c, Type, Exact(0)),
    def("key_hash", 0x5d, ComparableType, Exact(0)),
    def("key_hash", 0x5d, Type, Exact(0)),
    def("lambda", 0x5e, Type, Exact(2)),
    def("list", 0x5f, Type, Exact(1)),
    def("map", 0x60, Type, Exact(2)),
    def("big_map", 0x61, Type, Exact(2)),
    def("nat", 0x62, ComparableType, Exact(0)),
    def("nat", 0x62, Type, Exact(0)),
    def("option", 0x63, ComparableType, Exact(1)),
    def("option", 0x63, Type, Exact(1)),
    def("or", 0x64, ComparableType, AtLeast(2)),
    def("or", 0x64, Type, AtLeast(2)),
    def("pair", 0x65, ComparableType, AtLeast(2)),
    def("pair", 0x65, Type, AtLeast(2)),
    def("set", 0x66, Type, Exact(1)),
    def("signature", 0x67, ComparableType, Exact(0)),
    def("signature", 0x67, Type, Exact(0)),
    def("string", 0x68, ComparableType, Exact(0)),
    def("string", 0x68, Type, Exact(0)),
    def("bytes", 0x69, ComparableType, Exact(0)),
    def("bytes", 0x69, Type, Exact(0)),
    def("mutez", 0x6a, ComparableType, Exact(0)),
    def("mutez", 0x6a, Type, Exact(0)),
    def("timestamp", 0x6b, ComparableType, Exact(0)),
    def("timestamp", 0x6b, Type, Exact(0)),
    def("unit", 0x6c, ComparableType, Exact(0)),
    def("unit", 0x6c, Type, Exact(0)),
    def("operation", 0x6d, Type, Exact(0)),
    def("address", 0x6e, ComparableType, Exact(0)),
    def("address", 0x6e, Type, Exact(0)),
    def("SLICE", 0x6f, Instruction, Exact(0)),
    def("DIG", 0x70, Instruction, Exact(1)),
    def("DUG", 0x71, Instruction, Exact(1)),
    def("EMPTY_BIG_MAP", 0x72, Instruction, Exact(2)),
    def("APPLY", 0x73, Instruction, Exact(0)),
    def("chain_id", 0x74, ComparableType, Exact(0)),
    def("chain_id", 0x74, Type, Exact(0)),
    def("CHAIN_ID", 0x75, Instruction, Exact(0)),
    def("LEVEL", 0x76, Instruction, Exact(0)),
    def("SELF_ADDRESS", 0x77, Instruction, Exact(0)),
    def("never", 0x78, ComparableType, Exact(0)),
    def("never", 0x78, Type, Exact(0)),
    def("NEVER", 0x79, Instruction, Exact(0)),
    def("UNPAIR", 0x7a, Instruction, Range(0, 1)),
    def("VOTING_POWER", 0x7b, Instruction, Exact(0)),
    def("TOTAL_VOTING_POWER", 0x7c, Instruction, Exact(0)),
    def("KECCAK", 0x7d, Instruction, Exact(0)),
    def("SHA3", 0x7e, Instruction, Exact(0)),
    def("PAIRING_CHECK", 0x7f, Instruction, Exact(0)),
    def("bls12_381_g1", 0x80, Type, Exact(0)),
    def("bls12_381_g2", 0x81, Type, Exact(0)),
    def("bls12_381_fr", 0x82, Type, Exact(0)),
    def("sapling_state", 0x83, Type, Exact(1)),
    def("sapling_transaction_deprecated", 0x84, Type, Exact(1)),
    def("SAPLING_EMPTY_STATE", 0x85, Instruction, Exact(1)),
    def("SAPLING_VERIFY_UPDATE", 0x86, Instruction, Exact(0)),
    def("ticket", 0x87, Type, Exact(1)),
    def("TICKET_DEPRECATED", 0x88, Instruction, Exact(0)),
    def("READ_TICKET", 0x89, Instruction, Exact(0)),
    def("SPLIT_TICKET", 0x8a, Instruction, Exact(0)),
    def("JOIN_TICKETS", 0x8b, Instruction, Exact(0)),
    def("GET_AND_UPDATE", 0x8c, Instruction, Exact(0)),
    def("chest", 0x8d, Type, Exact(0)),
    def("chest_key", 0x8e, Type, Exact(0)),
    def("OPEN_CHEST", 0x8f, Instruction, Exact(0)),
    def("VIEW", 0x90, Instruction, Exact(2)),
    def("view", 0x91, Keyword, Exact(4)),
    def("constant", 0x92, Keyword, Exact(1)),
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Vec<&'static PrimDef>> = {
        let mut map: HashMap<&'static str, Vec<&'static PrimDef>> = HashMap::new();
        for def in REGISTRY {
            map.entry(def.name).or_default().push(def);
        }
        map
    };
    static ref NAME_BY_TAG: HashMap<u8, &'static str> = {
        let mut map = HashMap::new();
        for def in REGISTRY {
            // First row wins; duplicate-family rows share the name anyway.
            map.entry(def.tag).or_insert(def.name);
        }
        map
    };
}

/// Returns the candidate rows for a name, in declaration order.
pub fn candidates(name: &str) -> Option<&'static [&'static PrimDef]> {
    BY_NAME.get(name).map(|v| v.as_slice())
}

/// Returns the name for a binary prim code.
pub fn name_for_tag(tag: u8) -> Option<&'static str> {
    NAME_BY_TAG.get(&tag).copied()
}

/// Returns the binary prim code for a name.
pub fn tag_for_name(name: &str) -> Option<u8> {
    candidates(name).map(|defs| defs[0].tag)
}
