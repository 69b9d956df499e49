//! The Micheline wire AST.
//!
//! Micheline is the chain's generic, untyped expression tree: integers,
//! strings, byte blobs, primitive applications, and sequences. Values are
//! immutable once constructed and compare structurally.

pub mod normalize;

use num_bigint::BigInt;

use crate::error::DecodeError;
use crate::limits::{MAX_ANNOT_LEN, MAX_ANNOTS};

pub use normalize::normalize;

/// A Micheline expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Micheline {
    /// Arbitrary-precision integer literal.
    Int(BigInt),
    /// String literal (printable ASCII only, per the chain's grammar).
    String(String),
    /// Raw byte blob literal.
    Bytes(Vec<u8>),
    /// Primitive application.
    App(App),
    /// Ordered sequence of expressions.
    Seq(Vec<Micheline>),
}

/// A primitive application: name, ordered arguments, annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct App {
    pub prim: String,
    pub args: Vec<Micheline>,
    pub annots: Vec<String>,
}

impl Micheline {
    /// Builds an integer literal.
    pub fn int(value: impl Into<BigInt>) -> Micheline {
        Micheline::Int(value.into())
    }

    /// Builds a string literal, validating the string grammar.
    pub fn string(value: impl Into<String>) -> Result<Micheline, DecodeError> {
        let value = value.into();
        validate_string(&value)?;
        Ok(Micheline::String(value))
    }

    /// Builds a bytes literal.
    pub fn bytes(value: impl Into<Vec<u8>>) -> Micheline {
        Micheline::Bytes(value.into())
    }

    /// Builds a sequence.
    pub fn seq(items: impl Into<Vec<Micheline>>) -> Micheline {
        Micheline::Seq(items.into())
    }

    /// Builds a primitive application, validating name and annotations.
    pub fn app(
        prim: impl Into<String>,
        args: Vec<Micheline>,
        annots: Vec<String>,
    ) -> Result<Micheline, DecodeError> {
        Ok(Micheline::App(App::new(prim, args, annots)?))
    }

    /// Builds an annotation-free primitive application.
    pub fn prim(prim: impl Into<String>, args: Vec<Micheline>) -> Result<Micheline, DecodeError> {
        Micheline::app(prim, args, Vec::new())
    }

    /// Returns the integer payload, if this node is an `Int`.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Micheline::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string payload, if this node is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Micheline::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the byte payload, if this node is a `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Micheline::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the application, if this node is an `App`.
    pub fn as_app(&self) -> Option<&App> {
        match self {
            Micheline::App(app) => Some(app),
            _ => None,
        }
    }

    /// Returns the elements, if this node is a `Seq`.
    pub fn as_seq(&self) -> Option<&[Micheline]> {
        match self {
            Micheline::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// True if this node is an application of the given primitive.
    pub fn is_app_of(&self, prim: &str) -> bool {
        matches!(self, Micheline::App(app) if app.prim == prim)
    }
}

impl App {
    /// Creates a validated primitive application.
    pub fn new(
        prim: impl Into<String>,
        args: Vec<Micheline>,
        annots: Vec<String>,
    ) -> Result<App, DecodeError> {
        let prim = prim.into();
        validate_prim_name(&prim)?;
        if annots.len() > MAX_ANNOTS {
            return Err(DecodeError::LengthExceedsLimit {
                field: "annots",
                len: annots.len(),
                max: MAX_ANNOTS,
            });
        }
        for annot in &annots {
            validate_annotation(annot)?;
        }
        Ok(App { prim, args, annots })
    }

    /// Adds an argument.
    pub fn with_arg(mut self, arg: Micheline) -> App {
        self.args.push(arg);
        self
    }

    /// Adds an annotation, validating its grammar.
    pub fn with_annot(mut self, annot: impl Into<String>) -> Result<App, DecodeError> {
        let annot = annot.into();
        validate_annotation(&annot)?;
        self.annots.push(annot);
        Ok(self)
    }
}

impl From<App> for Micheline {
    fn from(app: App) -> Micheline {
        Micheline::App(app)
    }
}

// =============================================================================
// GRAMMAR VALIDATION
// =============================================================================

/// Validates a primitive name: one or more of `[A-Za-z0-9_]`.
pub fn validate_prim_name(name: &str) -> Result<(), DecodeError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DecodeError::InvalidPrimName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validates an annotation: a kind sigil from `@:$&%!?` followed by
/// `[A-Za-z0-9_.%@]*`.
pub fn validate_annotation(annot: &str) -> Result<(), DecodeError> {
    let invalid = || DecodeError::InvalidAnnotation {
        annot: annot.to_string(),
    };
    if annot.len() > MAX_ANNOT_LEN {
        return Err(invalid());
    }
    let mut chars = annot.chars();
    match chars.next() {
        Some('@' | ':' | '$' | '&' | '%' | '!' | '?') => {}
        _ => return Err(invalid()),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%' | '@')) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validates a string literal: printable ASCII only.
pub fn validate_string(value: &str) -> Result<(), DecodeError> {
    if value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        Ok(())
    } else {
        Err(DecodeError::MalformedEncoding {
            context: "string literal contains non-printable or non-ASCII characters",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prim_name_validation() {
        assert!(validate_prim_name("Pair").is_ok());
        assert!(validate_prim_name("IF_LEFT").is_ok());
        assert!(validate_prim_name("bls12_381_g1").is_ok());

        assert!(validate_prim_name("").is_err());
        assert!(validate_prim_name("has space").is_err());
        assert!(validate_prim_name("semi;colon").is_err());
    }

    #[test]
    fn test_annotation_validation() {
        assert!(validate_annotation("%amount").is_ok());
        assert!(validate_annotation(":t").is_ok());
        assert!(validate_annotation("@var").is_ok());
        assert!(validate_annotation("%").is_ok());
        assert!(validate_annotation("%a.b").is_ok());

        assert!(validate_annotation("").is_err());
        assert!(validate_annotation("amount").is_err());
        assert!(validate_annotation("%has space").is_err());
        let long = format!("%{}", "a".repeat(300));
        assert!(validate_annotation(&long).is_err());
    }

    #[test]
    fn test_string_validation() {
        assert!(Micheline::string("hello world").is_ok());
        assert!(Micheline::string("").is_ok());
        assert!(Micheline::string("tab\there").is_err());
        assert!(Micheline::string("caf\u{e9}").is_err());
    }

    #[test]
    fn test_app_construction() {
        let app = Micheline::app(
            "Pair",
            vec![Micheline::int(1), Micheline::int(2)],
            vec!["%p".to_string()],
        )
        .unwrap();
        match app {
            Micheline::App(app) => {
                assert_eq!(app.prim, "Pair");
                assert_eq!(app.args.len(), 2);
                assert_eq!(app.annots, vec!["%p"]);
            }
            _ => panic!("expected App"),
        }

        assert!(Micheline::app("bad prim", vec![], vec![]).is_err());
        assert!(Micheline::app("Pair", vec![], vec!["noprefix".to_string()]).is_err());
    }

    #[test]
    fn test_fluent_builders() {
        let built = App::new("Pair", vec![], vec![])
            .unwrap()
            .with_arg(Micheline::int(1))
            .with_arg(Micheline::int(2))
            .with_annot("%p")
            .unwrap();
        let expected = Micheline::app(
            "Pair",
            vec![Micheline::int(1), Micheline::int(2)],
            vec!["%p".to_string()],
        )
        .unwrap();
        assert_eq!(Micheline::from(built), expected);

        // with_annot validates just like App::new.
        let app = App::new("Unit", vec![], vec![]).unwrap();
        assert!(app.with_annot("noprefix").is_err());
    }

    #[test]
    fn test_structural_equality() {
        let a = Micheline::prim("Pair", vec![Micheline::int(1), Micheline::int(2)]).unwrap();
        let b = Micheline::prim("Pair", vec![Micheline::int(1), Micheline::int(2)]).unwrap();
        let c = Micheline::prim("Pair", vec![Micheline::int(2), Micheline::int(1)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
