//! Bidirectional conversion between Micheline and the typed layer.
//!
//! Micheline → typed resolves each application name against the registry
//! and takes the first candidate row, in declaration order, whose arity
//! and child-family validator accepts the already-converted children.
//! That order is semantically load-bearing: several names exist in more
//! than one grammar family.
//!
//! Typed → Micheline is the structural inverse and is always
//! unambiguous, since every typed application owns its registry row.

use crate::error::ConvertError;
use crate::micheline::{App, Micheline};
use crate::prim::{self, Family, PrimDef};
use crate::typed::{Annotations, TypedApp, TypedExpr};

// =============================================================================
// MICHELINE -> TYPED
// =============================================================================

/// Interprets a Micheline tree against the typed grammar.
pub fn from_micheline(expr: &Micheline) -> Result<TypedExpr, ConvertError> {
    match expr {
        Micheline::Int(v) => Ok(TypedExpr::Int(v.clone())),
        Micheline::String(s) => Ok(TypedExpr::String(s.clone())),
        Micheline::Bytes(b) => Ok(TypedExpr::Bytes(b.clone())),
        Micheline::App(app) => convert_app(app),
        Micheline::Seq(items) => convert_seq(items),
    }
}

fn convert_app(app: &App) -> Result<TypedExpr, ConvertError> {
    let candidates = prim::candidates(&app.prim).ok_or_else(|| ConvertError::UnknownPrimitive {
        name: app.prim.clone(),
    })?;

    let args: Vec<TypedExpr> = app
        .args
        .iter()
        .map(from_micheline)
        .collect::<Result<_, _>>()?;
    let annots = Annotations::parse(&app.annots)?;

    for &def in candidates {
        if validates(def, &args) {
            return Ok(TypedExpr::App(TypedApp { def, args, annots }));
        }
    }
    Err(ConvertError::NoMatchingCandidate {
        name: app.prim.clone(),
        args: args.len(),
    })
}

/// Arity and child-family check for one candidate row.
fn validates(def: &PrimDef, args: &[TypedExpr]) -> bool {
    if !def.arity.accepts(args.len()) {
        return false;
    }
    match def.family {
        Family::ComparableType => args.iter().all(TypedExpr::is_comparable_type),
        Family::Type => args.iter().all(TypedExpr::is_type),
        Family::Constant => args.iter().all(TypedExpr::is_data),
        // Instructions and script keywords mix types, data, and code
        // blocks among their arguments (PUSH ty v, IF {..} {..}, ...).
        Family::Instruction | Family::Keyword => true,
    }
}

fn convert_seq(items: &[Micheline]) -> Result<TypedExpr, ConvertError> {
    if items.is_empty() {
        return Ok(TypedExpr::DataSeq(Vec::new()));
    }

    // All-Elt sequences are map literals.
    if items.iter().all(|item| item.is_app_of("Elt")) {
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let app = item.as_app().unwrap();
            if app.args.len() != 2 {
                return Err(ConvertError::NoMatchingCandidate {
                    name: "Elt".to_string(),
                    args: app.args.len(),
                });
            }
            let key = from_micheline(&app.args[0])?;
            let value = from_micheline(&app.args[1])?;
            entries.push((key, value));
        }
        return Ok(TypedExpr::Map(entries));
    }

    let converted: Vec<TypedExpr> = items
        .iter()
        .map(from_micheline)
        .collect::<Result<_, _>>()?;

    // Instruction classification is tried before data; an all-instruction
    // block (e.g. a lambda body) satisfies both.
    if converted.iter().all(TypedExpr::is_instr) {
        Ok(TypedExpr::InstrSeq(converted))
    } else if converted.iter().all(TypedExpr::is_data) {
        Ok(TypedExpr::DataSeq(converted))
    } else {
        Err(ConvertError::UnclassifiableSequence)
    }
}

// =============================================================================
// TYPED -> MICHELINE
// =============================================================================

/// Projects a typed expression back onto the wire AST.
///
/// The inverse of [`from_micheline`] up to normalization and canonical
/// annotation grouping: `normalize(to_micheline(from_micheline(e)))`
/// equals `normalize(e)` for every grammar-valid `e` whose annotations
/// are already canonically grouped.
pub fn to_micheline(expr: &TypedExpr) -> Micheline {
    match expr {
        TypedExpr::Int(v) => Micheline::Int(v.clone()),
        TypedExpr::String(s) => Micheline::String(s.clone()),
        TypedExpr::Bytes(b) => Micheline::Bytes(b.clone()),
        TypedExpr::App(app) => Micheline::App(App {
            prim: app.name().to_string(),
            args: app.args.iter().map(to_micheline).collect(),
            annots: app.annots.to_vec(),
        }),
        TypedExpr::DataSeq(items) | TypedExpr::InstrSeq(items) => {
            Micheline::Seq(items.iter().map(to_micheline).collect())
        }
        TypedExpr::Map(entries) => Micheline::Seq(
            entries
                .iter()
                .map(|(k, v)| {
                    Micheline::App(App {
                        prim: "Elt".to_string(),
                        args: vec![to_micheline(k), to_micheline(v)],
                        annots: Vec::new(),
                    })
                })
                .collect(),
        ),
    }
}
