//! Canonicalization of n-ary pair/or shapes.
//!
//! The chain accepts `Pair a b c d` as sugar for the right-combed
//! `Pair a (Pair b (Pair c d))`. Normalization rewrites every such
//! application (and nothing else) into its binary form. Synthesized
//! inner nodes never carry annotations; only the outermost application
//! keeps its originals.

use crate::micheline::{App, Micheline};

/// Primitive names subject to right-combing.
fn is_combable(prim: &str) -> bool {
    matches!(prim, "Pair" | "pair" | "Or" | "or")
}

/// Recursively normalizes an expression.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(expr: Micheline) -> Micheline {
    match expr {
        Micheline::App(app) => Micheline::App(normalize_app(app)),
        Micheline::Seq(items) => Micheline::Seq(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

fn normalize_app(app: App) -> App {
    let App { prim, args, annots } = app;
    let mut args: Vec<Micheline> = args.into_iter().map(normalize).collect();

    if !is_combable(&prim) || args.len() <= 2 {
        return App { prim, args, annots };
    }

    // Fold the tail right-to-left into synthesized binary nodes.
    let mut tail = args.pop().unwrap();
    while args.len() > 1 {
        let left = args.pop().unwrap();
        tail = Micheline::App(App {
            prim: prim.clone(),
            args: vec![left, tail],
            annots: Vec::new(),
        });
    }
    let head = args.pop().unwrap();

    App {
        prim,
        args: vec![head, tail],
        annots,
    }
}
