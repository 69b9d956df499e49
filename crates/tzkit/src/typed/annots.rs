//! Parsed annotations, split by kind.
//!
//! Raw Micheline annotations are sigil-prefixed strings. The typed layer
//! splits them into type (`:`), variable (`@`), and field (`%`) kinds;
//! the remaining legal sigils (`$`, `&`, `!`, `?`) are carried through in
//! a fourth bucket so conversion stays total. Re-joining groups kinds in
//! canonical order (types, vars, fields, others) and preserves the
//! original order within each kind.

use crate::error::DecodeError;
use crate::micheline::validate_annotation;

/// Annotations of a typed application, grouped by kind sigil.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Annotations {
    /// `:`-prefixed type annotations.
    pub types: Vec<String>,
    /// `@`-prefixed variable annotations.
    pub vars: Vec<String>,
    /// `%`-prefixed field annotations.
    pub fields: Vec<String>,
    /// Annotations with any other legal sigil.
    pub others: Vec<String>,
}

impl Annotations {
    /// Parses raw annotation strings into kind buckets.
    pub fn parse(raw: &[String]) -> Result<Annotations, DecodeError> {
        let mut annots = Annotations::default();
        for annot in raw {
            validate_annotation(annot)?;
            match annot.as_bytes()[0] {
                b':' => annots.types.push(annot.clone()),
                b'@' => annots.vars.push(annot.clone()),
                b'%' => annots.fields.push(annot.clone()),
                _ => annots.others.push(annot.clone()),
            }
        }
        Ok(annots)
    }

    /// True if no annotation of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.vars.is_empty()
            && self.fields.is_empty()
            && self.others.is_empty()
    }

    /// Re-joins all annotations in canonical kind grouping.
    pub fn to_vec(&self) -> Vec<String> {
        let mut out =
            Vec::with_capacity(self.types.len() + self.vars.len() + self.fields.len() + self.others.len());
        out.extend(self.types.iter().cloned());
        out.extend(self.vars.iter().cloned());
        out.extend(self.fields.iter().cloned());
        out.extend(self.others.iter().cloned());
        out
    }

    /// Returns the first field annotation without its sigil, if any.
    ///
    /// Used for deriving storage object field names.
    pub fn field_name(&self) -> Option<&str> {
        self.fields.first().map(|f| &f[1..]).filter(|n| !n.is_empty())
    }
}
