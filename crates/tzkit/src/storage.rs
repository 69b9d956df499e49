//! Contract storage interpreted as a field-addressable entry tree.
//!
//! A raw storage value is an anonymous Micheline tree; its shape only
//! becomes navigable next to the contract's storage type. [`StorageEntry`]
//! is built by walking value and type together: pairs become objects
//! whose field names come from the type's `%field` annotations, maps and
//! big maps become their own node kinds, and anything else stays a leaf
//! value. Unnamed pair children that are themselves objects are
//! flattened one level, so right-comb storage reads as a flat record.

use std::collections::HashMap;

use num_bigint::BigInt;

use crate::error::ConvertError;
use crate::micheline::Micheline;

/// One node of the interpreted storage tree.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageEntry {
    /// A leaf value, kept as raw Micheline.
    Value(Micheline),
    /// A pair-shaped node with named field access.
    Object(StorageObject),
    /// A list or set.
    Seq(Vec<StorageEntry>),
    /// An inline map literal.
    Map(Vec<(Micheline, StorageEntry)>),
    /// A big map, referenced by id rather than inlined.
    BigMap { id: BigInt },
}

/// A pair-shaped storage node indexed by field annotation names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorageObject {
    entries: Vec<(Option<String>, StorageEntry)>,
    index: HashMap<String, usize>,
}

impl StorageObject {
    fn push(&mut self, name: Option<String>, entry: StorageEntry) {
        if let Some(name) = &name {
            // First occurrence wins when a flattened child reuses a name.
            self.index.entry(name.clone()).or_insert(self.entries.len());
        }
        self.entries.push((name, entry));
    }

    /// Looks up a field by its annotation name.
    pub fn field(&self, name: &str) -> Option<&StorageEntry> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// All entries in positional order.
    pub fn entries(&self) -> &[(Option<String>, StorageEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageEntry {
    /// Interprets a storage value against its storage type.
    pub fn from_value_and_type(
        value: &Micheline,
        ty: &Micheline,
    ) -> Result<StorageEntry, ConvertError> {
        build(value, ty)
    }

    /// Convenience accessor for object field lookup.
    pub fn field(&self, name: &str) -> Option<&StorageEntry> {
        match self {
            StorageEntry::Object(object) => object.field(name),
            _ => None,
        }
    }
}

fn build(value: &Micheline, ty: &Micheline) -> Result<StorageEntry, ConvertError> {
    let Some(ty_app) = ty.as_app() else {
        return Err(ConvertError::UnexpectedVariant {
            expected: "type application",
            found: "non-application type",
        });
    };

    match ty_app.prim.as_str() {
        "pair" => build_object(value, &ty_app.args),
        "list" | "set" => {
            let items = value.as_seq().ok_or(ConvertError::UnexpectedVariant {
                expected: "sequence value",
                found: "non-sequence",
            })?;
            let element_ty = ty_app.args.first().ok_or(ConvertError::UnexpectedVariant {
                expected: "element type argument",
                found: "bare list type",
            })?;
            let entries = items
                .iter()
                .map(|item| build(item, element_ty))
                .collect::<Result<_, _>>()?;
            Ok(StorageEntry::Seq(entries))
        }
        "map" => build_map(value, &ty_app.args),
        "big_map" => match value {
            // An allocated big map appears as its integer id.
            Micheline::Int(id) => Ok(StorageEntry::BigMap { id: id.clone() }),
            // A not-yet-allocated one appears as an inline literal.
            Micheline::Seq(_) => build_map(value, &ty_app.args),
            _ => Err(ConvertError::UnexpectedVariant {
                expected: "big map id or literal",
                found: "other value",
            }),
        },
        "option" => match value.as_app() {
            Some(app) if app.prim == "Some" && app.args.len() == 1 => {
                let inner_ty = ty_app.args.first().ok_or(ConvertError::UnexpectedVariant {
                    expected: "option type argument",
                    found: "bare option type",
                })?;
                build(&app.args[0], inner_ty)
            }
            _ => Ok(StorageEntry::Value(value.clone())),
        },
        "or" => match value.as_app() {
            Some(app) if (app.prim == "Left" || app.prim == "Right") && app.args.len() == 1 => {
                let branch = if app.prim == "Left" { 0 } else { 1 };
                let branch_ty = ty_app.args.get(branch).ok_or(ConvertError::UnexpectedVariant {
                    expected: "or branch type",
                    found: "bare or type",
                })?;
                build(&app.args[0], branch_ty)
            }
            _ => Err(ConvertError::UnexpectedVariant {
                expected: "Left or Right value",
                found: "other value",
            }),
        },
        _ => Ok(StorageEntry::Value(value.clone())),
    }
}

fn build_object(value: &Micheline, field_types: &[Micheline]) -> Result<StorageEntry, ConvertError> {
    let Some(value_app) = value.as_app().filter(|app| app.prim == "Pair") else {
        return Err(ConvertError::UnexpectedVariant {
            expected: "Pair value",
            found: "non-pair value",
        });
    };
    if value_app.args.len() != field_types.len() {
        return Err(ConvertError::UnexpectedVariant {
            expected: "pair value matching type arity",
            found: "pair arity mismatch",
        });
    }

    let mut object = StorageObject::default();
    for (child_value, child_ty) in value_app.args.iter().zip(field_types) {
        let name = field_annot(child_ty);
        let entry = build(child_value, child_ty)?;
        match (name, entry) {
            // An unnamed nested object merges into its parent, one level.
            (None, StorageEntry::Object(inner)) => {
                for (inner_name, inner_entry) in inner.entries {
                    object.push(inner_name, inner_entry);
                }
            }
            (name, entry) => object.push(name, entry),
        }
    }
    Ok(StorageEntry::Object(object))
}

fn build_map(value: &Micheline, type_args: &[Micheline]) -> Result<StorageEntry, ConvertError> {
    let items = value.as_seq().ok_or(ConvertError::UnexpectedVariant {
        expected: "map literal",
        found: "non-sequence",
    })?;
    let value_ty = type_args.get(1).ok_or(ConvertError::UnexpectedVariant {
        expected: "map value type argument",
        found: "bare map type",
    })?;

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match item.as_app() {
            Some(app) if app.prim == "Elt" && app.args.len() == 2 => {
                entries.push((app.args[0].clone(), build(&app.args[1], value_ty)?));
            }
            _ => {
                return Err(ConvertError::UnexpectedVariant {
                    expected: "Elt entry",
                    found: "non-Elt sequence item",
                })
            }
        }
    }
    Ok(StorageEntry::Map(entries))
}

/// First `%field` annotation on a type node, without the sigil.
fn field_annot(ty: &Micheline) -> Option<String> {
    let app = ty.as_app()?;
    app.annots
        .iter()
        .find(|a| a.starts_with('%') && a.len() > 1)
        .map(|a| a[1..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(prim: &str, args: Vec<Micheline>, annots: Vec<&str>) -> Micheline {
        Micheline::app(prim, args, annots.into_iter().map(String::from).collect()).unwrap()
    }

    fn leaf(prim: &str, annot: &str) -> Micheline {
        let annots = if annot.is_empty() { vec![] } else { vec![annot] };
        ty(prim, vec![], annots)
    }

    #[test]
    fn test_flat_record() {
        // pair (nat %counter) (string %owner)
        let storage_ty = ty(
            "pair",
            vec![leaf("nat", "%counter"), leaf("string", "%owner")],
            vec![],
        );
        let value = Micheline::prim(
            "Pair",
            vec![Micheline::int(5), Micheline::string("alice").unwrap()],
        )
        .unwrap();

        let entry = StorageEntry::from_value_and_type(&value, &storage_ty).unwrap();
        assert_eq!(entry.field("counter"), Some(&StorageEntry::Value(Micheline::int(5))));
        assert_eq!(
            entry.field("owner"),
            Some(&StorageEntry::Value(Micheline::string("alice").unwrap()))
        );
        assert_eq!(entry.field("missing"), None);
    }

    #[test]
    fn test_right_comb_flattens() {
        // pair (nat %a) (pair (nat %b) (nat %c)) with matching value.
        let storage_ty = ty(
            "pair",
            vec![
                leaf("nat", "%a"),
                ty("pair", vec![leaf("nat", "%b"), leaf("nat", "%c")], vec![]),
            ],
            vec![],
        );
        let value = Micheline::prim(
            "Pair",
            vec![
                Micheline::int(1),
                Micheline::prim("Pair", vec![Micheline::int(2), Micheline::int(3)]).unwrap(),
            ],
        )
        .unwrap();

        let entry = StorageEntry::from_value_and_type(&value, &storage_ty).unwrap();
        let StorageEntry::Object(object) = &entry else {
            panic!("expected object");
        };
        assert_eq!(object.len(), 3);
        assert_eq!(entry.field("a"), Some(&StorageEntry::Value(Micheline::int(1))));
        assert_eq!(entry.field("b"), Some(&StorageEntry::Value(Micheline::int(2))));
        assert_eq!(entry.field("c"), Some(&StorageEntry::Value(Micheline::int(3))));
    }

    #[test]
    fn test_named_nested_object_stays_nested() {
        let storage_ty = ty(
            "pair",
            vec![
                leaf("nat", "%a"),
                ty(
                    "pair",
                    vec![leaf("nat", "%b"), leaf("nat", "%c")],
                    vec!["%inner"],
                ),
            ],
            vec![],
        );
        let value = Micheline::prim(
            "Pair",
            vec![
                Micheline::int(1),
                Micheline::prim("Pair", vec![Micheline::int(2), Micheline::int(3)]).unwrap(),
            ],
        )
        .unwrap();

        let entry = StorageEntry::from_value_and_type(&value, &storage_ty).unwrap();
        let inner = entry.field("inner").unwrap();
        assert_eq!(inner.field("b"), Some(&StorageEntry::Value(Micheline::int(2))));
        assert_eq!(entry.field("b"), None);
    }

    #[test]
    fn test_big_map_by_id() {
        let storage_ty = ty(
            "big_map",
            vec![leaf("string", ""), leaf("nat", "")],
            vec![],
        );
        let entry = StorageEntry::from_value_and_type(&Micheline::int(17), &storage_ty).unwrap();
        assert_eq!(entry, StorageEntry::BigMap { id: BigInt::from(17) });
    }

    #[test]
    fn test_big_map_literal_and_map() {
        let map_value = Micheline::seq(vec![Micheline::prim(
            "Elt",
            vec![Micheline::string("k").unwrap(), Micheline::int(1)],
        )
        .unwrap()]);

        for prim in ["map", "big_map"] {
            let storage_ty = ty(prim, vec![leaf("string", ""), leaf("nat", "")], vec![]);
            let entry = StorageEntry::from_value_and_type(&map_value, &storage_ty).unwrap();
            let StorageEntry::Map(entries) = entry else {
                panic!("expected map for {prim}");
            };
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].1, StorageEntry::Value(Micheline::int(1)));
        }
    }

    #[test]
    fn test_list_and_option_and_or() {
        let list_ty = ty("list", vec![leaf("nat", "")], vec![]);
        let entry = StorageEntry::from_value_and_type(
            &Micheline::seq(vec![Micheline::int(1), Micheline::int(2)]),
            &list_ty,
        )
        .unwrap();
        assert_eq!(
            entry,
            StorageEntry::Seq(vec![
                StorageEntry::Value(Micheline::int(1)),
                StorageEntry::Value(Micheline::int(2)),
            ])
        );

        let option_ty = ty("option", vec![leaf("nat", "")], vec![]);
        let some = Micheline::prim("Some", vec![Micheline::int(9)]).unwrap();
        assert_eq!(
            StorageEntry::from_value_and_type(&some, &option_ty).unwrap(),
            StorageEntry::Value(Micheline::int(9))
        );
        let none = Micheline::prim("None", vec![]).unwrap();
        assert_eq!(
            StorageEntry::from_value_and_type(&none, &option_ty).unwrap(),
            StorageEntry::Value(none.clone())
        );

        let or_ty = ty("or", vec![leaf("nat", ""), leaf("string", "")], vec![]);
        let right = Micheline::prim("Right", vec![Micheline::string("x").unwrap()]).unwrap();
        assert_eq!(
            StorageEntry::from_value_and_type(&right, &or_ty).unwrap(),
            StorageEntry::Value(Micheline::string("x").unwrap())
        );
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let storage_ty = ty("pair", vec![leaf("nat", "%a"), leaf("nat", "%b")], vec![]);
        // Value is not a pair.
        assert!(StorageEntry::from_value_and_type(&Micheline::int(1), &storage_ty).is_err());

        // Arity mismatch.
        let short = Micheline::prim("Pair", vec![Micheline::int(1)]);
        assert!(short.is_err() || {
            let short = short.unwrap();
            StorageEntry::from_value_and_type(&short, &storage_ty).is_err()
        });
    }
}
