//! Binary codec for Micheline expressions.
//!
//! Each node kind maps to one of eleven wire tags. Primitive applications
//! are split by argument count and annotation presence so that common
//! shapes stay compact; the encoder always picks the minimal tag covering
//! the actual shape, which makes the encoding canonical rather than
//! merely valid.

use num_bigint::BigInt;

use crate::codec::primitives::{Reader, Writer};
use crate::codec::zarith;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_BYTES_LEN, MAX_EXPR_DEPTH, MAX_SECTION_LEN, MAX_STRING_LEN};
use crate::micheline::{App, Micheline};
use crate::prim;

/// Wire tags for expression nodes (protocol constants).
mod tag {
    pub const INT: u8 = 0x00;
    pub const STRING: u8 = 0x01;
    pub const SEQ: u8 = 0x02;
    pub const PRIM_0: u8 = 0x03;
    pub const PRIM_0_ANNOTS: u8 = 0x04;
    pub const PRIM_1: u8 = 0x05;
    pub const PRIM_1_ANNOTS: u8 = 0x06;
    pub const PRIM_2: u8 = 0x07;
    pub const PRIM_2_ANNOTS: u8 = 0x08;
    pub const PRIM_GENERIC: u8 = 0x09;
    pub const BYTES: u8 = 0x0a;
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an expression to a fresh byte vector.
pub fn encode_expr(expr: &Micheline) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    write_expr(&mut writer, expr)?;
    Ok(writer.into_bytes())
}

/// Writes an expression to the writer.
pub fn write_expr(writer: &mut Writer, expr: &Micheline) -> Result<(), EncodeError> {
    write_node(writer, expr, 0)
}

fn write_node(writer: &mut Writer, expr: &Micheline, depth: usize) -> Result<(), EncodeError> {
    if depth > MAX_EXPR_DEPTH {
        return Err(EncodeError::DepthExceeded {
            max: MAX_EXPR_DEPTH,
        });
    }
    match expr {
        Micheline::Int(value) => {
            writer.write_byte(tag::INT);
            zarith::write_int(writer, value);
        }
        Micheline::String(s) => {
            if s.len() > MAX_STRING_LEN {
                return Err(EncodeError::LengthExceedsLimit {
                    field: "string",
                    len: s.len(),
                    max: MAX_STRING_LEN,
                });
            }
            writer.write_byte(tag::STRING);
            writer.write_string(s);
        }
        Micheline::Bytes(bytes) => {
            if bytes.len() > MAX_BYTES_LEN {
                return Err(EncodeError::LengthExceedsLimit {
                    field: "bytes",
                    len: bytes.len(),
                    max: MAX_BYTES_LEN,
                });
            }
            writer.write_byte(tag::BYTES);
            writer.write_bytes_prefixed(bytes);
        }
        Micheline::Seq(items) => {
            writer.write_byte(tag::SEQ);
            writer.write_section(|inner| {
                for item in items {
                    write_node(inner, item, depth + 1)?;
                }
                Ok(())
            })?;
        }
        Micheline::App(app) => write_app(writer, app, depth)?,
    }
    Ok(())
}

fn write_app(writer: &mut Writer, app: &App, depth: usize) -> Result<(), EncodeError> {
    let code = prim::tag_for_name(&app.prim).ok_or_else(|| EncodeError::UnknownPrimitive {
        name: app.prim.clone(),
    })?;
    let has_annots = !app.annots.is_empty();

    // Minimal tag for the actual shape; the generic tag only for 3+ args.
    let node_tag = match (app.args.len(), has_annots) {
        (0, false) => tag::PRIM_0,
        (0, true) => tag::PRIM_0_ANNOTS,
        (1, false) => tag::PRIM_1,
        (1, true) => tag::PRIM_1_ANNOTS,
        (2, false) => tag::PRIM_2,
        (2, true) => tag::PRIM_2_ANNOTS,
        _ => tag::PRIM_GENERIC,
    };

    writer.write_byte(node_tag);
    writer.write_byte(code);

    if node_tag == tag::PRIM_GENERIC {
        writer.write_section(|inner| {
            for arg in &app.args {
                write_node(inner, arg, depth + 1)?;
            }
            Ok(())
        })?;
        // The generic shape always carries an annotation section.
        writer.write_string(&app.annots.join(" "));
    } else {
        for arg in &app.args {
            write_node(writer, arg, depth + 1)?;
        }
        if has_annots {
            writer.write_string(&app.annots.join(" "));
        }
    }
    Ok(())
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an expression from a complete byte slice.
///
/// Trailing bytes after the expression are an error.
pub fn decode_expr(bytes: &[u8]) -> Result<Micheline, DecodeError> {
    let mut reader = Reader::new(bytes);
    let expr = read_expr(&mut reader)?;
    reader.expect_end("expression")?;
    Ok(expr)
}

/// Reads one expression from the reader.
pub fn read_expr(reader: &mut Reader<'_>) -> Result<Micheline, DecodeError> {
    read_node(reader, 0)
}

fn read_node(reader: &mut Reader<'_>, depth: usize) -> Result<Micheline, DecodeError> {
    if depth > MAX_EXPR_DEPTH {
        return Err(DecodeError::DepthExceeded {
            max: MAX_EXPR_DEPTH,
        });
    }
    let node_tag = reader.read_byte("expression tag")?;
    match node_tag {
        tag::INT => {
            let value = zarith::read_int(reader, "int literal")?;
            Ok(Micheline::Int(value))
        }
        tag::STRING => {
            let s = reader.read_string(MAX_STRING_LEN, "string literal")?;
            Micheline::string(s)
        }
        tag::BYTES => {
            let bytes = reader.read_bytes_prefixed(MAX_BYTES_LEN, "bytes literal")?;
            Ok(Micheline::Bytes(bytes))
        }
        tag::SEQ => {
            let mut section = reader.read_section(MAX_SECTION_LEN, "sequence")?;
            let mut items = Vec::new();
            while !section.is_empty() {
                items.push(read_node(&mut section, depth + 1)?);
            }
            Ok(Micheline::Seq(items))
        }
        tag::PRIM_0 => read_app(reader, depth, 0, false),
        tag::PRIM_0_ANNOTS => read_app(reader, depth, 0, true),
        tag::PRIM_1 => read_app(reader, depth, 1, false),
        tag::PRIM_1_ANNOTS => read_app(reader, depth, 1, true),
        tag::PRIM_2 => read_app(reader, depth, 2, false),
        tag::PRIM_2_ANNOTS => read_app(reader, depth, 2, true),
        tag::PRIM_GENERIC => {
            let name = read_prim_code(reader)?;
            let mut section = reader.read_section(MAX_SECTION_LEN, "prim arguments")?;
            let mut args = Vec::new();
            while !section.is_empty() {
                args.push(read_node(&mut section, depth + 1)?);
            }
            let annots = read_annots(reader)?;
            Micheline::app(name, args, annots)
        }
        other => Err(DecodeError::InvalidTag { tag: other }),
    }
}

fn read_app(
    reader: &mut Reader<'_>,
    depth: usize,
    argc: usize,
    has_annots: bool,
) -> Result<Micheline, DecodeError> {
    let name = read_prim_code(reader)?;
    let mut args = Vec::with_capacity(argc);
    for _ in 0..argc {
        args.push(read_node(reader, depth + 1)?);
    }
    let annots = if has_annots {
        read_annots(reader)?
    } else {
        Vec::new()
    };
    Micheline::app(name, args, annots)
}

fn read_prim_code(reader: &mut Reader<'_>) -> Result<&'static str, DecodeError> {
    let code = reader.read_byte("prim code")?;
    prim::name_for_tag(code).ok_or(DecodeError::InvalidPrimCode { code })
}

fn read_annots(reader: &mut Reader<'_>) -> Result<Vec<String>, DecodeError> {
    let joined = reader.read_string(MAX_STRING_LEN, "annotations")?;
    Ok(joined.split_whitespace().map(str::to_string).collect())
}

/// Convenience: encode a literal integer value.
pub fn encode_int_literal(value: impl Into<BigInt>) -> Vec<u8> {
    // Int literals cannot exceed depth or length limits.
    encode_expr(&Micheline::Int(value.into())).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(expr: &Micheline) -> Micheline {
        let bytes = encode_expr(expr).unwrap();
        decode_expr(&bytes).unwrap()
    }

    #[test]
    fn test_int_literal_encoding() {
        // Int(10) is tag 0x00 followed by zarith 0x0a.
        assert_eq!(encode_int_literal(10), vec![0x00, 0x0a]);
        assert_eq!(encode_int_literal(-10), vec![0x00, 0x4a]);
    }

    #[test]
    fn test_string_encoding() {
        let bytes = encode_expr(&Micheline::string("abc").unwrap()).unwrap();
        assert_eq!(bytes, vec![0x01, 0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn test_bytes_encoding() {
        let bytes = encode_expr(&Micheline::bytes(vec![0x0a])).unwrap();
        assert_eq!(bytes, vec![0x0a, 0, 0, 0, 1, 0x0a]);
    }

    #[test]
    fn test_canonical_tag_selection() {
        let unit = Micheline::prim("Unit", vec![]).unwrap();
        let annotated = Micheline::app("Unit", vec![], vec!["%u".to_string()]).unwrap();
        let some = Micheline::prim("Some", vec![Micheline::int(1)]).unwrap();
        let pair2 = Micheline::prim("Pair", vec![Micheline::int(1), Micheline::int(2)]).unwrap();
        let pair2_annots = Micheline::app(
            "Pair",
            vec![Micheline::int(1), Micheline::int(2)],
            vec![":t".to_string()],
        )
        .unwrap();
        let pair3 = Micheline::prim(
            "Pair",
            vec![Micheline::int(1), Micheline::int(2), Micheline::int(3)],
        )
        .unwrap();

        // First encoded byte is the minimal shape tag, never the generic
        // fallback when a specific tag applies.
        assert_eq!(encode_expr(&unit).unwrap()[0], 0x03);
        assert_eq!(encode_expr(&annotated).unwrap()[0], 0x04);
        assert_eq!(encode_expr(&some).unwrap()[0], 0x05);
        assert_eq!(encode_expr(&pair2).unwrap()[0], 0x07);
        assert_eq!(encode_expr(&pair2_annots).unwrap()[0], 0x08);
        assert_eq!(encode_expr(&pair3).unwrap()[0], 0x09);
    }

    #[test]
    fn test_prim0_encoding() {
        // Unit is prim code 0x0b.
        let bytes = encode_expr(&Micheline::prim("Unit", vec![]).unwrap()).unwrap();
        assert_eq!(bytes, vec![0x03, 0x0b]);
    }

    #[test]
    fn test_annotations_roundtrip() {
        let e = Micheline::app(
            "pair",
            vec![
                Micheline::prim("int", vec![]).unwrap(),
                Micheline::prim("nat", vec![]).unwrap(),
            ],
            vec![":point".to_string(), "%x".to_string()],
        )
        .unwrap();
        assert_eq!(roundtrip(&e), e);
    }

    #[test]
    fn test_sequence_roundtrip() {
        let e = Micheline::seq(vec![
            Micheline::int(1),
            Micheline::string("two").unwrap(),
            Micheline::bytes(vec![3]),
            Micheline::seq(vec![]),
        ]);
        assert_eq!(roundtrip(&e), e);
    }

    #[test]
    fn test_generic_prim_roundtrip() {
        let e = Micheline::app(
            "Pair",
            vec![
                Micheline::int(1),
                Micheline::int(2),
                Micheline::int(3),
                Micheline::int(4),
            ],
            vec!["%deep".to_string()],
        )
        .unwrap();
        assert_eq!(roundtrip(&e), e);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(matches!(
            decode_expr(&[0x0b]),
            Err(DecodeError::InvalidTag { tag: 0x0b })
        ));
    }

    #[test]
    fn test_unknown_prim_code_rejected() {
        // Prim0 with a code past the table end.
        assert!(matches!(
            decode_expr(&[0x03, 0xfe]),
            Err(DecodeError::InvalidPrimCode { code: 0xfe })
        ));
    }

    #[test]
    fn test_truncated_string_rejected() {
        // Declared length 10, only 2 bytes present.
        let bytes = [0x01, 0, 0, 0, 10, b'a', b'b'];
        assert!(matches!(
            decode_expr(&bytes),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_int_literal(1);
        bytes.push(0x00);
        assert!(matches!(
            decode_expr(&bytes),
            Err(DecodeError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        // Deeply nested Some applications beyond the decoder cap.
        let mut bytes = Vec::new();
        for _ in 0..(MAX_EXPR_DEPTH + 2) {
            bytes.push(0x05); // Prim1
            bytes.push(0x09); // Some
        }
        bytes.extend_from_slice(&[0x00, 0x00]); // Int(0)
        assert!(matches!(
            decode_expr(&bytes),
            Err(DecodeError::DepthExceeded { .. })
        ));
    }

    // Proptest generator for grammar-valid Micheline trees.
    fn arb_micheline() -> impl Strategy<Value = Micheline> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(Micheline::int),
            "[ -~]{0,24}".prop_map(|s| Micheline::string(s).unwrap()),
            proptest::collection::vec(any::<u8>(), 0..24).prop_map(Micheline::bytes),
            prop_oneof![Just("Unit"), Just("True"), Just("None"), Just("unit")]
                .prop_map(|p| Micheline::prim(p, vec![]).unwrap()),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Micheline::seq),
                (proptest::collection::vec(inner.clone(), 1..2))
                    .prop_map(|args| Micheline::prim("Some", args).unwrap()),
                (proptest::collection::vec(inner.clone(), 2..5)).prop_map(|args| {
                    Micheline::app("Pair", args, vec!["%f".to_string()]).unwrap()
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_expr_roundtrip(expr in arb_micheline()) {
            prop_assert_eq!(roundtrip(&expr), expr);
        }
    }
}
