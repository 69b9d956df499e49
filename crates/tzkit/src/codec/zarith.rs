//! Arbitrary-precision zarith integer codec.
//!
//! Naturals are encoded as little-endian 7-bit groups with a continuation
//! high bit. Signed integers reserve bit 6 of the first byte for the sign,
//! leaving 6 payload bits there and 7 in every later byte.

use num_bigint::{BigInt, BigUint, Sign};

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::MAX_ZARITH_BYTES;

// =============================================================================
// NATURALS
// =============================================================================

/// Writes an unsigned zarith integer.
pub fn write_nat(writer: &mut Writer, value: &BigUint) {
    // to_radix_le(128) yields exactly the 7-bit payload groups, and [0]
    // for zero, so the single-0x00 zero encoding falls out for free.
    let mut digits = value.to_radix_le(128);
    let last = digits.len() - 1;
    for digit in &mut digits[..last] {
        *digit |= 0x80;
    }
    writer.write_bytes(&digits);
}

/// Reads an unsigned zarith integer.
pub fn read_nat(reader: &mut Reader<'_>, context: &'static str) -> Result<BigUint, DecodeError> {
    let mut digits: Vec<u8> = Vec::new();
    loop {
        if digits.len() >= MAX_ZARITH_BYTES {
            return Err(DecodeError::ZarithTooLong {
                max: MAX_ZARITH_BYTES,
            });
        }
        let byte = reader.read_byte(context)?;
        digits.push(byte & 0x7f);
        if byte & 0x80 == 0 {
            break;
        }
    }
    // Digits are valid base-128 little-endian by construction.
    Ok(BigUint::from_radix_le(&digits, 128).unwrap())
}

/// Writes a u64 as an unsigned zarith integer.
pub fn write_nat_u64(writer: &mut Writer, value: u64) {
    write_nat(writer, &BigUint::from(value));
}

/// Encodes an unsigned zarith integer to a fresh byte vector.
pub fn encode_nat(value: &BigUint) -> Vec<u8> {
    let mut writer = Writer::new();
    write_nat(&mut writer, value);
    writer.into_bytes()
}

// =============================================================================
// SIGNED INTEGERS
// =============================================================================

/// Writes a signed zarith integer.
pub fn write_int(writer: &mut Writer, value: &BigInt) {
    let negative = value.sign() == Sign::Minus;
    let magnitude = value.magnitude();

    let low6 = (magnitude % 64u8)
        .to_radix_le(128)
        .first()
        .copied()
        .unwrap_or(0);
    let rest = magnitude >> 6u8;

    let mut first = low6;
    if negative {
        first |= 0x40;
    }
    if rest != BigUint::ZERO {
        first |= 0x80;
        writer.write_byte(first);
        write_nat(writer, &rest);
    } else {
        writer.write_byte(first);
    }
}

/// Reads a signed zarith integer.
///
/// Fails with `UnexpectedEof` on empty input.
pub fn read_int(reader: &mut Reader<'_>, context: &'static str) -> Result<BigInt, DecodeError> {
    let first = reader.read_byte(context)?;
    let negative = first & 0x40 != 0;
    let low6 = BigUint::from(first & 0x3f);

    let magnitude = if first & 0x80 != 0 {
        let rest = read_nat(reader, context)?;
        (rest << 6u8) | low6
    } else {
        low6
    };

    let sign = if negative && magnitude != BigUint::ZERO {
        Sign::Minus
    } else if magnitude == BigUint::ZERO {
        Sign::NoSign
    } else {
        Sign::Plus
    };
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Encodes a signed zarith integer to a fresh byte vector.
pub fn encode_int(value: &BigInt) -> Vec<u8> {
    let mut writer = Writer::new();
    write_int(&mut writer, value);
    writer.into_bytes()
}
