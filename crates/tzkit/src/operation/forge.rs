//! Canonical binary serialization of operations ("forging").
//!
//! The forged form is branch bytes, then each content as its tag byte
//! followed by field encodings, then the raw signature bytes when
//! present. Forging is a pure function of the value; identical logical
//! content always yields identical bytes.

use crate::codec::expr::write_expr;
use crate::codec::primitives::Writer;
use crate::codec::zarith::write_nat_u64;
use crate::error::EncodeError;
use crate::micheline::Micheline;
use crate::operation::{Content, Entrypoint, ManagerFields, Operation, Parameters, Script};
use crate::tagged::PublicKeyHash;

const ENTRYPOINT_NAMED: u8 = 0xff;
const MAX_ENTRYPOINT_LEN: usize = 255;

/// Forges an operation to its canonical bytes.
pub fn forge(operation: &Operation) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(128);
    operation.branch.write(&mut writer);
    for content in &operation.contents {
        write_content(&mut writer, content)?;
    }
    if let Some(signature) = &operation.signature {
        signature.write(&mut writer);
    }
    Ok(writer.into_bytes())
}

/// Forges only the unsigned portion (branch + contents), ignoring any
/// attached signature. This is the byte string the signing protocol
/// hashes over.
pub fn forge_unsigned(operation: &Operation) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(128);
    operation.branch.write(&mut writer);
    for content in &operation.contents {
        write_content(&mut writer, content)?;
    }
    Ok(writer.into_bytes())
}

fn write_content(writer: &mut Writer, content: &Content) -> Result<(), EncodeError> {
    writer.write_byte(content.tag());
    match content {
        Content::SeedNonceRevelation { level, nonce } => {
            writer.write_i32(*level);
            writer.write_bytes(nonce);
            Ok(())
        }
        Content::Proposals {
            source,
            period,
            proposals,
        } => {
            source.write(writer);
            writer.write_i32(*period);
            writer.write_section(|inner| {
                for proposal in proposals {
                    inner.write_bytes(proposal);
                }
                Ok(())
            })
        }
        Content::Ballot {
            source,
            period,
            proposal,
            ballot,
        } => {
            source.write(writer);
            writer.write_i32(*period);
            writer.write_bytes(proposal);
            writer.write_byte(ballot.tag());
            Ok(())
        }
        Content::Endorsement {
            slot,
            level,
            round,
            block_payload_hash,
        } => {
            writer.write_u16(*slot);
            writer.write_i32(*level);
            writer.write_i32(*round);
            writer.write_bytes(block_payload_hash);
            Ok(())
        }
        Content::Reveal {
            manager,
            public_key,
        } => {
            write_manager(writer, manager);
            public_key.write(writer);
            Ok(())
        }
        Content::Transaction {
            manager,
            amount,
            destination,
            parameters,
        } => {
            write_manager(writer, manager);
            write_nat_u64(writer, *amount);
            destination.write(writer);
            match parameters {
                None => {
                    writer.write_bool(false);
                    Ok(())
                }
                Some(params) => {
                    writer.write_bool(true);
                    write_parameters(writer, params)
                }
            }
        }
        Content::Origination {
            manager,
            balance,
            delegate,
            script,
        } => {
            write_manager(writer, manager);
            write_nat_u64(writer, *balance);
            write_optional_delegate(writer, delegate);
            write_script(writer, script)
        }
        Content::Delegation { manager, delegate } => {
            write_manager(writer, manager);
            write_optional_delegate(writer, delegate);
            Ok(())
        }
        Content::RegisterGlobalConstant { manager, value } => {
            write_manager(writer, manager);
            write_expr_section(writer, value)
        }
        Content::SetDepositsLimit { manager, limit } => {
            write_manager(writer, manager);
            match limit {
                None => writer.write_bool(false),
                Some(limit) => {
                    writer.write_bool(true);
                    write_nat_u64(writer, *limit);
                }
            }
            Ok(())
        }
    }
}

fn write_manager(writer: &mut Writer, manager: &ManagerFields) {
    manager.source.write(writer);
    write_nat_u64(writer, manager.fee);
    write_nat_u64(writer, manager.counter);
    write_nat_u64(writer, manager.gas_limit);
    write_nat_u64(writer, manager.storage_limit);
}

fn write_optional_delegate(writer: &mut Writer, delegate: &Option<PublicKeyHash>) {
    match delegate {
        None => writer.write_bool(false),
        Some(pkh) => {
            writer.write_bool(true);
            pkh.write(writer);
        }
    }
}

fn write_parameters(writer: &mut Writer, params: &Parameters) -> Result<(), EncodeError> {
    write_entrypoint(writer, &params.entrypoint)?;
    write_expr_section(writer, &params.value)
}

fn write_entrypoint(writer: &mut Writer, entrypoint: &Entrypoint) -> Result<(), EncodeError> {
    match entrypoint {
        Entrypoint::Default => writer.write_byte(0),
        Entrypoint::Root => writer.write_byte(1),
        Entrypoint::Do => writer.write_byte(2),
        Entrypoint::SetDelegate => writer.write_byte(3),
        Entrypoint::RemoveDelegate => writer.write_byte(4),
        Entrypoint::Named(name) => {
            if name.len() > MAX_ENTRYPOINT_LEN {
                return Err(EncodeError::EntrypointTooLong { len: name.len() });
            }
            writer.write_byte(ENTRYPOINT_NAMED);
            // Named entrypoints carry a single-byte length prefix.
            writer.write_byte(name.len() as u8);
            writer.write_bytes(name.as_bytes());
        }
    }
    Ok(())
}

fn write_script(writer: &mut Writer, script: &Script) -> Result<(), EncodeError> {
    write_expr_section(writer, &script.code)?;
    write_expr_section(writer, &script.storage)
}

fn write_expr_section(writer: &mut Writer, expr: &Micheline) -> Result<(), EncodeError> {
    writer.write_section(|inner| write_expr(inner, expr))
}
