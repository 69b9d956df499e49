//! Fixed-length chain hashes: blocks, operations, chain ids.

use std::fmt;

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::tagged::base58;

const PREFIX_BLOCK: &[u8] = &[1, 52];
const PREFIX_OPERATION: &[u8] = &[5, 116];
const PREFIX_CHAIN_ID: &[u8] = &[87, 82, 0];

/// A 32-byte block hash (B...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    pub fn to_base58(&self) -> String {
        base58::encode(PREFIX_BLOCK, &self.0)
    }

    pub fn from_base58(text: &str) -> Result<BlockHash, DecodeError> {
        let payload = base58::decode(PREFIX_BLOCK, 32, text, "block hash")?;
        // decode guarantees a 32-byte payload
        Ok(BlockHash(payload.try_into().unwrap()))
    }

    pub fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    pub fn read(reader: &mut Reader<'_>) -> Result<BlockHash, DecodeError> {
        Ok(BlockHash(reader.read_array::<32>("block hash")?))
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A 32-byte operation hash (o...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationHash(pub [u8; 32]);

impl OperationHash {
    pub fn to_base58(&self) -> String {
        base58::encode(PREFIX_OPERATION, &self.0)
    }

    pub fn from_base58(text: &str) -> Result<OperationHash, DecodeError> {
        let payload = base58::decode(PREFIX_OPERATION, 32, text, "operation hash")?;
        Ok(OperationHash(payload.try_into().unwrap()))
    }
}

impl fmt::Display for OperationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A 4-byte chain identifier (Net...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub [u8; 4]);

impl ChainId {
    pub fn to_base58(&self) -> String {
        base58::encode(PREFIX_CHAIN_ID, &self.0)
    }

    pub fn from_base58(text: &str) -> Result<ChainId, DecodeError> {
        let payload = base58::decode(PREFIX_CHAIN_ID, 4, text, "chain id")?;
        Ok(ChainId(payload.try_into().unwrap()))
    }

    pub fn write(&self, writer: &mut Writer) {
        writer.write_bytes(&self.0);
    }

    pub fn read(reader: &mut Reader<'_>) -> Result<ChainId, DecodeError> {
        Ok(ChainId(reader.read_array::<4>("chain id")?))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
