//! Chain operation model.
//!
//! An [`Operation`] is a branch hash, an ordered content list, and an
//! optional signature. Unsigned and signed operations are the same
//! type in two lifecycle states; attaching a signature never changes
//! the forged content bytes.

pub mod forge;

pub use forge::forge;

use crate::micheline::Micheline;
use crate::tagged::{Address, BlockHash, PublicKey, PublicKeyHash, Signature};

/// A chain operation envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub branch: BlockHash,
    pub contents: Vec<Content>,
    pub signature: Option<Signature>,
}

impl Operation {
    /// Creates an unsigned operation.
    pub fn unsigned(branch: BlockHash, contents: Vec<Content>) -> Operation {
        Operation {
            branch,
            contents,
            signature: None,
        }
    }

    /// Returns true once a signature is attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Attaches (or replaces) the signature.
    pub fn with_signature(mut self, signature: Signature) -> Operation {
        self.signature = Some(signature);
        self
    }
}

/// Fee and resource fields shared by every manager content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerFields {
    pub source: PublicKeyHash,
    /// In mutez.
    pub fee: u64,
    pub counter: u64,
    pub gas_limit: u64,
    pub storage_limit: u64,
}

/// A single operation content, tagged on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Tag 1.
    SeedNonceRevelation { level: i32, nonce: [u8; 32] },
    /// Tag 5. Proposal entries are 32-byte protocol hashes.
    Proposals {
        source: PublicKeyHash,
        period: i32,
        proposals: Vec<[u8; 32]>,
    },
    /// Tag 6.
    Ballot {
        source: PublicKeyHash,
        period: i32,
        proposal: [u8; 32],
        ballot: BallotVote,
    },
    /// Tag 21.
    Endorsement {
        slot: u16,
        level: i32,
        round: i32,
        block_payload_hash: [u8; 32],
    },
    /// Tag 107.
    Reveal {
        manager: ManagerFields,
        public_key: PublicKey,
    },
    /// Tag 108.
    Transaction {
        manager: ManagerFields,
        /// In mutez.
        amount: u64,
        destination: Address,
        parameters: Option<Parameters>,
    },
    /// Tag 109.
    Origination {
        manager: ManagerFields,
        /// In mutez.
        balance: u64,
        delegate: Option<PublicKeyHash>,
        script: Script,
    },
    /// Tag 110. `delegate: None` withdraws the delegation.
    Delegation {
        manager: ManagerFields,
        delegate: Option<PublicKeyHash>,
    },
    /// Tag 111.
    RegisterGlobalConstant {
        manager: ManagerFields,
        value: Micheline,
    },
    /// Tag 112. `limit: None` removes the limit.
    SetDepositsLimit {
        manager: ManagerFields,
        limit: Option<u64>,
    },
}

impl Content {
    /// Protocol content tag.
    pub fn tag(&self) -> u8 {
        match self {
            Content::SeedNonceRevelation { .. } => 1,
            Content::Proposals { .. } => 5,
            Content::Ballot { .. } => 6,
            Content::Endorsement { .. } => 21,
            Content::Reveal { .. } => 107,
            Content::Transaction { .. } => 108,
            Content::Origination { .. } => 109,
            Content::Delegation { .. } => 110,
            Content::RegisterGlobalConstant { .. } => 111,
            Content::SetDepositsLimit { .. } => 112,
        }
    }

    /// Manager fields, for the manager-style variants.
    pub fn manager(&self) -> Option<&ManagerFields> {
        match self {
            Content::Reveal { manager, .. }
            | Content::Transaction { manager, .. }
            | Content::Origination { manager, .. }
            | Content::Delegation { manager, .. }
            | Content::RegisterGlobalConstant { manager, .. }
            | Content::SetDepositsLimit { manager, .. } => Some(manager),
            _ => None,
        }
    }
}

/// A ballot vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotVote {
    Yay,
    Nay,
    Pass,
}

impl BallotVote {
    pub fn tag(self) -> u8 {
        match self {
            BallotVote::Yay => 0,
            BallotVote::Nay => 1,
            BallotVote::Pass => 2,
        }
    }
}

/// Transaction call parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub entrypoint: Entrypoint,
    pub value: Micheline,
}

/// A contract entrypoint. The common names have dedicated single-byte
/// tags; anything else is carried as a length-prefixed string under
/// tag 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entrypoint {
    Default,
    Root,
    Do,
    SetDelegate,
    RemoveDelegate,
    Named(String),
}

impl Entrypoint {
    /// Maps a textual entrypoint name to its canonical form.
    pub fn from_name(name: &str) -> Entrypoint {
        match name {
            "default" | "" => Entrypoint::Default,
            "root" => Entrypoint::Root,
            "do" => Entrypoint::Do,
            "set_delegate" => Entrypoint::SetDelegate,
            "remove_delegate" => Entrypoint::RemoveDelegate,
            other => Entrypoint::Named(other.to_string()),
        }
    }

    /// Textual name.
    pub fn name(&self) -> &str {
        match self {
            Entrypoint::Default => "default",
            Entrypoint::Root => "root",
            Entrypoint::Do => "do",
            Entrypoint::SetDelegate => "set_delegate",
            Entrypoint::RemoveDelegate => "remove_delegate",
            Entrypoint::Named(name) => name,
        }
    }
}

/// An origination script: code and initial storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub code: Micheline,
    pub storage: Micheline,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagged::Curve;

    fn manager() -> ManagerFields {
        ManagerFields {
            source: PublicKeyHash::new(Curve::Ed25519, [1u8; 20]),
            fee: 1_000,
            counter: 42,
            gas_limit: 10_000,
            storage_limit: 300,
        }
    }

    #[test]
    fn test_content_tags() {
        let cases: Vec<(Content, u8)> = vec![
            (
                Content::SeedNonceRevelation {
                    level: 1,
                    nonce: [0; 32],
                },
                1,
            ),
            (
                Content::Endorsement {
                    slot: 0,
                    level: 1,
                    round: 0,
                    block_payload_hash: [0; 32],
                },
                21,
            ),
            (
                Content::Delegation {
                    manager: manager(),
                    delegate: None,
                },
                110,
            ),
            (
                Content::SetDepositsLimit {
                    manager: manager(),
                    limit: Some(5),
                },
                112,
            ),
        ];
        for (content, tag) in cases {
            assert_eq!(content.tag(), tag);
        }
    }

    #[test]
    fn test_manager_accessor() {
        let delegation = Content::Delegation {
            manager: manager(),
            delegate: None,
        };
        assert_eq!(delegation.manager().unwrap().counter, 42);

        let endorsement = Content::Endorsement {
            slot: 0,
            level: 1,
            round: 0,
            block_payload_hash: [0; 32],
        };
        assert!(endorsement.manager().is_none());
    }

    #[test]
    fn test_signing_lifecycle() {
        let op = Operation::unsigned(BlockHash([0u8; 32]), vec![]);
        assert!(!op.is_signed());

        let signed = op.with_signature(Signature::Generic([0u8; 64]));
        assert!(signed.is_signed());

        // Re-signing replaces the signature.
        let resigned = signed.with_signature(Signature::Generic([1u8; 64]));
        assert_eq!(resigned.signature, Some(Signature::Generic([1u8; 64])));
    }

    #[test]
    fn test_entrypoint_names() {
        assert_eq!(Entrypoint::from_name("default"), Entrypoint::Default);
        assert_eq!(Entrypoint::from_name(""), Entrypoint::Default);
        assert_eq!(Entrypoint::from_name("do"), Entrypoint::Do);
        assert_eq!(
            Entrypoint::from_name("transfer"),
            Entrypoint::Named("transfer".to_string())
        );
        assert_eq!(Entrypoint::from_name("transfer").name(), "transfer");
    }
}
