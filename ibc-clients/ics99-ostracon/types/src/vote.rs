//! Precommit votes carried in a commit, and the bytes their signatures cover.

use ibc_primitives::prelude::*;
use tendermint::block::{self, CommitSig};
use tendermint::chain;
use tendermint::vote::{CanonicalVote, Type as VoteType};
use tendermint::{account, Signature, Time};
use tendermint_proto::v0_38::types::CanonicalVote as RawCanonicalVote;
use tendermint_proto::Protobuf;

use crate::error::OstraconClientError;

/// A commit signature slot that voted for the committed block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitVote<'a> {
    pub validator_address: account::Id,
    pub timestamp: Time,
    pub signature: &'a Signature,
}

impl<'a> CommitVote<'a> {
    /// Returns the vote of a `BlockIdFlagCommit` slot, and `None` for absent
    /// and nil slots, which never count towards a commit's voting power.
    pub fn from_commit_sig(
        commit_sig: &'a CommitSig,
    ) -> Result<Option<Self>, OstraconClientError> {
        match commit_sig {
            CommitSig::BlockIdFlagCommit {
                validator_address,
                timestamp,
                signature,
            } => {
                let signature =
                    signature
                        .as_ref()
                        .ok_or_else(|| OstraconClientError::InvalidCommit {
                            description: format!(
                                "commit signature of validator {validator_address} is missing"
                            ),
                        })?;
                Ok(Some(Self {
                    validator_address: *validator_address,
                    timestamp: *timestamp,
                    signature,
                }))
            }
            CommitSig::BlockIdFlagNil { .. } | CommitSig::BlockIdFlagAbsent => Ok(None),
        }
    }
}

/// Length-delimited `CanonicalVote` a validator signs when precommitting to
/// `block_id` at `height` and `round`.
pub fn precommit_sign_bytes(
    chain_id: &chain::Id,
    height: block::Height,
    round: block::Round,
    block_id: &block::Id,
    timestamp: Time,
) -> Vec<u8> {
    let canonical_vote = CanonicalVote {
        vote_type: VoteType::Precommit,
        height,
        round,
        block_id: Some(*block_id),
        timestamp: Some(timestamp),
        chain_id: chain_id.clone(),
    };

    Protobuf::<RawCanonicalVote>::encode_length_delimited_vec(canonical_vote)
}
