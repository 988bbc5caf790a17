//! Validator and voter sets, their hash, and commit verification.

use alloc::collections::BTreeSet;
use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::prelude::*;
use ibc_primitives::utils::PrettySlice;
use ibc_proto::Protobuf;
use tendermint::block::{self, Commit};
use tendermint::crypto::signature::Verifier;
use tendermint::crypto::Sha256;
use tendermint::merkle::{simple_hash_from_byte_vectors, MerkleHash};
use tendermint::{account, chain, validator, Hash};
use tendermint_proto::types::ValidatorSet as RawValidatorSet;

use crate::error::OstraconClientError;
use crate::trust_threshold::TrustThreshold;
use crate::vote::{precommit_sign_bytes, CommitVote};

/// Upper bound on a set's total voting power, leaving headroom for the
/// priority arithmetic of the consensus engine.
pub const MAX_TOTAL_VOTING_POWER: u64 = (i64::MAX / 8) as u64;

/// A set of validators in canonical order: voting power descending, then
/// address ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorSet {
    validators: Vec<validator::Info>,
    total_voting_power: u64,
}

/// The subset of a validator set elected to sign a block. It shares the
/// validator set's model and verification rules.
pub type VoterSet = ValidatorSet;

impl ValidatorSet {
    /// Builds a set from members in any order.
    ///
    /// Rejects members with zero power, repeated addresses and total power
    /// above [`MAX_TOTAL_VOTING_POWER`]. An empty set is allowed; it is the
    /// form of the trusted sets of a header submitted at client creation.
    pub fn new(mut validators: Vec<validator::Info>) -> Result<Self, OstraconClientError> {
        let mut addresses = BTreeSet::new();
        let mut total_voting_power: u64 = 0;

        for validator in &validators {
            if !addresses.insert(validator.address) {
                return Err(OstraconClientError::InvalidValidatorSet {
                    description: format!("duplicate validator {}", validator.address),
                });
            }
            if validator.power.value() == 0 {
                return Err(OstraconClientError::InvalidValidatorSet {
                    description: format!("validator {} has no voting power", validator.address),
                });
            }
            total_voting_power = total_voting_power
                .checked_add(validator.power.value())
                .filter(|total| *total <= MAX_TOTAL_VOTING_POWER)
                .ok_or_else(|| OstraconClientError::InvalidValidatorSet {
                    description: format!(
                        "total voting power exceeds the maximum of {MAX_TOTAL_VOTING_POWER}"
                    ),
                })?;
        }

        validators.sort_by(|a, b| {
            b.power
                .cmp(&a.power)
                .then_with(|| a.address.cmp(&b.address))
        });

        Ok(Self {
            validators,
            total_voting_power,
        })
    }

    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
            total_voting_power: 0,
        }
    }

    pub fn validators(&self) -> &[validator::Info] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn total_voting_power(&self) -> u64 {
        self.total_voting_power
    }

    pub fn validator(&self, address: account::Id) -> Option<&validator::Info> {
        self.validators.iter().find(|v| v.address == address)
    }

    /// Whether `validator` is a member with the same public key and power.
    pub fn contains(&self, validator: &validator::Info) -> bool {
        self.validator(validator.address)
            .is_some_and(|v| v.pub_key == validator.pub_key && v.power == validator.power)
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.validators.iter().all(|v| other.contains(v))
    }

    /// Merkle hash of the members' `SimpleValidator` encodings in canonical
    /// order. This is the value a block header commits to.
    pub fn hash_with<H: MerkleHash + Sha256 + Default>(&self) -> Hash {
        let leaves: Vec<Vec<u8>> = self
            .validators
            .iter()
            .map(validator::Info::hash_bytes)
            .collect();
        Hash::Sha256(simple_hash_from_byte_vectors::<H>(&leaves))
    }

    pub fn hash(&self) -> Hash {
        self.hash_with::<tendermint::crypto::default::Sha256>()
    }

    /// Verifies that more than `trust_level` of this set's power signed
    /// `block_id` at `height`.
    ///
    /// The commit must have been produced by this very set: its signature
    /// slots are index-aligned with the members.
    pub fn verify_commit_light<V: Verifier>(
        &self,
        chain_id: &chain::Id,
        block_id: &block::Id,
        height: block::Height,
        commit: &Commit,
        trust_level: TrustThreshold,
    ) -> Result<(), OstraconClientError> {
        self.verify_voter_commit_light::<V>(self, chain_id, block_id, height, commit, trust_level)
    }

    /// Verifies that the members of `voters` who signed `block_id` at
    /// `height` hold more than `trust_level` of this set's power.
    ///
    /// `voters` must have been elected from this set, and the commit's
    /// signature slots are index-aligned with them. Only this set is bound
    /// by a block header, so its total power is the one the signatures are
    /// weighed against.
    pub fn verify_voter_commit_light<V: Verifier>(
        &self,
        voters: &VoterSet,
        chain_id: &chain::Id,
        block_id: &block::Id,
        height: block::Height,
        commit: &Commit,
        trust_level: TrustThreshold,
    ) -> Result<(), OstraconClientError> {
        self.check_voters(voters)?;

        if commit.signatures.len() != voters.len() {
            return Err(OstraconClientError::InvalidCommit {
                description: format!(
                    "commit has {} signatures for a set of {} voters",
                    commit.signatures.len(),
                    voters.len()
                ),
            });
        }
        if commit.height != height {
            return Err(OstraconClientError::InvalidCommit {
                description: format!("commit height {} is not {height}", commit.height),
            });
        }
        if &commit.block_id != block_id {
            return Err(OstraconClientError::InvalidCommit {
                description: format!("commit is for block {}, not {block_id}", commit.block_id),
            });
        }

        let mut signed: u64 = 0;
        for (voter, commit_sig) in voters.validators.iter().zip(&commit.signatures) {
            let Some(vote) = CommitVote::from_commit_sig(commit_sig)? else {
                continue;
            };
            if vote.validator_address != voter.address {
                return Err(OstraconClientError::InvalidCommit {
                    description: format!(
                        "signature slot of {} holds a vote of {}",
                        voter.address, vote.validator_address
                    ),
                });
            }

            verify_vote::<V>(voter, chain_id, commit, &vote)?;

            signed += voter.power.value();
            if trust_level.is_exceeded_by(signed, self.total_voting_power) {
                return Ok(());
            }
        }

        Err(OstraconClientError::NotEnoughVotingPower {
            signed,
            total: self.total_voting_power,
            threshold: trust_level,
        })
    }

    /// Verifies that more than `trust_level` of this set's power signed the
    /// commit, where this set is a trusted, possibly outdated one.
    ///
    /// Signature slots are matched by address; votes of validators outside
    /// this set are ignored.
    pub fn verify_commit_light_trusting<V: Verifier>(
        &self,
        chain_id: &chain::Id,
        commit: &Commit,
        trust_level: TrustThreshold,
    ) -> Result<(), OstraconClientError> {
        self.verify_voter_commit_light_trusting::<V>(self, chain_id, commit, trust_level)
    }

    /// Like [`Self::verify_commit_light_trusting`], counting only the votes
    /// of `voters`, who must have been elected from this set.
    pub fn verify_voter_commit_light_trusting<V: Verifier>(
        &self,
        voters: &VoterSet,
        chain_id: &chain::Id,
        commit: &Commit,
        trust_level: TrustThreshold,
    ) -> Result<(), OstraconClientError> {
        self.check_voters(voters)?;

        let mut seen = BTreeSet::new();
        let mut signed: u64 = 0;

        for commit_sig in &commit.signatures {
            let Some(vote) = CommitVote::from_commit_sig(commit_sig)? else {
                continue;
            };
            let Some(voter) = voters.validator(vote.validator_address) else {
                continue;
            };
            if !seen.insert(vote.validator_address) {
                return Err(OstraconClientError::InvalidCommit {
                    description: format!("double vote from {}", vote.validator_address),
                });
            }

            verify_vote::<V>(voter, chain_id, commit, &vote)?;

            signed += voter.power.value();
            if trust_level.is_exceeded_by(signed, self.total_voting_power) {
                return Ok(());
            }
        }

        Err(OstraconClientError::NotEnoughVotingPower {
            signed,
            total: self.total_voting_power,
            threshold: trust_level,
        })
    }

    fn check_voters(&self, voters: &VoterSet) -> Result<(), OstraconClientError> {
        if voters.is_empty() {
            return Err(OstraconClientError::InvalidVoterSet {
                description: "voter set is empty".to_string(),
            });
        }
        if !voters.is_subset_of(self) {
            return Err(OstraconClientError::InvalidVoterSet {
                description: "voters are not members of the validator set".to_string(),
            });
        }
        Ok(())
    }
}

fn verify_vote<V: Verifier>(
    validator: &validator::Info,
    chain_id: &chain::Id,
    commit: &Commit,
    vote: &CommitVote<'_>,
) -> Result<(), OstraconClientError> {
    let sign_bytes = precommit_sign_bytes(
        chain_id,
        commit.height,
        commit.round,
        &commit.block_id,
        vote.timestamp,
    );
    validator
        .verify_signature::<V>(&sign_bytes, vote.signature)
        .map_err(|_| OstraconClientError::InvalidCommitSignature {
            validator: validator.address,
        })
}

impl Display for ValidatorSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        let addresses: Vec<_> = self.validators.iter().map(|v| v.address).collect();
        write!(
            f,
            "ValidatorSet {{ validators: {}, total_voting_power: {} }}",
            PrettySlice(&addresses),
            self.total_voting_power
        )
    }
}

impl Protobuf<RawValidatorSet> for ValidatorSet {}

impl TryFrom<RawValidatorSet> for ValidatorSet {
    type Error = OstraconClientError;

    fn try_from(raw: RawValidatorSet) -> Result<Self, Self::Error> {
        let validators = raw
            .validators
            .into_iter()
            .map(validator::Info::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| OstraconClientError::invalid_raw(format!("invalid validator: {e}")))?;
        Self::new(validators)
    }
}

impl From<ValidatorSet> for RawValidatorSet {
    fn from(value: ValidatorSet) -> Self {
        Self {
            // Bounded by `MAX_TOTAL_VOTING_POWER`.
            total_voting_power: i64::try_from(value.total_voting_power).unwrap_or(i64::MAX),
            validators: value.validators.into_iter().map(Into::into).collect(),
            proposer: None,
        }
    }
}
