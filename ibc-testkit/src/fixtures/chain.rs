//! A deterministic Ostracon chain whose validators sign with known keys.

use core::fmt::{Debug, Formatter};

use ed25519_consensus::SigningKey;
use ibc_client_ostracon::types::{
    precommit_sign_bytes, ConsensusState, Header, ValidatorSet, VoterSet,
};
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;
use tendermint::block::header::Version;
use tendermint::block::parts::Header as PartSetHeader;
use tendermint::block::signed_header::SignedHeader;
use tendermint::block::{self, Commit, CommitSig};
use tendermint::crypto::default::Sha256;
use tendermint::{account, chain, validator, vote, AppHash, Hash, PublicKey, Signature, Time};
use typed_builder::TypedBuilder;

/// A validator of the test chain along with its signing key.
#[derive(Clone)]
pub struct TestValidator {
    key: SigningKey,
    info: validator::Info,
}

impl TestValidator {
    /// The key is derived from `seed`, so equal seeds give equal validators.
    pub fn new(seed: u8, power: u32) -> Self {
        let key = SigningKey::from([seed; 32]);
        let pub_key = PublicKey::from_raw_ed25519(key.verification_key().as_bytes())
            .expect("Never fails");
        Self {
            key,
            info: validator::Info::new(pub_key, vote::Power::from(power)),
        }
    }

    pub fn address(&self) -> account::Id {
        self.info.address
    }

    pub fn info(&self) -> &validator::Info {
        &self.info
    }

    /// A precommit for `commit`'s block, cast at `timestamp`.
    pub fn sign_commit(&self, chain_id: &chain::Id, commit: &Commit, timestamp: Time) -> CommitSig {
        let sign_bytes = precommit_sign_bytes(
            chain_id,
            commit.height,
            commit.round,
            &commit.block_id,
            timestamp,
        );
        let signature = self.key.sign(&sign_bytes);

        CommitSig::BlockIdFlagCommit {
            validator_address: self.address(),
            timestamp,
            signature: Some(
                Signature::try_from(signature.to_bytes().as_slice()).expect("Never fails"),
            ),
        }
    }
}

impl Debug for TestValidator {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestValidator")
            .field("address", &self.info.address)
            .field("power", &self.info.power.value())
            .finish()
    }
}

/// The block to produce.
#[derive(TypedBuilder, Clone, Debug)]
pub struct BlockParams {
    pub height: u64,
    pub time: Time,
    /// Root of the application state committed by the block.
    #[builder(default = b"app-hash".to_vec())]
    pub app_hash: Vec<u8>,
    /// Indices into the chain's validators of the voters that sign the
    /// block; every voter signs when unset.
    #[builder(default, setter(strip_option))]
    pub signers: Option<Vec<usize>>,
}

/// A chain with a fixed validator set, out of which `voters` are elected to
/// sign every block.
#[derive(TypedBuilder, Clone, Debug)]
pub struct OstraconChain {
    #[builder(default = "ostracon-0".parse::<chain::Id>().expect("Never fails"))]
    pub chain_id: chain::Id,
    pub validators: Vec<TestValidator>,
    /// Indices into `validators`; all validators vote when unset.
    #[builder(default, setter(strip_option))]
    pub voters: Option<Vec<usize>>,
}

impl OstraconChain {
    /// A chain of `powers.len()` validators with the given voting powers.
    pub fn with_powers(powers: &[u32]) -> Self {
        let validators = powers
            .iter()
            .enumerate()
            .map(|(i, power)| TestValidator::new(i as u8 + 1, *power))
            .collect();
        Self::builder().validators(validators).build()
    }

    pub fn validator_set(&self) -> ValidatorSet {
        ValidatorSet::new(self.validators.iter().map(|v| v.info.clone()).collect())
            .expect("Never fails")
    }

    pub fn voter_set(&self) -> VoterSet {
        let voters = match &self.voters {
            Some(indices) => indices
                .iter()
                .map(|i| self.validators[*i].info.clone())
                .collect(),
            None => self.validators.iter().map(|v| v.info.clone()).collect(),
        };
        VoterSet::new(voters).expect("Never fails")
    }

    /// A block signed by the voters picked in `params`.
    ///
    /// The commit's signature slots follow the voter set's order; voters
    /// that do not sign are recorded as absent.
    pub fn signed_header(&self, params: &BlockParams) -> SignedHeader {
        let validator_set = self.validator_set();
        let voter_set = self.voter_set();

        let header = block::Header {
            version: Version { block: 11, app: 0 },
            chain_id: self.chain_id.clone(),
            height: block::Height::try_from(params.height).expect("Never fails"),
            time: params.time,
            last_block_id: None,
            last_commit_hash: None,
            data_hash: None,
            validators_hash: validator_set.hash(),
            next_validators_hash: validator_set.hash(),
            consensus_hash: Hash::Sha256([0x01; 32]),
            app_hash: AppHash::try_from(params.app_hash.clone()).expect("Never fails"),
            last_results_hash: None,
            evidence_hash: None,
            proposer_address: voter_set.validators()[0].address,
        };

        let mut commit = Commit {
            height: header.height,
            round: block::Round::default(),
            block_id: block::Id {
                hash: header.hash_with::<Sha256>(),
                part_set_header: PartSetHeader::new(1, Hash::Sha256([0xCD; 32]))
                    .expect("Never fails"),
            },
            signatures: Vec::new(),
        };

        let signers: Vec<&TestValidator> = match &params.signers {
            Some(indices) => indices.iter().map(|i| &self.validators[*i]).collect(),
            None => self.validators.iter().collect(),
        };
        let signatures = voter_set
            .validators()
            .iter()
            .map(|voter| {
                signers
                    .iter()
                    .find(|signer| signer.address() == voter.address)
                    .map_or(CommitSig::BlockIdFlagAbsent, |signer| {
                        signer.sign_commit(&self.chain_id, &commit, params.time)
                    })
            })
            .collect();
        commit.signatures = signatures;

        SignedHeader::new(header, commit).expect("Never fails")
    }

    /// A header building on the client's consensus state at
    /// `trusted_height`, assuming the validator set did not change since.
    pub fn header(&self, params: &BlockParams, trusted_height: Height) -> Header {
        Header {
            signed_header: self.signed_header(params),
            validator_set: self.validator_set(),
            voter_set: self.voter_set(),
            trusted_height,
            trusted_validators: self.validator_set(),
            trusted_voters: self.voter_set(),
        }
    }

    /// The consensus state a client trusts after verifying the block
    /// described by `params`.
    pub fn consensus_state(&self, params: &BlockParams) -> ConsensusState {
        ConsensusState::from(self.signed_header(params).header)
    }

    pub fn height(&self, revision_height: u64) -> Height {
        Height::new(
            ChainId::revision_number_of(self.chain_id.as_str()),
            revision_height,
        )
    }
}
