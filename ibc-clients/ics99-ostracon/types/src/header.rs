//! Defines the domain type for Ostracon headers

use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_core_client_types::Height;
use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;
use ibc_proto::google::protobuf::Any;
use ibc_proto::Protobuf;
use tendermint::block::signed_header::SignedHeader;
use tendermint::crypto::signature::Verifier;
use tendermint::crypto::Sha256;
use tendermint::merkle::MerkleHash;
use tendermint::{chain, Time};

use crate::consensus_state::ConsensusState;
use crate::error::OstraconClientError;
use crate::proto::v1::Header as RawHeader;
use crate::proto::OSTRACON_HEADER_TYPE_URL;
use crate::trust_threshold::TrustThreshold;
use crate::validator_set::{ValidatorSet, VoterSet};

/// Ostracon consensus header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub signed_header: SignedHeader, // contains the commitment root
    pub validator_set: ValidatorSet, // the validator set that produced the block
    pub voter_set: VoterSet,         // the voters elected from `validator_set`, who signed it
    pub trusted_height: Height, // height of a consensus state the client trusts, at most the header's
    pub trusted_validators: ValidatorSet, // validators trusted at `trusted_height`
    pub trusted_voters: VoterSet,         // voters of `trusted_validators`
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "Header {{ chain_id: {}, height: {}, validator_set: {}, voter_set: {}, trusted_height: {} }}",
            self.signed_header.header.chain_id,
            self.signed_header.header.height,
            self.validator_set,
            self.voter_set,
            self.trusted_height
        )
    }
}

impl Header {
    pub fn chain_id(&self) -> &chain::Id {
        &self.signed_header.header.chain_id
    }

    pub fn timestamp(&self) -> Time {
        self.signed_header.header.time
    }

    /// The header's height, with the revision number taken from the
    /// `<name>-<revision>` suffix of its chain id.
    pub fn height(&self) -> Height {
        Height::new(
            ChainId::revision_number_of(self.chain_id().as_str()),
            self.signed_header.header.height.value(),
        )
    }

    /// The consensus state the client stores once this header is verified.
    pub fn consensus_state(&self) -> ConsensusState {
        ConsensusState::from(self.signed_header.header.clone())
    }

    /// Checks the header's internal consistency: its commit is for this
    /// block, its validator set is the one the block committed to, and its
    /// voters were elected from those validators.
    pub fn validate_basic<H: MerkleHash + Sha256 + Default>(
        &self,
    ) -> Result<(), OstraconClientError> {
        let header = &self.signed_header.header;
        let commit = &self.signed_header.commit;

        if commit.signatures.is_empty() {
            return Err(OstraconClientError::InvalidHeader {
                description: "commit has no signatures".to_string(),
            });
        }
        if commit.height != header.height {
            return Err(OstraconClientError::InvalidHeader {
                description: format!(
                    "commit height {} does not match header height {}",
                    commit.height, header.height
                ),
            });
        }
        let header_hash = header.hash_with::<H>();
        if commit.block_id.hash != header_hash {
            return Err(OstraconClientError::InvalidHeader {
                description: format!(
                    "commit is for block {}, but the header hashes to {header_hash}",
                    commit.block_id.hash
                ),
            });
        }

        if self.validator_set.is_empty() {
            return Err(OstraconClientError::InvalidHeader {
                description: "validator set is empty".to_string(),
            });
        }
        let validators_hash = self.validator_set.hash_with::<H>();
        if validators_hash != header.validators_hash {
            return Err(OstraconClientError::InvalidHeader {
                description: format!(
                    "validator set hashes to {validators_hash}, header commits to {}",
                    header.validators_hash
                ),
            });
        }

        if self.voter_set.is_empty() {
            return Err(OstraconClientError::InvalidVoterSet {
                description: "voter set is empty".to_string(),
            });
        }
        if !self.voter_set.is_subset_of(&self.validator_set) {
            return Err(OstraconClientError::InvalidVoterSet {
                description: "voter set is not a subset of the validator set".to_string(),
            });
        }

        let height = self.height();
        if self.trusted_height > height {
            return Err(OstraconClientError::InvalidHeaderHeight {
                description: format!(
                    "trusted height {} is above header height {height}",
                    self.trusted_height
                ),
            });
        }
        if !self.trusted_height.is_zero()
            && self.trusted_height.revision_number() != height.revision_number()
        {
            return Err(OstraconClientError::InvalidHeaderHeight {
                description: format!(
                    "trusted height {} and header height {height} have different revisions",
                    self.trusted_height
                ),
            });
        }

        Ok(())
    }

    /// Verifies that the header's voters who signed its commit hold more
    /// than two thirds of the power of its validator set, the set the block
    /// header commits to.
    pub fn verify_self_commit<V: Verifier>(&self) -> Result<(), OstraconClientError> {
        let commit = &self.signed_header.commit;
        self.validator_set.verify_voter_commit_light::<V>(
            &self.voter_set,
            self.chain_id(),
            &commit.block_id,
            self.signed_header.header.height,
            commit,
            TrustThreshold::TWO_THIRDS,
        )
    }

    /// Verifies that the trusted voters who signed the header's commit hold
    /// more than `trust_level` of the trusted validators' power.
    pub fn verify_trusted_commit<V: Verifier>(
        &self,
        trust_level: TrustThreshold,
    ) -> Result<(), OstraconClientError> {
        self.trusted_validators
            .verify_voter_commit_light_trusting::<V>(
                &self.trusted_voters,
                self.chain_id(),
                &self.signed_header.commit,
                trust_level,
            )
    }
}

impl Protobuf<RawHeader> for Header {}

impl TryFrom<RawHeader> for Header {
    type Error = OstraconClientError;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        let signed_header = raw
            .signed_header
            .ok_or_else(|| OstraconClientError::missing_raw("signed header not set"))?
            .try_into()
            .map_err(|e| {
                OstraconClientError::invalid_raw(format!("failed to decode signed header: {e}"))
            })?;

        let validator_set = raw
            .validator_set
            .ok_or_else(|| OstraconClientError::missing_raw("validator set not set"))?
            .try_into()?;

        let voter_set = raw
            .voter_set
            .ok_or_else(|| OstraconClientError::missing_raw("voter set not set"))?
            .try_into()?;

        // The trusted fields are left out of headers submitted at client
        // creation.
        let trusted_height = raw
            .trusted_height
            .map(|h| Height::new(h.revision_number, h.revision_height))
            .unwrap_or_default();
        let trusted_validators = raw
            .trusted_validators
            .map(ValidatorSet::try_from)
            .transpose()?
            .unwrap_or_else(ValidatorSet::empty);
        let trusted_voters = raw
            .trusted_voters
            .map(ValidatorSet::try_from)
            .transpose()?
            .unwrap_or_else(ValidatorSet::empty);

        Ok(Self {
            signed_header,
            validator_set,
            voter_set,
            trusted_height,
            trusted_validators,
            trusted_voters,
        })
    }
}

impl From<Header> for RawHeader {
    fn from(value: Header) -> Self {
        Self {
            signed_header: Some(value.signed_header.into()),
            validator_set: Some(value.validator_set.into()),
            trusted_height: Some(value.trusted_height.into()),
            trusted_validators: Some(value.trusted_validators.into()),
            voter_set: Some(value.voter_set.into()),
            trusted_voters: Some(value.trusted_voters.into()),
        }
    }
}

impl Protobuf<Any> for Header {}

impl TryFrom<Any> for Header {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_HEADER_TYPE_URL => Ok(Protobuf::<RawHeader>::decode_vec(&raw.value)?),
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<Header> for Any {
    fn from(header: Header) -> Self {
        Any {
            type_url: OSTRACON_HEADER_TYPE_URL.to_string(),
            value: Protobuf::<RawHeader>::encode_vec(header),
        }
    }
}
