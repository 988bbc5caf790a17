//! Defines the Ostracon light client's error type

use core::time::Duration;

use displaydoc::Display;
use ibc_core_client_types::error::HeightError;
use ibc_core_client_types::Height;
use ibc_core_commitment_types::error::CommitmentError;
use ibc_core_host_types::error::{DecodingError, IdentifierError};
use ibc_primitives::prelude::*;
use tendermint::account;
use tendermint::Time;

use crate::trust_threshold::TrustThreshold;

/// Every way the Ostracon client can reject a client state, header,
/// misbehaviour or proof.
#[derive(Debug, Display)]
pub enum OstraconClientError {
    /// invalid header: `{description}`
    InvalidHeader { description: String },
    /// invalid header height: `{description}`
    InvalidHeaderHeight { description: String },
    /// header time `{header_time}` is not before `{max_allowed}`, the current time plus the maximum clock drift
    HeaderFromFuture { header_time: Time, max_allowed: Time },
    /// invalid misbehaviour: `{description}`
    InvalidMisbehaviour { description: String },
    /// client is frozen at height `{frozen_height}`
    ClientFrozen { frozen_height: Height },
    /// client state not found
    ClientStateNotFound,
    /// consensus state not found at height `{height}`
    ConsensusStateNotFound { height: Height },
    /// the consensus state stored at height `{height}` differs from the submitted header's
    ConflictingConsensusState { height: Height },
    /// trusted consensus state from `{trusted_time}` has expired: `{elapsed:?}` elapsed, trusting period is `{trusting_period:?}`
    TrustingPeriodExpired {
        trusted_time: Time,
        elapsed: Duration,
        trusting_period: Duration,
    },
    /// not enough voting power signed the commit: `{signed}` of `{total}` does not exceed `{threshold}`
    NotEnoughVotingPower {
        signed: u64,
        total: u64,
        threshold: TrustThreshold,
    },
    /// invalid commit: `{description}`
    InvalidCommit { description: String },
    /// invalid commit signature of validator `{validator}`
    InvalidCommitSignature { validator: account::Id },
    /// invalid validator set: `{description}`
    InvalidValidatorSet { description: String },
    /// invalid voter set: `{description}`
    InvalidVoterSet { description: String },
    /// invalid trust level `{numerator}/{denominator}`; requires 0 < numerator <= denominator
    InvalidTrustLevel { numerator: u64, denominator: u64 },
    /// invalid client state: `{description}`
    InvalidClientState { description: String },
    /// invalid consensus state: `{description}`
    InvalidConsensusState { description: String },
    /// invalid height: `{description}`
    InvalidHeight { description: String },
    /// height error: `{0}`
    Height(HeightError),
    /// commitment error: `{0}`
    Commitment(CommitmentError),
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
}

impl OstraconClientError {
    pub(crate) fn invalid_raw(description: impl Into<String>) -> Self {
        Self::Decoding(DecodingError::InvalidRawData {
            description: description.into(),
        })
    }

    pub(crate) fn missing_raw(description: impl Into<String>) -> Self {
        Self::Decoding(DecodingError::MissingRawData {
            description: description.into(),
        })
    }
}

impl From<HeightError> for OstraconClientError {
    fn from(e: HeightError) -> Self {
        Self::Height(e)
    }
}

impl From<CommitmentError> for OstraconClientError {
    fn from(e: CommitmentError) -> Self {
        Self::Commitment(e)
    }
}

impl From<IdentifierError> for OstraconClientError {
    fn from(e: IdentifierError) -> Self {
        Self::Identifier(e)
    }
}

impl From<DecodingError> for OstraconClientError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

impl From<ibc_primitives::proto::Error> for OstraconClientError {
    fn from(e: ibc_primitives::proto::Error) -> Self {
        Self::Decoding(DecodingError::Protobuf(e))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OstraconClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Height(e) => Some(e),
            Self::Commitment(e) => Some(e),
            Self::Identifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}
