//! Defines Ostracon's `ConsensusState` type

use ibc_core_commitment_types::commitment::CommitmentRoot;
use ibc_core_commitment_types::proto::v1::MerkleRoot;
use ibc_core_host_types::error::DecodingError;
use ibc_primitives::prelude::*;
use ibc_primitives::{time_from_proto, time_to_proto};
use ibc_proto::google::protobuf::Any;
use ibc_proto::Protobuf;
use tendermint::hash::Algorithm;
use tendermint::{Hash, Time};

use crate::error::OstraconClientError;
use crate::header::Header;
use crate::proto::v1::ConsensusState as RawConsensusState;
use crate::proto::OSTRACON_CONSENSUS_STATE_TYPE_URL;

/// What the client trusts about the counterparty chain at one height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusState {
    pub timestamp: Time,
    pub root: CommitmentRoot,
    pub next_validators_hash: Hash,
}

impl ConsensusState {
    pub fn new(root: CommitmentRoot, timestamp: Time, next_validators_hash: Hash) -> Self {
        Self {
            timestamp,
            root,
            next_validators_hash,
        }
    }

    pub fn timestamp(&self) -> Time {
        self.timestamp
    }

    pub fn root(&self) -> &CommitmentRoot {
        &self.root
    }

    pub fn validate(&self) -> Result<(), OstraconClientError> {
        if self.root.is_empty() {
            return Err(OstraconClientError::InvalidConsensusState {
                description: "commitment root is empty".to_string(),
            });
        }
        if self.next_validators_hash.is_empty() {
            return Err(OstraconClientError::InvalidConsensusState {
                description: "next validators hash is empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = OstraconClientError;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let root = raw
            .root
            .ok_or_else(|| OstraconClientError::missing_raw("missing commitment root"))?
            .hash;

        let timestamp = time_from_proto(
            raw.timestamp
                .ok_or_else(|| OstraconClientError::missing_raw("missing timestamp"))?,
        )
        .map_err(|e| OstraconClientError::invalid_raw(format!("invalid timestamp: {e}")))?;

        let next_validators_hash = Hash::from_bytes(Algorithm::Sha256, &raw.next_validators_hash)
            .map_err(|e| DecodingError::InvalidHash {
                description: e.to_string(),
            })?;

        Ok(Self {
            root: root.into(),
            timestamp,
            next_validators_hash,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(value: ConsensusState) -> Self {
        RawConsensusState {
            timestamp: Some(time_to_proto(value.timestamp)),
            root: Some(MerkleRoot {
                hash: value.root.into_vec(),
            }),
            next_validators_hash: value.next_validators_hash.as_bytes().to_vec(),
        }
    }
}

impl Protobuf<Any> for ConsensusState {}

impl TryFrom<Any> for ConsensusState {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_CONSENSUS_STATE_TYPE_URL => {
                Ok(Protobuf::<RawConsensusState>::decode_vec(&raw.value)?)
            }
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<ConsensusState> for Any {
    fn from(consensus_state: ConsensusState) -> Self {
        Any {
            type_url: OSTRACON_CONSENSUS_STATE_TYPE_URL.to_string(),
            value: Protobuf::<RawConsensusState>::encode_vec(consensus_state),
        }
    }
}

impl From<tendermint::block::Header> for ConsensusState {
    fn from(header: tendermint::block::Header) -> Self {
        Self {
            root: CommitmentRoot::from_bytes(header.app_hash.as_ref()),
            timestamp: header.time,
            next_validators_hash: header.next_validators_hash,
        }
    }
}

impl From<Header> for ConsensusState {
    fn from(header: Header) -> Self {
        Self::from(header.signed_header.header)
    }
}
