//! The client kinds a host knows about, decoded from the type-tagged values
//! light clients write to their stores.

use derive_more::From;
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::proto::{
    OSTRACON_CLIENT_STATE_TYPE_URL, OSTRACON_CONSENSUS_STATE_TYPE_URL,
};
use ibc_client_ostracon::types::{ClientState, ConsensusState};
use ibc_core_client_types::Height;
use ibc_core_host_types::error::DecodingError;
use ibc_primitives::decode_any;
use ibc_primitives::prelude::*;
use ibc_primitives::proto::{Any, Protobuf};

#[derive(Clone, Debug, PartialEq, From)]
pub enum AnyClientState {
    Ostracon(ClientState),
}

impl AnyClientState {
    /// Decodes a client state as stored under a client's `clientState` key.
    pub fn decode_stored(bytes: &[u8]) -> Result<Self, OstraconClientError> {
        let any = decode_any(bytes).map_err(DecodingError::from)?;
        Self::try_from(any)
    }

    pub fn latest_height(&self) -> Height {
        match self {
            Self::Ostracon(cs) => cs.latest_height,
        }
    }

    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Ostracon(cs) => cs.is_frozen(),
        }
    }
}

impl Protobuf<Any> for AnyClientState {}

impl TryFrom<Any> for AnyClientState {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_CLIENT_STATE_TYPE_URL => Ok(ClientState::try_from(raw)?.into()),
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<AnyClientState> for Any {
    fn from(client_state: AnyClientState) -> Self {
        match client_state {
            AnyClientState::Ostracon(cs) => cs.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, From)]
pub enum AnyConsensusState {
    Ostracon(ConsensusState),
}

impl AnyConsensusState {
    /// Decodes a consensus state as stored under a client's
    /// `consensusStates/{height}` key.
    pub fn decode_stored(bytes: &[u8]) -> Result<Self, OstraconClientError> {
        let any = decode_any(bytes).map_err(DecodingError::from)?;
        Self::try_from(any)
    }

    pub fn timestamp(&self) -> tendermint::Time {
        match self {
            Self::Ostracon(cs) => cs.timestamp(),
        }
    }
}

impl Protobuf<Any> for AnyConsensusState {}

impl TryFrom<Any> for AnyConsensusState {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_CONSENSUS_STATE_TYPE_URL => Ok(ConsensusState::try_from(raw)?.into()),
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<AnyConsensusState> for Any {
    fn from(consensus_state: AnyConsensusState) -> Self {
        match consensus_state {
            AnyConsensusState::Ostracon(cs) => cs.into(),
        }
    }
}
