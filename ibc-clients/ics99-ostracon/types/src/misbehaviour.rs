//! Defines the misbehaviour type for the Ostracon light client

use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::ClientId;
use ibc_primitives::prelude::*;
use ibc_proto::google::protobuf::Any;
use ibc_proto::Protobuf;
use tendermint::crypto::signature::Verifier;
use tendermint::crypto::Sha256;
use tendermint::merkle::MerkleHash;

use crate::error::OstraconClientError;
use crate::header::Header;
use crate::proto::v1::Misbehaviour as RawMisbehaviour;
use crate::proto::OSTRACON_MISBEHAVIOUR_TYPE_URL;

/// Two headers for the same chain that cannot both be honest: either two
/// different blocks at one height, or a later block that is not later in
/// time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Misbehaviour {
    client_id: ClientId,
    header1: Box<Header>,
    header2: Box<Header>,
}

impl Misbehaviour {
    pub fn new(client_id: ClientId, header1: Header, header2: Header) -> Self {
        Self {
            client_id,
            header1: Box::new(header1),
            header2: Box::new(header2),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn header1(&self) -> &Header {
        &self.header1
    }

    pub fn header2(&self) -> &Header {
        &self.header2
    }

    /// Checks both headers stand on their own: trusted fields are present,
    /// each header is internally consistent and signed by more than two
    /// thirds of its voters, and `header1` is not below `header2`.
    pub fn validate_basic<H, V>(&self) -> Result<(), OstraconClientError>
    where
        H: MerkleHash + Sha256 + Default,
        V: Verifier,
    {
        for (name, header) in [("header1", &self.header1), ("header2", &self.header2)] {
            if header.trusted_height.revision_height() == 0 {
                return Err(invalid(format!("{name} has no trusted height")));
            }
            if header.trusted_validators.is_empty() {
                return Err(invalid(format!("{name} has no trusted validators")));
            }
            if header.trusted_voters.is_empty() {
                return Err(invalid(format!("{name} has no trusted voters")));
            }
            header
                .validate_basic::<H>()
                .map_err(|e| invalid(format!("{name} is invalid: {e}")))?;
        }

        if self.header1.chain_id() != self.header2.chain_id() {
            return Err(invalid("headers must have identical chain_ids".to_string()));
        }

        if self.header1.height() < self.header2.height() {
            return Err(invalid(format!(
                "header1 height is less than header2 height ({} < {})",
                self.header1.height(),
                self.header2.height()
            )));
        }

        self.header1.verify_self_commit::<V>()?;
        self.header2.verify_self_commit::<V>()?;

        Ok(())
    }
}

fn invalid(description: String) -> OstraconClientError {
    OstraconClientError::InvalidMisbehaviour { description }
}

impl Protobuf<RawMisbehaviour> for Misbehaviour {}

impl TryFrom<RawMisbehaviour> for Misbehaviour {
    type Error = OstraconClientError;

    fn try_from(raw: RawMisbehaviour) -> Result<Self, Self::Error> {
        let client_id = raw.client_id.parse()?;

        let header1: Header = raw
            .header_1
            .ok_or_else(|| OstraconClientError::missing_raw("missing header1"))?
            .try_into()?;

        let header2: Header = raw
            .header_2
            .ok_or_else(|| OstraconClientError::missing_raw("missing header2"))?
            .try_into()?;

        Ok(Self::new(client_id, header1, header2))
    }
}

impl From<Misbehaviour> for RawMisbehaviour {
    fn from(value: Misbehaviour) -> Self {
        RawMisbehaviour {
            client_id: value.client_id.to_string(),
            header_1: Some((*value.header1).into()),
            header_2: Some((*value.header2).into()),
        }
    }
}

impl Protobuf<Any> for Misbehaviour {}

impl TryFrom<Any> for Misbehaviour {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_MISBEHAVIOUR_TYPE_URL => {
                Ok(Protobuf::<RawMisbehaviour>::decode_vec(&raw.value)?)
            }
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<Misbehaviour> for Any {
    fn from(misbehaviour: Misbehaviour) -> Self {
        Any {
            type_url: OSTRACON_MISBEHAVIOUR_TYPE_URL.to_string(),
            value: Protobuf::<RawMisbehaviour>::encode_vec(misbehaviour),
        }
    }
}

impl core::fmt::Display for Misbehaviour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "{} h1: {}-{} h2: {}-{}",
            self.client_id,
            self.header1.height(),
            self.header1.trusted_height,
            self.header2.height(),
            self.header2.trusted_height,
        )
    }
}
