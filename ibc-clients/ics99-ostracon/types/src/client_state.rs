//! Contains the implementation of the Ostracon `ClientState` domain type.

use core::cmp::max;
use core::str::FromStr;
use core::time::Duration;

use ibc_core_client_types::Height;
use ibc_core_commitment_types::specs::ProofSpecs;
use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;
use ibc_primitives::{duration_from_proto, duration_to_proto, elapsed_since, ZERO_DURATION};
use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use ibc_proto::Protobuf;
use tendermint::Time;

use crate::error::OstraconClientError;
use crate::header::Header;
use crate::proto::v1::ClientState as RawClientState;
use crate::proto::OSTRACON_CLIENT_STATE_TYPE_URL;
use crate::trust_threshold::TrustThreshold;
use crate::OSTRACON_CLIENT_TYPE;

/// Height every frozen client is frozen at. Freezing is signalled by a
/// non-zero frozen height, not by the height of the misbehaviour.
pub const FROZEN_HEIGHT: Height = Height::min(0);

/// Policy flags carried for the host's recovery governance. Verification
/// never consults them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowUpdate {
    pub after_expiry: bool,
    pub after_misbehaviour: bool,
}

/// Defines data structure for Ostracon client state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClientState {
    pub chain_id: ChainId,
    pub trust_level: TrustThreshold,
    pub trusting_period: Duration,
    pub unbonding_period: Duration,
    pub max_clock_drift: Duration,
    pub latest_height: Height,
    pub frozen_height: Height,
    pub proof_specs: ProofSpecs,
    pub upgrade_path: Vec<String>,
    pub allow_update: AllowUpdate,
}

impl ClientState {
    #[allow(clippy::too_many_arguments)]
    pub fn new_without_validation(
        chain_id: ChainId,
        trust_level: TrustThreshold,
        trusting_period: Duration,
        unbonding_period: Duration,
        max_clock_drift: Duration,
        latest_height: Height,
        proof_specs: ProofSpecs,
        upgrade_path: Vec<String>,
        frozen_height: Height,
        allow_update: AllowUpdate,
    ) -> Self {
        Self {
            chain_id,
            trust_level,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            frozen_height,
            proof_specs,
            upgrade_path,
            allow_update,
        }
    }

    /// Constructs a new, unfrozen Ostracon `ClientState` by given parameters
    /// and checks if the parameters are valid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: ChainId,
        trust_level: TrustThreshold,
        trusting_period: Duration,
        unbonding_period: Duration,
        max_clock_drift: Duration,
        latest_height: Height,
        proof_specs: ProofSpecs,
        upgrade_path: Vec<String>,
        allow_update: AllowUpdate,
    ) -> Result<Self, OstraconClientError> {
        let client_state = Self::new_without_validation(
            chain_id,
            trust_level,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            proof_specs,
            upgrade_path,
            Height::zero(),
            allow_update,
        );
        client_state.validate()?;
        Ok(client_state)
    }

    pub fn client_type(&self) -> &'static str {
        OSTRACON_CLIENT_TYPE
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    pub fn is_frozen(&self) -> bool {
        !self.frozen_height.is_zero()
    }

    /// Moves the latest height up to the header's height. The latest height
    /// never decreases.
    pub fn with_header(self, header: &Header) -> Self {
        Self {
            latest_height: max(header.height(), self.latest_height),
            ..self
        }
    }

    pub fn with_frozen_height(self, frozen_height: Height) -> Self {
        Self {
            frozen_height,
            ..self
        }
    }

    /// Whether a consensus state from `trusted_time` is outside the trusting
    /// period at `now`.
    pub fn is_expired(&self, trusted_time: Time, now: Time) -> bool {
        elapsed_since(now, trusted_time) >= self.trusting_period
    }

    pub fn validate(&self) -> Result<(), OstraconClientError> {
        self.trust_level.validate()?;

        if self.trusting_period <= ZERO_DURATION {
            return Err(OstraconClientError::InvalidClientState {
                description: "trusting period must be greater than zero".to_string(),
            });
        }

        if self.unbonding_period <= ZERO_DURATION {
            return Err(OstraconClientError::InvalidClientState {
                description: "unbonding period must be greater than zero".to_string(),
            });
        }

        if self.trusting_period >= self.unbonding_period {
            return Err(OstraconClientError::InvalidClientState {
                description: format!(
                    "trusting period ({:?}) must be smaller than unbonding period ({:?})",
                    self.trusting_period, self.unbonding_period
                ),
            });
        }

        if self.max_clock_drift <= ZERO_DURATION {
            return Err(OstraconClientError::InvalidClientState {
                description: "max clock drift must be greater than zero".to_string(),
            });
        }

        if self.latest_height.revision_number() != self.chain_id.revision_number() {
            return Err(OstraconClientError::InvalidClientState {
                description: format!(
                    "latest height {} does not match the revision of chain id {}",
                    self.latest_height, self.chain_id
                ),
            });
        }

        if self.latest_height.revision_height() == 0 {
            return Err(OstraconClientError::InvalidClientState {
                description: "latest height must be greater than zero".to_string(),
            });
        }

        self.proof_specs.validate()?;

        // `upgrade_path` itself may be empty, but if not then each key must be non-empty
        for (idx, key) in self.upgrade_path.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(OstraconClientError::InvalidClientState {
                    description: format!("upgrade path key at index {idx} cannot be empty"),
                });
            }
        }

        Ok(())
    }
}

impl Protobuf<RawClientState> for ClientState {}

impl TryFrom<RawClientState> for ClientState {
    type Error = OstraconClientError;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        let chain_id = ChainId::from_str(raw.chain_id.as_str())?;

        let trust_level = raw
            .trust_level
            .ok_or_else(|| OstraconClientError::missing_raw("missing trust level"))?
            .try_into()?;

        let duration = |value: Option<_>, name: &str| {
            value.and_then(duration_from_proto).ok_or_else(|| {
                OstraconClientError::invalid_raw(format!("missing or negative {name}"))
            })
        };
        let trusting_period = duration(raw.trusting_period, "trusting period")?;
        let unbonding_period = duration(raw.unbonding_period, "unbonding period")?;
        let max_clock_drift = duration(raw.max_clock_drift, "max clock drift")?;

        let latest_height = raw
            .latest_height
            .map(|h| Height::new(h.revision_number, h.revision_height))
            .ok_or_else(|| OstraconClientError::missing_raw("missing latest height"))?;

        // A missing or zero frozen height means "not frozen".
        let frozen_height = raw
            .frozen_height
            .map(|h| Height::new(h.revision_number, h.revision_height))
            .unwrap_or_default();

        let allow_update = AllowUpdate {
            after_expiry: raw.allow_update_after_expiry,
            after_misbehaviour: raw.allow_update_after_misbehaviour,
        };

        Ok(Self::new_without_validation(
            chain_id,
            trust_level,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            raw.proof_specs.try_into()?,
            raw.upgrade_path,
            frozen_height,
            allow_update,
        ))
    }
}

impl From<ClientState> for RawClientState {
    fn from(value: ClientState) -> Self {
        Self {
            chain_id: value.chain_id.to_string(),
            trust_level: Some(value.trust_level.into()),
            trusting_period: duration_to_proto(value.trusting_period),
            unbonding_period: duration_to_proto(value.unbonding_period),
            max_clock_drift: duration_to_proto(value.max_clock_drift),
            frozen_height: Some(RawHeight::from(value.frozen_height)),
            latest_height: Some(value.latest_height.into()),
            proof_specs: value.proof_specs.into(),
            upgrade_path: value.upgrade_path,
            allow_update_after_expiry: value.allow_update.after_expiry,
            allow_update_after_misbehaviour: value.allow_update.after_misbehaviour,
        }
    }
}

impl Protobuf<Any> for ClientState {}

impl TryFrom<Any> for ClientState {
    type Error = OstraconClientError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            OSTRACON_CLIENT_STATE_TYPE_URL => {
                Ok(Protobuf::<RawClientState>::decode_vec(&raw.value)?)
            }
            _ => Err(DecodingError::UnknownTypeUrl(raw.type_url))?,
        }
    }
}

impl From<ClientState> for Any {
    fn from(client_state: ClientState) -> Self {
        Any {
            type_url: OSTRACON_CLIENT_STATE_TYPE_URL.to_string(),
            value: Protobuf::<RawClientState>::encode_vec(client_state),
        }
    }
}
