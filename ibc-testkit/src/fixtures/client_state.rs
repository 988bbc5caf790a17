use core::time::Duration;

use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::{AllowUpdate, ClientState, TrustThreshold};
use ibc_core_client_types::Height;
use ibc_core_commitment_types::specs::ProofSpecs;
use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug)]
pub struct ClientStateConfig {
    #[builder(default = ChainId::new("ostracon-0").expect("Never fails"))]
    pub chain_id: ChainId,
    #[builder(default = TrustThreshold::ONE_THIRD)]
    pub trust_level: TrustThreshold,
    #[builder(default = Duration::from_secs(64000))]
    pub trusting_period: Duration,
    #[builder(default = Duration::from_secs(128_000))]
    pub unbonding_period: Duration,
    #[builder(default = Duration::from_millis(3000))]
    pub max_clock_drift: Duration,
    pub latest_height: Height,
    #[builder(default = ProofSpecs::cosmos())]
    pub proof_specs: ProofSpecs,
    #[builder(default = vec!["upgrade".to_string(), "upgradedIBCState".to_string()])]
    pub upgrade_path: Vec<String>,
    #[builder(default)]
    pub allow_update: AllowUpdate,
}

impl TryFrom<ClientStateConfig> for ClientState {
    type Error = OstraconClientError;

    fn try_from(config: ClientStateConfig) -> Result<Self, Self::Error> {
        ClientState::new(
            config.chain_id,
            config.trust_level,
            config.trusting_period,
            config.unbonding_period,
            config.max_clock_drift,
            config.latest_height,
            config.proof_specs,
            config.upgrade_path,
            config.allow_update,
        )
    }
}
