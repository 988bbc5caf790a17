//! Integration tests of the Ostracon client against a mock host store.

mod client_status;
mod misbehaviour;
mod update_client;

use core::time::Duration;

use ibc_client_ostracon::client_state::{check_header_and_update_state, initialise};
use ibc_client_ostracon::context::{PrefixedStore, ValidationContext};
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::{ClientState, ConsensusState, Header, TrustThreshold};
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::ClientId;
use ibc_testkit::fixtures::chain::{BlockParams, OstraconChain};
use ibc_testkit::fixtures::client_state::ClientStateConfig;
use ibc_testkit::fixtures::{after, genesis_time};
use ibc_testkit::store::MockStore;
use tendermint::Time;

/// Height of the consensus state clients are created with.
pub const GENESIS_HEIGHT: u64 = 10;

/// Block interval of the counterparty chain.
pub const BLOCK_TIME: Duration = Duration::from_secs(5);

/// A host holding one Ostracon client of `chain`.
pub struct Fixture {
    pub chain: OstraconChain,
    pub client_id: ClientId,
    pub host: MockStore,
}

impl Fixture {
    pub fn new(chain: OstraconChain, trust_level: TrustThreshold) -> Self {
        Self::with_config(
            chain,
            ClientStateConfig::builder()
                .trust_level(trust_level)
                .latest_height(Height::new(0, GENESIS_HEIGHT))
                .build(),
            b"app-hash".to_vec(),
        )
    }

    pub fn with_config(chain: OstraconChain, config: ClientStateConfig, app_hash: Vec<u8>) -> Self {
        let client_id = ClientId::new("99-ostracon", 0).expect("valid client id");
        let mut host = MockStore::new();

        let client_state = ClientState::try_from(config).expect("valid client state");
        let consensus_state = chain.consensus_state(
            &BlockParams::builder()
                .height(GENESIS_HEIGHT)
                .time(genesis_time())
                .app_hash(app_hash)
                .build(),
        );
        initialise(
            &mut host.client_store(&client_id),
            &client_state,
            &consensus_state,
            genesis_time(),
        )
        .expect("client initialised");

        Self {
            chain,
            client_id,
            host,
        }
    }

    pub fn store(&mut self) -> PrefixedStore<'_, MockStore> {
        self.host.client_store(&self.client_id)
    }

    pub fn client_state(&mut self) -> ClientState {
        self.store().client_state().expect("client state stored")
    }

    /// Submits `header` the way a host would: against the stored client
    /// state.
    pub fn update(
        &mut self,
        header: &Header,
        now: Time,
    ) -> Result<(ClientState, ConsensusState), OstraconClientError> {
        let client_state = self.client_state();
        check_header_and_update_state(&client_state, &mut self.store(), header, now)
    }

    /// A header at `height`, signed by `signers` (all voters when `None`)
    /// and building on the consensus state at `trusted_height`.
    pub fn header(&self, height: u64, trusted_height: u64, signers: Option<Vec<usize>>) -> Header {
        self.header_with(block(height, signers), trusted_height)
    }

    pub fn header_with(&self, params: BlockParams, trusted_height: u64) -> Header {
        self.chain
            .header(&params, self.chain.height(trusted_height))
    }
}

/// Time of the block at `height` on the test chain.
pub fn block_time(height: u64) -> Time {
    after(genesis_time(), BLOCK_TIME * (height - GENESIS_HEIGHT) as u32)
}

/// The block at `height`, signed by `signers` or by every voter.
pub fn block(height: u64, signers: Option<Vec<usize>>) -> BlockParams {
    let params = BlockParams::builder()
        .height(height)
        .time(block_time(height));
    match signers {
        Some(signers) => params.signers(signers).build(),
        None => params.build(),
    }
}
