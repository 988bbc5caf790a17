use core::time::Duration;

use ibc_client_ostracon::client_state::{
    initialise, status, verify_membership, verify_non_membership,
};
use ibc_client_ostracon::context::ValidationContext;
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::{ClientState, TrustThreshold, FROZEN_HEIGHT};
use ibc_core_client_types::{Height, Status};
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_commitment_types::error::CommitmentError;
use ibc_core_host_types::identifiers::ClientId;
use ibc_testkit::fixtures::chain::{BlockParams, OstraconChain};
use ibc_testkit::fixtures::client_state::ClientStateConfig;
use ibc_testkit::fixtures::commitment::{membership_proof, prefix, proof_specs};
use ibc_testkit::fixtures::{after, genesis_time};
use ibc_testkit::clients::{AnyClientState, AnyConsensusState};
use ibc_testkit::store::MockStore;
use rstest::rstest;

use crate::{Fixture, GENESIS_HEIGHT};

const KEY: &[u8] = b"clients/07-tendermint-0/clientState";
const VALUE: &[u8] = b"counterparty client state";

fn fixture() -> Fixture {
    Fixture::new(
        OstraconChain::with_powers(&[1, 1, 1]),
        TrustThreshold::ONE_THIRD,
    )
}

/// A client whose genesis app hash commits to `VALUE` under `KEY`.
fn proving_fixture() -> (Fixture, CommitmentProofBytes) {
    let (proof, root) = membership_proof(KEY, VALUE);
    let fixture = Fixture::with_config(
        OstraconChain::with_powers(&[1, 1, 1]),
        ClientStateConfig::builder()
            .latest_height(Height::new(0, GENESIS_HEIGHT))
            .proof_specs(proof_specs())
            .build(),
        root.into_vec(),
    );
    (fixture, proof)
}

#[rstest]
#[case::fresh(Duration::ZERO, Status::Active)]
#[case::almost_expired(Duration::from_secs(64000) - Duration::from_nanos(1), Status::Active)]
#[case::expired(Duration::from_secs(64000), Status::Expired)]
fn status_follows_the_latest_consensus_state(#[case] elapsed: Duration, #[case] expected: Status) {
    let mut fixture = fixture();
    let client_state = fixture.client_state();

    assert_eq!(
        status(
            &client_state,
            &fixture.store(),
            after(genesis_time(), elapsed)
        )
        .unwrap(),
        expected
    );
}

#[test_log::test]
fn client_without_latest_consensus_state_is_expired() {
    let mut fixture = fixture();
    let client_state = fixture.client_state();
    let mut empty = MockStore::new();

    assert_eq!(
        status(&client_state, &empty.client_store(&fixture.client_id), genesis_time()).unwrap(),
        Status::Expired
    );
    assert_eq!(
        status(&client_state, &fixture.store(), genesis_time()).unwrap(),
        Status::Active
    );
}

#[test_log::test]
fn committed_value_is_proven() {
    let (mut fixture, proof) = proving_fixture();
    let client_state = fixture.client_state();

    verify_membership(
        &client_state,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT),
        &prefix(),
        &proof,
        KEY.to_vec(),
        VALUE.to_vec(),
    )
    .expect("value is committed");
}

#[test_log::test]
fn other_value_is_not_proven() {
    let (mut fixture, proof) = proving_fixture();
    let client_state = fixture.client_state();

    let result = verify_membership(
        &client_state,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT),
        &prefix(),
        &proof,
        KEY.to_vec(),
        b"forged client state".to_vec(),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::Commitment(
            CommitmentError::VerificationFailure
        ))
    ));
}

#[test_log::test]
fn existence_proof_does_not_prove_absence() {
    let (mut fixture, proof) = proving_fixture();
    let client_state = fixture.client_state();

    let result = verify_non_membership(
        &client_state,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT),
        &prefix(),
        &proof,
        KEY.to_vec(),
    );

    assert!(matches!(result, Err(OstraconClientError::Commitment(_))));
}

#[test_log::test]
fn proofs_need_a_stored_consensus_state() {
    let (mut fixture, proof) = proving_fixture();
    let client_state = fixture.client_state();

    let above_latest = verify_membership(
        &client_state,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT + 1),
        &prefix(),
        &proof,
        KEY.to_vec(),
        VALUE.to_vec(),
    );
    assert!(matches!(
        above_latest,
        Err(OstraconClientError::InvalidHeight { .. })
    ));

    let not_stored = verify_membership(
        &client_state,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT - 1),
        &prefix(),
        &proof,
        KEY.to_vec(),
        VALUE.to_vec(),
    );
    assert!(matches!(
        not_stored,
        Err(OstraconClientError::ConsensusStateNotFound { .. })
    ));

    let frozen = client_state.with_frozen_height(FROZEN_HEIGHT);
    let result = verify_membership(
        &frozen,
        &fixture.store(),
        Height::new(0, GENESIS_HEIGHT),
        &prefix(),
        &proof,
        KEY.to_vec(),
        VALUE.to_vec(),
    );
    assert!(matches!(result, Err(OstraconClientError::ClientFrozen { .. })));
}

#[test_log::test]
fn initialise_writes_client_and_genesis_consensus_state() {
    let mut fixture = fixture();
    let prefix = format!("clients/{}/", fixture.client_id);

    let keys: Vec<String> = fixture
        .host
        .keys()
        .map(|key| String::from_utf8_lossy(key).into_owned())
        .collect();
    assert!(keys.contains(&format!("{prefix}clientState")));
    assert!(keys.contains(&format!("{prefix}consensusStates/0-10")));
    assert!(keys.contains(&format!("{prefix}consensusStates/0-10/processedTime")));
    assert!(!keys.contains(&format!("{prefix}consensusStates/0-10/validatorsHash")));

    let client_state = fixture
        .host
        .any_client_state(&fixture.client_id)
        .unwrap();
    assert!(
        matches!(client_state, Some(AnyClientState::Ostracon(cs)) if cs.latest_height == Height::new(0, 10))
    );
    let consensus_state = fixture
        .host
        .any_consensus_state(&fixture.client_id, Height::new(0, 10))
        .unwrap();
    assert!(
        matches!(consensus_state, Some(AnyConsensusState::Ostracon(cs)) if cs.timestamp() == genesis_time())
    );
}

#[test_log::test]
fn frozen_client_cannot_be_initialised() {
    let chain = OstraconChain::with_powers(&[1]);
    let client_state = ClientState::try_from(
        ClientStateConfig::builder()
            .latest_height(Height::new(0, GENESIS_HEIGHT))
            .build(),
    )
    .unwrap()
    .with_frozen_height(FROZEN_HEIGHT);
    let consensus_state = chain.consensus_state(
        &BlockParams::builder()
            .height(GENESIS_HEIGHT)
            .time(genesis_time())
            .build(),
    );
    let mut host = MockStore::new();
    let client_id = ClientId::new("99-ostracon", 7).unwrap();

    let result = initialise(
        &mut host.client_store(&client_id),
        &client_state,
        &consensus_state,
        genesis_time(),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidClientState { .. })
    ));
    assert!(host.is_empty());
}

#[test_log::test]
fn clients_do_not_share_state() {
    let mut fixture = fixture();
    let other_id = ClientId::new("99-ostracon", 1).unwrap();

    let other = fixture.host.client_store(&other_id);
    assert!(matches!(
        other.client_state(),
        Err(OstraconClientError::ClientStateNotFound)
    ));

    assert!(!fixture.client_state().is_frozen());
}
