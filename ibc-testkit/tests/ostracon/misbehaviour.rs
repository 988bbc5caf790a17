use core::time::Duration;

use ibc_client_ostracon::client_state::{check_misbehaviour_and_update_state, status};
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::{ClientState, Misbehaviour, TrustThreshold, FROZEN_HEIGHT};
use ibc_core_client_types::{Height, Status};
use ibc_testkit::fixtures::chain::{BlockParams, OstraconChain, TestValidator};
use ibc_testkit::fixtures::{after, genesis_time};
use tendermint::Time;
use test_log::test;

use crate::{block, block_time, Fixture, GENESIS_HEIGHT};

fn fixture() -> Fixture {
    Fixture::new(
        OstraconChain::with_powers(&[1, 1, 1]),
        TrustThreshold::TWO_THIRDS,
    )
}

fn submit(
    fixture: &mut Fixture,
    misbehaviour: &Misbehaviour,
    now: Time,
) -> Result<ClientState, OstraconClientError> {
    let client_state = fixture.client_state();
    check_misbehaviour_and_update_state(&client_state, &mut fixture.store(), misbehaviour, now)
}

fn fork_at(fixture: &Fixture, height: u64) -> Misbehaviour {
    let honest = fixture.header(height, GENESIS_HEIGHT, None);
    let forged = fixture.header_with(
        BlockParams::builder()
            .height(height)
            .time(block_time(height))
            .app_hash(b"forged-app-hash".to_vec())
            .build(),
        GENESIS_HEIGHT,
    );
    Misbehaviour::new(fixture.client_id.clone(), honest, forged)
}

#[test]
fn fork_freezes_the_client() {
    let mut fixture = fixture();
    let misbehaviour = fork_at(&fixture, 11);
    let now = after(block_time(11), Duration::from_secs(1));

    let frozen = submit(&mut fixture, &misbehaviour, now).expect("fork proven");

    assert_eq!(frozen.frozen_height, FROZEN_HEIGHT);
    assert_eq!(fixture.client_state(), frozen);
    assert_eq!(
        status(&frozen, &fixture.store(), now).unwrap(),
        Status::Frozen
    );

    // nothing verifies against a frozen client
    let result = fixture.update(&fixture.header(12, GENESIS_HEIGHT, None), now);
    assert!(matches!(result, Err(OstraconClientError::ClientFrozen { .. })));
    assert!(matches!(
        submit(&mut fixture, &misbehaviour, now),
        Err(OstraconClientError::ClientFrozen { .. })
    ));
}

#[test]
fn later_block_with_earlier_time_freezes_the_client() {
    let mut fixture = fixture();
    let higher = fixture.header_with(
        BlockParams::builder()
            .height(12)
            .time(block_time(11))
            .build(),
        GENESIS_HEIGHT,
    );
    let lower = fixture.header(11, GENESIS_HEIGHT, None);
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), higher, lower);

    let frozen = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(12), Duration::from_secs(1)),
    )
    .expect("time violation proven");

    assert!(frozen.is_frozen());
}

#[test]
fn consistent_headers_do_not_freeze_the_client() {
    let mut fixture = fixture();
    let header = fixture.header(11, GENESIS_HEIGHT, None);
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), header.clone(), header);
    let before = fixture.host.clone();

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(11), Duration::from_secs(1)),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidMisbehaviour { .. })
    ));
    assert_eq!(fixture.host, before);
    assert!(!fixture.client_state().is_frozen());
}

#[test]
fn ordered_headers_do_not_freeze_the_client() {
    let mut fixture = fixture();
    let misbehaviour = Misbehaviour::new(
        fixture.client_id.clone(),
        fixture.header(12, GENESIS_HEIGHT, None),
        fixture.header(11, GENESIS_HEIGHT, None),
    );

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(12), Duration::from_secs(1)),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidMisbehaviour { .. })
    ));
    assert!(!fixture.client_state().is_frozen());
}

#[test]
fn under_signed_fork_does_not_freeze_the_client() {
    let mut fixture = fixture();
    let honest = fixture.header(11, GENESIS_HEIGHT, None);
    let forged = fixture.header_with(
        BlockParams::builder()
            .height(11)
            .time(block_time(11))
            .app_hash(b"forged-app-hash".to_vec())
            .signers(vec![0])
            .build(),
        GENESIS_HEIGHT,
    );
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), honest, forged);
    let before = fixture.host.clone();

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(11), Duration::from_secs(1)),
    );

    assert!(result.is_err());
    assert_eq!(fixture.host, before);
}

#[test]
fn lone_voter_cannot_freeze_the_client() {
    let mut fixture = fixture();
    let mut forger = fixture.chain.clone();
    forger.voters = Some(vec![0]);
    let forged = |app_hash: &[u8]| {
        forger.header(
            &BlockParams::builder()
                .height(11)
                .time(block_time(11))
                .app_hash(app_hash.to_vec())
                .build(),
            Height::new(0, GENESIS_HEIGHT),
        )
    };
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), forged(b"a"), forged(b"b"));
    let before = fixture.host.clone();

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(11), Duration::from_secs(1)),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::NotEnoughVotingPower {
            signed: 1,
            total: 3,
            ..
        })
    ));
    assert_eq!(fixture.host, before);
    assert!(!fixture.client_state().is_frozen());
}

#[test]
fn headers_may_build_on_different_trusted_states() {
    let old_chain = OstraconChain::with_powers(&[1, 1, 1]);
    let mut fixture = Fixture::new(old_chain.clone(), TrustThreshold::ONE_THIRD);

    let new_chain = OstraconChain::builder()
        .validators(vec![
            old_chain.validators[0].clone(),
            old_chain.validators[1].clone(),
            TestValidator::new(9, 1),
        ])
        .build();
    let mut header = new_chain.header(&block(11, None), Height::new(0, GENESIS_HEIGHT));
    header.trusted_validators = old_chain.validator_set();
    header.trusted_voters = old_chain.voter_set();
    fixture
        .update(&header, after(block_time(11), Duration::from_secs(1)))
        .expect("validator set change accepted");

    // header1 trusts the new set at 11, header2 the old set at genesis
    let header1 = new_chain.header(&block(12, None), Height::new(0, 11));
    let mut header2 = new_chain.header(
        &BlockParams::builder()
            .height(12)
            .time(block_time(12))
            .app_hash(b"forged-app-hash".to_vec())
            .build(),
        Height::new(0, GENESIS_HEIGHT),
    );
    header2.trusted_validators = old_chain.validator_set();
    header2.trusted_voters = old_chain.voter_set();
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), header1, header2);

    let frozen = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(12), Duration::from_secs(1)),
    )
    .expect("fork proven");

    assert_eq!(frozen.frozen_height, FROZEN_HEIGHT);
}

#[test]
fn fork_on_unknown_trusted_height_is_rejected() {
    let mut fixture = fixture();
    let honest = fixture.header(12, 11, None);
    let forged = fixture.header_with(
        BlockParams::builder()
            .height(12)
            .time(block_time(12))
            .app_hash(b"forged-app-hash".to_vec())
            .build(),
        11,
    );
    let misbehaviour = Misbehaviour::new(fixture.client_id.clone(), honest, forged);

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(12), Duration::from_secs(1)),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::ConsensusStateNotFound { height }) if height == Height::new(0, 11)
    ));
    assert!(!fixture.client_state().is_frozen());
}

#[test]
fn fork_built_on_expired_state_is_rejected() {
    let mut fixture = fixture();
    let misbehaviour = fork_at(&fixture, 11);
    let trusting_period = fixture.client_state().trusting_period;

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(genesis_time(), trusting_period),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::TrustingPeriodExpired { .. })
    ));
    assert!(!fixture.client_state().is_frozen());
}

#[test]
fn headers_must_build_on_a_trusted_height() {
    let mut fixture = fixture();
    let fork = fork_at(&fixture, 11);
    let mut header1 = fork.header1().clone();
    header1.trusted_height = Height::zero();
    let misbehaviour = Misbehaviour::new(
        fixture.client_id.clone(),
        header1,
        fork.header2().clone(),
    );

    let result = submit(
        &mut fixture,
        &misbehaviour,
        after(block_time(11), Duration::from_secs(1)),
    );

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidMisbehaviour { .. })
    ));
}
