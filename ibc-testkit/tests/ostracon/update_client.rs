use core::time::Duration;

use ibc_client_ostracon::context::ValidationContext;
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_client_ostracon::types::{TrustThreshold, ValidatorSet};
use ibc_core_client_types::Height;
use ibc_testkit::fixtures::chain::{BlockParams, OstraconChain, TestValidator};
use ibc_testkit::fixtures::{after, genesis_time};
use rstest::rstest;

use crate::{block, block_time, Fixture, GENESIS_HEIGHT};

fn three_validators() -> Fixture {
    Fixture::new(
        OstraconChain::with_powers(&[1, 1, 1]),
        TrustThreshold::TWO_THIRDS,
    )
}

#[test_log::test]
fn fully_signed_header_is_accepted() {
    let mut fixture = three_validators();
    let header = fixture.header(11, GENESIS_HEIGHT, None);
    let now = after(block_time(11), Duration::from_secs(1));

    let (client_state, consensus_state) = fixture.update(&header, now).expect("header accepted");

    assert_eq!(client_state.latest_height, Height::new(0, 11));
    assert_eq!(consensus_state, header.consensus_state());

    let store = fixture.store();
    assert_eq!(store.client_state().unwrap(), client_state);
    assert_eq!(
        store.consensus_state(&Height::new(0, 11)).unwrap(),
        consensus_state
    );
    assert_eq!(store.processed_time(&Height::new(0, 11)).unwrap(), Some(now));
    assert_eq!(
        store.validators_hash(&Height::new(0, 11)).unwrap(),
        Some(header.validator_set.hash())
    );
    assert_eq!(
        store.consensus_state_heights().unwrap(),
        vec![Height::new(0, 10), Height::new(0, 11)]
    );
}

#[test_log::test]
fn header_signed_by_a_third_is_rejected() {
    let mut fixture = three_validators();
    let header = fixture.header(11, GENESIS_HEIGHT, Some(vec![0]));
    let before = fixture.host.clone();

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(
        result,
        Err(OstraconClientError::NotEnoughVotingPower {
            signed: 1,
            total: 3,
            ..
        })
    ));
    assert_eq!(fixture.host, before);
    assert_eq!(
        fixture.store().maybe_consensus_state(&Height::new(0, 11)).unwrap(),
        None
    );
}

// 9 voting power at trust level 2/3: 6 is exactly the threshold, 7 exceeds it.
#[rstest]
#[case::at_threshold(vec![0, 1], false)]
#[case::above_threshold(vec![0, 1, 3], true)]
fn signed_power_must_exceed_trust_level(#[case] signers: Vec<usize>, #[case] accepted: bool) {
    let mut fixture = Fixture::new(
        OstraconChain::with_powers(&[3, 3, 2, 1]),
        TrustThreshold::TWO_THIRDS,
    );
    let header = fixture.header(11, GENESIS_HEIGHT, Some(signers));

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert_eq!(result.is_ok(), accepted, "{result:?}");
}

#[test_log::test]
fn resubmitted_header_changes_nothing() {
    let mut fixture = three_validators();
    let header = fixture.header(11, GENESIS_HEIGHT, None);
    let first = fixture
        .update(&header, after(block_time(11), Duration::from_secs(1)))
        .expect("header accepted");
    let stored = fixture.host.clone();

    let second = fixture
        .update(&header, after(block_time(11), Duration::from_secs(30)))
        .expect("resubmission accepted");

    assert_eq!(first, second);
    assert_eq!(fixture.host, stored);
}

#[test_log::test]
fn different_block_at_stored_height_is_rejected() {
    let mut fixture = three_validators();
    let header = fixture.header(11, GENESIS_HEIGHT, None);
    fixture
        .update(&header, after(block_time(11), Duration::from_secs(1)))
        .expect("header accepted");
    let stored = fixture.host.clone();

    let conflicting = fixture.header_with(
        BlockParams::builder()
            .height(11)
            .time(block_time(11))
            .app_hash(b"other-app-hash".to_vec())
            .build(),
        GENESIS_HEIGHT,
    );
    let result = fixture.update(&conflicting, after(block_time(11), Duration::from_secs(2)));

    assert!(matches!(
        result,
        Err(OstraconClientError::ConflictingConsensusState { height }) if height == Height::new(0, 11)
    ));
    assert_eq!(fixture.host, stored);
}

#[test_log::test]
fn latest_height_never_decreases() {
    let mut fixture = three_validators();
    let now = after(block_time(12), Duration::from_secs(1));

    fixture
        .update(&fixture.header(12, GENESIS_HEIGHT, None), now)
        .expect("header at 12 accepted");
    let (client_state, _) = fixture
        .update(&fixture.header(11, GENESIS_HEIGHT, None), now)
        .expect("older header accepted");

    assert_eq!(client_state.latest_height, Height::new(0, 12));
    assert!(fixture
        .store()
        .maybe_consensus_state(&Height::new(0, 11))
        .unwrap()
        .is_some());
}

#[test_log::test]
fn header_must_build_on_a_lower_height() {
    let mut fixture = three_validators();
    let now = after(block_time(12), Duration::from_secs(1));
    fixture
        .update(&fixture.header(12, GENESIS_HEIGHT, None), now)
        .expect("header at 12 accepted");

    let result = fixture.update(&fixture.header(12, 12, None), now);

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidHeaderHeight { .. })
    ));
}

#[test_log::test]
fn header_time_must_follow_trusted_time() {
    let mut fixture = three_validators();
    let header = fixture.header_with(
        BlockParams::builder()
            .height(11)
            .time(genesis_time())
            .build(),
        GENESIS_HEIGHT,
    );

    let result = fixture.update(&header, block_time(11));

    assert!(matches!(result, Err(OstraconClientError::InvalidHeader { .. })));
}

// The default maximum clock drift is 3s.
#[rstest]
#[case::just_inside_drift(Duration::from_millis(3000) - Duration::from_nanos(1), true)]
#[case::at_drift(Duration::from_millis(3000), false)]
#[case::past_drift(Duration::from_millis(3000) + Duration::from_nanos(1), false)]
fn header_from_the_future_is_rejected(#[case] ahead: Duration, #[case] accepted: bool) {
    let mut fixture = three_validators();
    let now = block_time(11);
    let header = fixture.header_with(
        BlockParams::builder()
            .height(11)
            .time(after(now, ahead))
            .build(),
        GENESIS_HEIGHT,
    );

    let result = fixture.update(&header, now);

    if accepted {
        assert!(result.is_ok(), "{result:?}");
    } else {
        assert!(matches!(
            result,
            Err(OstraconClientError::HeaderFromFuture { .. })
        ));
    }
}

#[test_log::test]
fn expired_trusted_state_is_rejected() {
    let mut fixture = three_validators();
    let trusting_period = fixture.client_state().trusting_period;
    let now = after(genesis_time(), trusting_period);
    let header = fixture.header_with(
        BlockParams::builder()
            .height(11)
            .time(after(genesis_time(), trusting_period - Duration::from_secs(1)))
            .build(),
        GENESIS_HEIGHT,
    );

    let result = fixture.update(&header, now);

    assert!(matches!(
        result,
        Err(OstraconClientError::TrustingPeriodExpired { .. })
    ));
}

#[test_log::test]
fn header_for_another_chain_is_rejected() {
    let mut fixture = three_validators();
    let mut other_chain = fixture.chain.clone();
    other_chain.chain_id = "other-0".parse().unwrap();
    let header = other_chain.header(&block(11, None), Height::new(0, GENESIS_HEIGHT));

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(result, Err(OstraconClientError::InvalidHeader { .. })));
}

#[test_log::test]
fn missing_trusted_consensus_state_is_rejected() {
    let mut fixture = three_validators();
    let header = fixture.header(12, 11, None);

    let result = fixture.update(&header, after(block_time(12), Duration::from_secs(1)));

    assert!(matches!(
        result,
        Err(OstraconClientError::ConsensusStateNotFound { height }) if height == Height::new(0, 11)
    ));
}

#[test_log::test]
fn untrusted_validators_are_rejected() {
    let mut fixture = three_validators();
    let mut header = fixture.header(11, GENESIS_HEIGHT, None);
    let impostors = OstraconChain::with_powers(&[1, 1, 1, 1]);
    header.trusted_validators = impostors.validator_set();
    header.trusted_voters = impostors.voter_set();

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(
        result,
        Err(OstraconClientError::InvalidValidatorSet { .. })
    ));
}

#[test_log::test]
fn trusted_voters_must_be_trusted_validators() {
    let mut fixture = three_validators();
    let mut header = fixture.header(11, GENESIS_HEIGHT, None);
    header.trusted_voters =
        ValidatorSet::new(vec![TestValidator::new(42, 1).info().clone()]).unwrap();

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(result, Err(OstraconClientError::InvalidVoterSet { .. })));
}

#[test_log::test]
fn elected_voters_sign_for_the_validator_set() {
    let mut chain = OstraconChain::with_powers(&[10, 10, 10, 10, 1]);
    chain.voters = Some(vec![0, 1, 2, 3]);
    let mut fixture = Fixture::new(chain, TrustThreshold::ONE_THIRD);
    let header = fixture.header(11, GENESIS_HEIGHT, None);

    let (client_state, _) = fixture
        .update(&header, after(block_time(11), Duration::from_secs(1)))
        .expect("voters signed");

    assert_eq!(client_state.latest_height, Height::new(0, 11));
}

#[test_log::test]
fn lone_elected_voter_cannot_sign_for_the_chain() {
    let mut fixture = three_validators();
    let mut forger = fixture.chain.clone();
    forger.voters = Some(vec![0]);
    let header = forger.header(
        &BlockParams::builder()
            .height(11)
            .time(block_time(11))
            .app_hash(b"forged-app-hash".to_vec())
            .build(),
        Height::new(0, GENESIS_HEIGHT),
    );
    let before = fixture.host.clone();

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(
        result,
        Err(OstraconClientError::NotEnoughVotingPower {
            signed: 1,
            total: 3,
            ..
        })
    ));
    assert_eq!(fixture.host, before);
}

#[test_log::test]
fn new_voters_must_carry_their_validator_set() {
    let old_chain = OstraconChain::with_powers(&[1, 1, 1]);
    let mut fixture = Fixture::new(old_chain.clone(), TrustThreshold::ONE_THIRD);

    // two trusted validators are elected out of a grown set and sign alone
    let new_chain = OstraconChain::builder()
        .validators(vec![
            old_chain.validators[0].clone(),
            old_chain.validators[1].clone(),
            TestValidator::new(9, 1),
            TestValidator::new(10, 1),
            TestValidator::new(11, 1),
        ])
        .voters(vec![0, 1])
        .build();
    let mut header = new_chain.header(&block(11, None), Height::new(0, GENESIS_HEIGHT));
    header.trusted_validators = old_chain.validator_set();
    header.trusted_voters = old_chain.voter_set();

    let result = fixture.update(&header, after(block_time(11), Duration::from_secs(1)));

    assert!(matches!(
        result,
        Err(OstraconClientError::NotEnoughVotingPower {
            signed: 2,
            total: 5,
            ..
        })
    ));
}

#[test_log::test]
fn validator_set_change_is_trusted_through_overlap() {
    let old_chain = OstraconChain::with_powers(&[1, 1, 1]);
    let mut fixture = Fixture::new(old_chain.clone(), TrustThreshold::ONE_THIRD);

    // two of the trusted validators stay, a third one joins
    let new_chain = OstraconChain::builder()
        .validators(vec![
            old_chain.validators[0].clone(),
            old_chain.validators[1].clone(),
            TestValidator::new(9, 1),
        ])
        .build();
    let mut header = new_chain.header(&block(15, None), Height::new(0, GENESIS_HEIGHT));
    header.trusted_validators = old_chain.validator_set();
    header.trusted_voters = old_chain.voter_set();

    let (client_state, consensus_state) = fixture
        .update(&header, after(block_time(15), Duration::from_secs(1)))
        .expect("overlap exceeds the trust level");

    assert_eq!(client_state.latest_height, Height::new(0, 15));
    assert_eq!(
        consensus_state.next_validators_hash,
        new_chain.validator_set().hash()
    );

    // the new set signs on its own from now on
    let next = new_chain.header(&block(16, None), Height::new(0, 15));
    fixture
        .update(&next, after(block_time(16), Duration::from_secs(1)))
        .expect("new validator set trusted");
}

#[test_log::test]
fn expired_consensus_states_are_pruned_oldest_first() {
    let mut fixture = three_validators();
    let trusting_period = fixture.client_state().trusting_period;

    fixture
        .update(
            &fixture.header(11, GENESIS_HEIGHT, None),
            after(block_time(11), Duration::from_secs(1)),
        )
        .expect("header at 11 accepted");

    // genesis is now out of the trusting period, the state at 11 is not
    let now = after(genesis_time(), trusting_period + Duration::from_secs(2));
    let header = fixture.header_with(
        BlockParams::builder()
            .height(12)
            .time(after(genesis_time(), trusting_period))
            .build(),
        11,
    );
    fixture.update(&header, now).expect("header at 12 accepted");

    let store = fixture.store();
    assert_eq!(
        store.consensus_state_heights().unwrap(),
        vec![Height::new(0, 11), Height::new(0, 12)]
    );
    assert_eq!(store.processed_time(&Height::new(0, 10)).unwrap(), None);
}
