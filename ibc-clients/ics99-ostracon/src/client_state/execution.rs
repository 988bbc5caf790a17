use ibc_client_ostracon_types::error::OstraconClientError;
use ibc_client_ostracon_types::{
    ClientState as ClientStateType, ConsensusState as ConsensusStateType, Header as OstraconHeader,
    Misbehaviour as OstraconMisbehaviour, FROZEN_HEIGHT,
};
use ibc_primitives::prelude::*;
use tendermint::Time;
use tracing::{debug, trace, warn};

use super::misbehaviour::{check_for_misbehaviour, verify_misbehaviour};
use super::update_client::verify_header;
use crate::context::{CacheStore, ExecutionContext, KvStore};
use crate::verifier::{DefaultVerifier, OstraconVerifier};

/// Seeds the client store with the initial client and consensus states.
///
/// No header is verified: the creator of the client vouches for both
/// states.
pub fn initialise<S: KvStore + ?Sized>(
    store: &mut S,
    client_state: &ClientStateType,
    consensus_state: &ConsensusStateType,
    now: Time,
) -> Result<(), OstraconClientError> {
    client_state.validate()?;
    if client_state.is_frozen() {
        return Err(OstraconClientError::InvalidClientState {
            description: "a new client must not be frozen".to_string(),
        });
    }
    consensus_state.validate()?;

    let latest_height = client_state.latest_height;
    store.store_client_state(client_state.clone());
    store.store_consensus_state(latest_height, consensus_state.clone());
    store.store_update_meta(latest_height, now, None);

    debug!(chain_id = %client_state.chain_id, %latest_height, "client initialised");

    Ok(())
}

/// Verifies `header` and, when it is valid, stores its consensus state and
/// advances the client's latest height.
///
/// Returns the resulting client and consensus states. On any error the store
/// is left unchanged.
pub fn check_header_and_update_state<S: KvStore + ?Sized>(
    client_state: &ClientStateType,
    store: &mut S,
    header: &OstraconHeader,
    now: Time,
) -> Result<(ClientStateType, ConsensusStateType), OstraconClientError> {
    check_header_and_update_state_with::<DefaultVerifier, S>(client_state, store, header, now)
}

/// [`check_header_and_update_state`] with host provided cryptography.
pub fn check_header_and_update_state_with<Vf, S>(
    client_state: &ClientStateType,
    store: &mut S,
    header: &OstraconHeader,
    now: Time,
) -> Result<(ClientStateType, ConsensusStateType), OstraconClientError>
where
    Vf: OstraconVerifier,
    S: KvStore + ?Sized,
{
    let mut cache = CacheStore::new(store);

    verify_header::<Vf>(client_state, &cache, header, now)?;

    let (new_client_state, new_consensus_state) =
        match update_state::<Vf>(client_state, &mut cache, header, now)? {
            UpdateOutcome::Stored {
                client_state,
                consensus_state,
            } => {
                prune_oldest_consensus_states(&client_state, &mut cache, now)?;
                (client_state, consensus_state)
            }
            UpdateOutcome::Duplicate { consensus_state } => {
                (client_state.clone(), consensus_state)
            }
        };

    cache.commit();

    Ok((new_client_state, new_consensus_state))
}

/// Verifies `misbehaviour` and, when it proves the counterparty chain
/// misbehaved, freezes the client.
///
/// Returns the frozen client state. On any error, including a pair of
/// headers that do not conflict, the store is left unchanged.
pub fn check_misbehaviour_and_update_state<S: KvStore + ?Sized>(
    client_state: &ClientStateType,
    store: &mut S,
    misbehaviour: &OstraconMisbehaviour,
    now: Time,
) -> Result<ClientStateType, OstraconClientError> {
    check_misbehaviour_and_update_state_with::<DefaultVerifier, S>(
        client_state,
        store,
        misbehaviour,
        now,
    )
}

/// [`check_misbehaviour_and_update_state`] with host provided cryptography.
pub fn check_misbehaviour_and_update_state_with<Vf, S>(
    client_state: &ClientStateType,
    store: &mut S,
    misbehaviour: &OstraconMisbehaviour,
    now: Time,
) -> Result<ClientStateType, OstraconClientError>
where
    Vf: OstraconVerifier,
    S: KvStore + ?Sized,
{
    let mut cache = CacheStore::new(store);

    verify_misbehaviour::<Vf>(client_state, &cache, misbehaviour, now)?;

    if !check_for_misbehaviour(misbehaviour.header1(), misbehaviour.header2()) {
        return Err(OstraconClientError::InvalidMisbehaviour {
            description: format!(
                "headers at {} and {} do not conflict",
                misbehaviour.header1().height(),
                misbehaviour.header2().height()
            ),
        });
    }

    let frozen_client_state = update_on_misbehaviour(client_state, &mut cache);
    warn!(
        chain_id = %client_state.chain_id,
        %misbehaviour,
        "client frozen on misbehaviour"
    );

    cache.commit();

    Ok(frozen_client_state)
}

/// What [`update_state`] did with a verified header.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    /// The header's consensus state was stored.
    Stored {
        client_state: ClientStateType,
        consensus_state: ConsensusStateType,
    },
    /// The same consensus state was already stored at the header's height;
    /// nothing was written.
    Duplicate { consensus_state: ConsensusStateType },
}

/// Stores the consensus state of a verified header, together with its
/// metadata, and the client state with the latest height advanced.
///
/// A consensus state already stored at the header's height is never
/// overwritten: an identical one makes this a no-op, a different one is a
/// `ConflictingConsensusState` error.
pub fn update_state<Vf: OstraconVerifier>(
    client_state: &ClientStateType,
    ctx: &mut impl ExecutionContext,
    header: &OstraconHeader,
    now: Time,
) -> Result<UpdateOutcome, OstraconClientError> {
    let header_height = header.height();
    let header_consensus_state = header.consensus_state();

    if let Some(existing) = ctx.maybe_consensus_state(&header_height)? {
        if existing != header_consensus_state {
            return Err(OstraconClientError::ConflictingConsensusState {
                height: header_height,
            });
        }
        trace!(height = %header_height, "consensus state already stored");
        return Ok(UpdateOutcome::Duplicate {
            consensus_state: existing,
        });
    }

    let new_client_state = client_state.clone().with_header(header);

    ctx.store_consensus_state(header_height, header_consensus_state.clone());
    ctx.store_update_meta(
        header_height,
        now,
        Some(header.validator_set.hash_with::<Vf::Hasher>()),
    );
    ctx.store_client_state(new_client_state.clone());

    debug!(
        height = %header_height,
        latest_height = %new_client_state.latest_height,
        "consensus state stored"
    );

    Ok(UpdateOutcome::Stored {
        client_state: new_client_state,
        consensus_state: header_consensus_state,
    })
}

/// Commits the frozen client state to the store. Every frozen client is
/// frozen at [`FROZEN_HEIGHT`]; stored consensus states are kept.
pub fn update_on_misbehaviour(
    client_state: &ClientStateType,
    ctx: &mut impl ExecutionContext,
) -> ClientStateType {
    let frozen_client_state = client_state.clone().with_frozen_height(FROZEN_HEIGHT);
    ctx.store_client_state(frozen_client_state.clone());
    frozen_client_state
}

/// Removes consensus states, oldest first, whose trusting period has
/// elapsed at `now`. The consensus state at the latest height is always
/// kept.
pub fn prune_oldest_consensus_states(
    client_state: &ClientStateType,
    ctx: &mut impl ExecutionContext,
    now: Time,
) -> Result<(), OstraconClientError> {
    for height in ctx.consensus_state_heights()? {
        if height >= client_state.latest_height {
            break;
        }

        let consensus_state = ctx.consensus_state(&height)?;
        if !client_state.is_expired(consensus_state.timestamp(), now) {
            break;
        }

        ctx.delete_consensus_state(height);
        trace!(%height, "pruned expired consensus state");
    }

    Ok(())
}
