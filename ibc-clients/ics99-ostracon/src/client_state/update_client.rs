use ibc_client_ostracon_types::error::OstraconClientError;
use ibc_client_ostracon_types::{
    ClientState as ClientStateType, ConsensusState as ConsensusStateType, Header as OstraconHeader,
};
use ibc_primitives::prelude::*;
use tendermint::Time;
use tracing::trace;

use crate::context::ValidationContext;
use crate::verifier::OstraconVerifier;

/// Verifies a header against the consensus state it claims to build on.
///
/// Checks, in order: the client is not frozen, the header is internally
/// consistent and for the client's chain, the trusted validators and voters
/// are the ones the client trusts at `trusted_height`, the trusted state is
/// within the trusting period, the header is newer than it and not from the
/// future, the trusted voters who signed it hold more than the client's trust
/// level of the trusted validators' power, and the header's voters who signed
/// it hold more than two thirds of its validator set's power.
pub fn verify_header<Vf: OstraconVerifier>(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    header: &OstraconHeader,
    now: Time,
) -> Result<(), OstraconClientError> {
    if client_state.is_frozen() {
        return Err(OstraconClientError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }

    header.validate_basic::<Vf::Hasher>()?;

    if header.chain_id().as_str() != client_state.chain_id.as_str() {
        return Err(OstraconClientError::InvalidHeader {
            description: format!(
                "header is for chain {}, client tracks {}",
                header.chain_id(),
                client_state.chain_id
            ),
        });
    }

    let trusted_consensus_state = ctx.consensus_state(&header.trusted_height)?;

    check_trusted_validators::<Vf>(client_state, ctx, header, &trusted_consensus_state)?;

    check_trusting_period(client_state, &trusted_consensus_state, now)?;

    let height = header.height();
    if height <= header.trusted_height {
        return Err(OstraconClientError::InvalidHeaderHeight {
            description: format!(
                "header height {height} is not above trusted height {}",
                header.trusted_height
            ),
        });
    }

    if header.timestamp() <= trusted_consensus_state.timestamp() {
        return Err(OstraconClientError::InvalidHeader {
            description: format!(
                "header time {} is not after trusted time {}",
                header.timestamp(),
                trusted_consensus_state.timestamp()
            ),
        });
    }

    let max_allowed = (now + client_state.max_clock_drift).map_err(|_| {
        OstraconClientError::InvalidHeader {
            description: "current time plus clock drift overflows".to_string(),
        }
    })?;
    if header.timestamp() >= max_allowed {
        return Err(OstraconClientError::HeaderFromFuture {
            header_time: header.timestamp(),
            max_allowed,
        });
    }

    header.verify_trusted_commit::<Vf::SignatureVerifier>(client_state.trust_level)?;
    trace!(%height, trust_level = %client_state.trust_level, "trusted validators signed header");

    header.verify_self_commit::<Vf::SignatureVerifier>()?;
    trace!(%height, "header validator set signed header");

    Ok(())
}

/// Checks that the header's trusted validators are the set the client
/// trusts at `trusted_height`, and that its trusted voters were elected from
/// them.
///
/// The trusted validators must hash to the trusted consensus state's next
/// validators hash. When the header builds on the client's latest height,
/// the hash of the validators that signed the header stored there is
/// accepted too.
pub fn check_trusted_validators<Vf: OstraconVerifier>(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    header: &OstraconHeader,
    trusted_consensus_state: &ConsensusStateType,
) -> Result<(), OstraconClientError> {
    let trusted_validators_hash = header.trusted_validators.hash_with::<Vf::Hasher>();

    let binds = if trusted_validators_hash == trusted_consensus_state.next_validators_hash {
        true
    } else if header.trusted_height == client_state.latest_height {
        ctx.validators_hash(&header.trusted_height)?
            .is_some_and(|stored| stored == trusted_validators_hash)
    } else {
        false
    };
    if !binds {
        return Err(OstraconClientError::InvalidValidatorSet {
            description: format!(
                "trusted validators hash {trusted_validators_hash} does not match the validators trusted at {}",
                header.trusted_height
            ),
        });
    }

    if !header
        .trusted_voters
        .is_subset_of(&header.trusted_validators)
    {
        return Err(OstraconClientError::InvalidVoterSet {
            description: "trusted voters are not a subset of the trusted validators".to_string(),
        });
    }

    Ok(())
}

/// Fails with `TrustingPeriodExpired` once the trusting period has elapsed
/// since the trusted consensus state's timestamp.
pub fn check_trusting_period(
    client_state: &ClientStateType,
    trusted_consensus_state: &ConsensusStateType,
    now: Time,
) -> Result<(), OstraconClientError> {
    let trusted_time = trusted_consensus_state.timestamp();
    if client_state.is_expired(trusted_time, now) {
        return Err(OstraconClientError::TrustingPeriodExpired {
            trusted_time,
            elapsed: ibc_primitives::elapsed_since(now, trusted_time),
            trusting_period: client_state.trusting_period,
        });
    }
    Ok(())
}
