use ibc_client_ostracon_types::error::OstraconClientError;
use ibc_client_ostracon_types::{
    ClientState as ClientStateType, Header as OstraconHeader, Misbehaviour as OstraconMisbehaviour,
};
use ibc_primitives::prelude::*;
use tendermint::Time;
use tracing::trace;

use super::update_client::{check_trusted_validators, check_trusting_period};
use crate::context::ValidationContext;
use crate::verifier::OstraconVerifier;

/// Determines whether both headers of a misbehaviour would have convinced
/// the light client, each from its own trusted consensus state.
pub fn verify_misbehaviour<Vf: OstraconVerifier>(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    misbehaviour: &OstraconMisbehaviour,
    now: Time,
) -> Result<(), OstraconClientError> {
    if client_state.is_frozen() {
        return Err(OstraconClientError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }

    misbehaviour.validate_basic::<Vf::Hasher, Vf::SignatureVerifier>()?;

    let header_1 = misbehaviour.header1();
    let header_2 = misbehaviour.header2();

    if header_1.chain_id().as_str() != client_state.chain_id.as_str() {
        return Err(OstraconClientError::InvalidMisbehaviour {
            description: format!(
                "headers are for chain {}, client tracks {}",
                header_1.chain_id(),
                client_state.chain_id
            ),
        });
    }

    let trusted_consensus_state_1 = ctx.consensus_state(&header_1.trusted_height)?;
    let trusted_consensus_state_2 = ctx.consensus_state(&header_2.trusted_height)?;

    for (header, trusted_consensus_state) in [
        (header_1, &trusted_consensus_state_1),
        (header_2, &trusted_consensus_state_2),
    ] {
        check_trusted_validators::<Vf>(client_state, ctx, header, trusted_consensus_state)?;
        header.verify_trusted_commit::<Vf::SignatureVerifier>(client_state.trust_level)?;
        trace!(height = %header.height(), "trusted validators signed misbehaving header");
    }

    check_trusting_period(client_state, &trusted_consensus_state_1, now)?;
    check_trusting_period(client_state, &trusted_consensus_state_2, now)?;

    Ok(())
}

/// Whether two verified headers conflict: two different blocks at one
/// height, or a higher block whose time is not after the lower one's.
pub fn check_for_misbehaviour(header_1: &OstraconHeader, header_2: &OstraconHeader) -> bool {
    if header_1.height() == header_2.height() {
        // The same header submitted twice is evidence of nothing.
        header_1.signed_header.commit.block_id.hash != header_2.signed_header.commit.block_id.hash
    } else {
        // `header_1` is the higher one, so it must also be the later one.
        header_1.timestamp() <= header_2.timestamp()
    }
}
