use ibc_client_ostracon_types::error::OstraconClientError;
use ibc_client_ostracon_types::{
    ClientState as ClientStateType, ConsensusState as ConsensusStateType,
};
use ibc_core_client_types::{Height, Status};
use ibc_core_commitment_types::commitment::{CommitmentPrefix, CommitmentProofBytes};
use ibc_core_commitment_types::merkle::{apply_prefix, MerklePath, MerkleProof};
use ibc_core_commitment_types::proto::ics23::HostFunctionsManager;
use ibc_primitives::prelude::*;
use tendermint::Time;

use crate::context::ValidationContext;

/// Frozen clients stay frozen; otherwise a client is expired once its
/// latest consensus state left the trusting period, or when none is stored.
pub fn status(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    now: Time,
) -> Result<Status, OstraconClientError> {
    if client_state.is_frozen() {
        return Ok(Status::Frozen);
    }

    let Some(latest_consensus_state) = ctx.maybe_consensus_state(&client_state.latest_height)?
    else {
        return Ok(Status::Expired);
    };

    if client_state.is_expired(latest_consensus_state.timestamp(), now) {
        return Ok(Status::Expired);
    }

    Ok(Status::Active)
}

/// Verifies that `value` is committed under `prefix`/`path` in the
/// counterparty state at `height`.
pub fn verify_membership(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Vec<u8>,
    value: Vec<u8>,
) -> Result<(), OstraconClientError> {
    let consensus_state = proof_consensus_state(client_state, ctx, height)?;
    let merkle_path = apply_prefix(prefix, MerklePath::new(vec![path]));
    let merkle_proof = MerkleProof::try_from(proof)?;

    merkle_proof.verify_membership::<HostFunctionsManager>(
        &client_state.proof_specs,
        consensus_state.root(),
        &merkle_path,
        value,
    )?;

    Ok(())
}

/// Verifies that nothing is committed under `prefix`/`path` in the
/// counterparty state at `height`.
pub fn verify_non_membership(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    height: Height,
    prefix: &CommitmentPrefix,
    proof: &CommitmentProofBytes,
    path: Vec<u8>,
) -> Result<(), OstraconClientError> {
    let consensus_state = proof_consensus_state(client_state, ctx, height)?;
    let merkle_path = apply_prefix(prefix, MerklePath::new(vec![path]));
    let merkle_proof = MerkleProof::try_from(proof)?;

    merkle_proof.verify_non_membership::<HostFunctionsManager>(
        &client_state.proof_specs,
        consensus_state.root(),
        &merkle_path,
    )?;

    Ok(())
}

fn proof_consensus_state(
    client_state: &ClientStateType,
    ctx: &impl ValidationContext,
    height: Height,
) -> Result<ConsensusStateType, OstraconClientError> {
    if client_state.is_frozen() {
        return Err(OstraconClientError::ClientFrozen {
            frozen_height: client_state.frozen_height,
        });
    }

    if height > client_state.latest_height {
        return Err(OstraconClientError::InvalidHeight {
            description: format!(
                "proof height {height} is above the client's latest height {}",
                client_state.latest_height
            ),
        });
    }

    ctx.consensus_state(&height)
}
