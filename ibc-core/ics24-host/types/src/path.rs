//! Key layout of the Ostracon client store.
//!
//! Every key below is relative to the per-client prefix
//! `clients/{client_id}/` returned by [`client_store_prefix`]; the host
//! hands the light client a store view already scoped to that prefix.

use ibc_primitives::prelude::*;

use crate::identifiers::ClientId;

pub const CLIENT_PREFIX: &str = "clients";
pub const CLIENT_STATE: &str = "clientState";
pub const CONSENSUS_STATE_PREFIX: &str = "consensusStates";
pub const ITERATE_CONSENSUS_STATE_PREFIX: &str = "iterateConsensusStates";
pub const PROCESSED_TIME: &str = "processedTime";
pub const VALIDATORS_HASH: &str = "validatorsHash";

/// `clients/{client_id}/`
pub fn client_store_prefix(client_id: &ClientId) -> Vec<u8> {
    format!("{CLIENT_PREFIX}/{client_id}/").into_bytes()
}

/// `clientState`
pub fn client_state_key() -> Vec<u8> {
    CLIENT_STATE.as_bytes().to_vec()
}

/// `consensusStates/{revision_number}-{revision_height}`
pub fn consensus_state_key(revision_number: u64, revision_height: u64) -> Vec<u8> {
    format!("{CONSENSUS_STATE_PREFIX}/{revision_number}-{revision_height}").into_bytes()
}

/// `consensusStates/{revision_number}-{revision_height}/processedTime`
pub fn processed_time_key(revision_number: u64, revision_height: u64) -> Vec<u8> {
    format!("{CONSENSUS_STATE_PREFIX}/{revision_number}-{revision_height}/{PROCESSED_TIME}")
        .into_bytes()
}

/// `consensusStates/{revision_number}-{revision_height}/validatorsHash`
pub fn validators_hash_key(revision_number: u64, revision_height: u64) -> Vec<u8> {
    format!("{CONSENSUS_STATE_PREFIX}/{revision_number}-{revision_height}/{VALIDATORS_HASH}")
        .into_bytes()
}

/// Iteration key of a consensus state,
/// `iterateConsensusStates{BigEndianRevision}{BigEndianHeight}`.
///
/// Big-endian encoding makes lexicographic key order equal to height
/// order, so a prefix scan over [`ITERATE_CONSENSUS_STATE_PREFIX`] walks the
/// stored heights from oldest to newest.
pub fn iteration_key(revision_number: u64, revision_height: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(ITERATE_CONSENSUS_STATE_PREFIX.len() + 16);
    key.extend_from_slice(ITERATE_CONSENSUS_STATE_PREFIX.as_bytes());
    key.extend(revision_number.to_be_bytes());
    key.extend(revision_height.to_be_bytes());
    key
}

/// Recovers `(revision_number, revision_height)` from an iteration key.
pub fn parse_iteration_key(key: &[u8]) -> Option<(u64, u64)> {
    let encoded = key.strip_prefix(ITERATE_CONSENSUS_STATE_PREFIX.as_bytes())?;
    if encoded.len() != 16 {
        return None;
    }
    let (revision_number, revision_height) = encoded.split_at(8);
    Some((
        u64::from_be_bytes(revision_number.try_into().ok()?),
        u64::from_be_bytes(revision_height.try_into().ok()?),
    ))
}
