//! An in-memory host store.

use core::fmt::{Debug, Formatter};

use ibc_client_ostracon::context::{KvStore, PrefixedStore};
use ibc_client_ostracon::types::error::OstraconClientError;
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::ClientId;
use ibc_core_host_types::path::{client_state_key, consensus_state_key};
use ibc_primitives::prelude::*;

use crate::clients::{AnyClientState, AnyConsensusState};

/// A sorted, in-memory key-value store shared by every client of a host.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MockStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store of a single client, scoped under `clients/{client_id}/`.
    pub fn client_store(&mut self, client_id: &ClientId) -> PrefixedStore<'_, Self> {
        PrefixedStore::new(self, client_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    /// The client state of `client_id`, whatever its client type.
    pub fn any_client_state(
        &mut self,
        client_id: &ClientId,
    ) -> Result<Option<AnyClientState>, OstraconClientError> {
        self.client_store(client_id)
            .get(&client_state_key())
            .map(|bytes| AnyClientState::decode_stored(&bytes))
            .transpose()
    }

    /// The consensus state of `client_id` at `height`, whatever its client
    /// type.
    pub fn any_consensus_state(
        &mut self,
        client_id: &ClientId,
        height: Height,
    ) -> Result<Option<AnyConsensusState>, OstraconClientError> {
        self.client_store(client_id)
            .get(&consensus_state_key(
                height.revision_number(),
                height.revision_height(),
            ))
            .map(|bytes| AnyConsensusState::decode_stored(&bytes))
            .transpose()
    }
}

impl KvStore for MockStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn remove(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Lists the keys, which are readable paths; values are opaque.
impl Debug for MockStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .keys()
                    .map(|key| String::from_utf8_lossy(key).into_owned()),
            )
            .finish()
    }
}
