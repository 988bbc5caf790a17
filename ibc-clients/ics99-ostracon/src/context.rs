//! The storage a host provides to the Ostracon client.
//!
//! A host implements [`KvStore`] for its store. The client only ever sees
//! the store of a single client: either the host scopes it itself or wraps
//! it in a [`PrefixedStore`]. Typed access to client and consensus states
//! comes from [`ValidationContext`] and [`ExecutionContext`], which every
//! [`KvStore`] implements.

use alloc::collections::btree_map::{self, BTreeMap};

use ibc_client_ostracon_types::error::OstraconClientError;
use ibc_client_ostracon_types::{
    ClientState as ClientStateType, ConsensusState as ConsensusStateType,
};
use ibc_core_client_types::Height;
use ibc_core_host_types::error::DecodingError;
use ibc_core_host_types::identifiers::ClientId;
use ibc_core_host_types::path::{
    client_state_key, client_store_prefix, consensus_state_key, iteration_key,
    parse_iteration_key, processed_time_key, validators_hash_key, ITERATE_CONSENSUS_STATE_PREFIX,
};
use ibc_primitives::prelude::*;
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::{time_from_unix_nanos, unix_nanos};
use tendermint::hash::Algorithm;
use tendermint::{Hash, Time};

/// Byte-keyed storage.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn remove(&mut self, key: &[u8]);

    /// Returns every entry whose key starts with `prefix`, in ascending key
    /// order.
    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        (**self).remove(key)
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        (**self).prefix_iter(prefix)
    }
}

/// Scopes a host-wide store to the `clients/{client_id}/` keys of one
/// client.
pub struct PrefixedStore<'a, S: ?Sized> {
    store: &'a mut S,
    prefix: Vec<u8>,
}

impl<'a, S: KvStore + ?Sized> PrefixedStore<'a, S> {
    pub fn new(store: &'a mut S, client_id: &ClientId) -> Self {
        Self {
            store,
            prefix: client_store_prefix(client_id),
        }
    }

    fn prefixed_key(&self, key: &[u8]) -> Vec<u8> {
        let mut prefixed = Vec::with_capacity(self.prefix.len() + key.len());
        prefixed.extend_from_slice(&self.prefix);
        prefixed.extend_from_slice(key);
        prefixed
    }
}

impl<S: KvStore + ?Sized> KvStore for PrefixedStore<'_, S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(&self.prefixed_key(key))
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        let key = self.prefixed_key(&key);
        self.store.set(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        let key = self.prefixed_key(key);
        self.store.remove(&key)
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let prefix_len = self.prefix.len();
        self.store
            .prefix_iter(&self.prefixed_key(prefix))
            .into_iter()
            .map(|(key, value)| (key[prefix_len..].to_vec(), value))
            .collect()
    }
}

/// Buffers writes on top of a store until [`CacheStore::commit`] applies
/// them. Dropping a `CacheStore` discards its writes.
pub struct CacheStore<'a, S: ?Sized> {
    parent: &'a mut S,
    // `None` marks a removed key.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            pending: BTreeMap::new(),
        }
    }

    /// Writes the buffered changes to the parent store.
    pub fn commit(self) {
        for (key, value) in self.pending {
            match value {
                Some(value) => self.parent.set(key, value),
                None => self.parent.remove(&key),
            }
        }
    }
}

impl<S: KvStore + ?Sized> KvStore for CacheStore<'_, S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(value) => value.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.pending.insert(key, Some(value));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.prefix_iter(prefix).into_iter().collect();

        let pending = self
            .pending
            .range::<[u8], _>((core::ops::Bound::Included(prefix), core::ops::Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix));
        for (key, value) in pending {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    if let btree_map::Entry::Occupied(entry) = merged.entry(key.clone()) {
                        entry.remove();
                    }
                }
            }
        }

        merged.into_iter().collect()
    }
}

/// Client's context required during validation
pub trait ValidationContext {
    fn client_state(&self) -> Result<ClientStateType, OstraconClientError>;

    /// Fails with `ConsensusStateNotFound` when no consensus state is stored
    /// at `height`.
    fn consensus_state(&self, height: &Height) -> Result<ConsensusStateType, OstraconClientError>;

    fn maybe_consensus_state(
        &self,
        height: &Height,
    ) -> Result<Option<ConsensusStateType>, OstraconClientError>;

    /// Returns all the heights at which a consensus state is stored, oldest
    /// first.
    fn consensus_state_heights(&self) -> Result<Vec<Height>, OstraconClientError>;

    /// Host time at which the consensus state at `height` was stored.
    fn processed_time(&self, height: &Height) -> Result<Option<Time>, OstraconClientError>;

    /// Hash of the validator set that signed the header stored at `height`.
    /// Absent for the consensus state a client was created with.
    fn validators_hash(&self, height: &Height) -> Result<Option<Hash>, OstraconClientError>;
}

/// Client's context required during execution.
pub trait ExecutionContext: ValidationContext {
    fn store_client_state(&mut self, client_state: ClientStateType);

    /// Stores a consensus state and indexes its height.
    fn store_consensus_state(&mut self, height: Height, consensus_state: ConsensusStateType);

    fn store_update_meta(
        &mut self,
        height: Height,
        processed_time: Time,
        validators_hash: Option<Hash>,
    );

    /// Deletes a consensus state along with its metadata and index entry.
    fn delete_consensus_state(&mut self, height: Height);
}

impl<S: KvStore + ?Sized> ValidationContext for S {
    fn client_state(&self) -> Result<ClientStateType, OstraconClientError> {
        let bytes = self
            .get(&client_state_key())
            .ok_or(OstraconClientError::ClientStateNotFound)?;
        Ok(<ClientStateType as Protobuf<Any>>::decode_vec(&bytes)?)
    }

    fn consensus_state(&self, height: &Height) -> Result<ConsensusStateType, OstraconClientError> {
        self.maybe_consensus_state(height)?
            .ok_or(OstraconClientError::ConsensusStateNotFound { height: *height })
    }

    fn maybe_consensus_state(
        &self,
        height: &Height,
    ) -> Result<Option<ConsensusStateType>, OstraconClientError> {
        self.get(&consensus_state_key(
            height.revision_number(),
            height.revision_height(),
        ))
        .map(|bytes| <ConsensusStateType as Protobuf<Any>>::decode_vec(&bytes))
        .transpose()
        .map_err(Into::into)
    }

    fn consensus_state_heights(&self) -> Result<Vec<Height>, OstraconClientError> {
        self.prefix_iter(ITERATE_CONSENSUS_STATE_PREFIX.as_bytes())
            .into_iter()
            .map(|(key, _)| {
                parse_iteration_key(&key)
                    .map(|(revision_number, revision_height)| {
                        Height::new(revision_number, revision_height)
                    })
                    .ok_or_else(|| {
                        OstraconClientError::from(DecodingError::InvalidRawData {
                            description: "malformed consensus state iteration key".to_string(),
                        })
                    })
            })
            .collect()
    }

    fn processed_time(&self, height: &Height) -> Result<Option<Time>, OstraconClientError> {
        let Some(bytes) = self.get(&processed_time_key(
            height.revision_number(),
            height.revision_height(),
        )) else {
            return Ok(None);
        };
        let nanos = <[u8; 8]>::try_from(bytes.as_slice()).map_err(|_| {
            DecodingError::InvalidRawData {
                description: "processed time is not a big-endian u64".to_string(),
            }
        })?;
        time_from_unix_nanos(u64::from_be_bytes(nanos))
            .map(Some)
            .map_err(|e| {
                OstraconClientError::from(DecodingError::InvalidRawData {
                    description: format!("invalid processed time: {e}"),
                })
            })
    }

    fn validators_hash(&self, height: &Height) -> Result<Option<Hash>, OstraconClientError> {
        self.get(&validators_hash_key(
            height.revision_number(),
            height.revision_height(),
        ))
        .map(|bytes| {
            Hash::from_bytes(Algorithm::Sha256, &bytes).map_err(|e| {
                OstraconClientError::from(DecodingError::InvalidHash {
                    description: e.to_string(),
                })
            })
        })
        .transpose()
    }
}

impl<S: KvStore + ?Sized> ExecutionContext for S {
    fn store_client_state(&mut self, client_state: ClientStateType) {
        self.set(
            client_state_key(),
            Protobuf::<Any>::encode_vec(client_state),
        );
    }

    fn store_consensus_state(&mut self, height: Height, consensus_state: ConsensusStateType) {
        let (revision_number, revision_height) =
            (height.revision_number(), height.revision_height());
        self.set(
            consensus_state_key(revision_number, revision_height),
            Protobuf::<Any>::encode_vec(consensus_state),
        );
        self.set(
            iteration_key(revision_number, revision_height),
            height.to_string().into_bytes(),
        );
    }

    fn store_update_meta(
        &mut self,
        height: Height,
        processed_time: Time,
        validators_hash: Option<Hash>,
    ) {
        let (revision_number, revision_height) =
            (height.revision_number(), height.revision_height());
        self.set(
            processed_time_key(revision_number, revision_height),
            unix_nanos(processed_time).to_be_bytes().to_vec(),
        );
        if let Some(validators_hash) = validators_hash {
            self.set(
                validators_hash_key(revision_number, revision_height),
                validators_hash.as_bytes().to_vec(),
            );
        }
    }

    fn delete_consensus_state(&mut self, height: Height) {
        let (revision_number, revision_height) =
            (height.revision_number(), height.revision_height());
        self.remove(&consensus_state_key(revision_number, revision_height));
        self.remove(&processed_time_key(revision_number, revision_height));
        self.remove(&validators_hash_key(revision_number, revision_height));
        self.remove(&iteration_key(revision_number, revision_height));
    }
}
