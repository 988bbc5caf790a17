//! Merkle paths and ICS-23 Merkle proofs.
//!
//! A proof for a path of `n` keys is a chain of `n` ICS-23 proofs ordered
//! from the innermost subtree outwards: `proofs[0]` proves the value under
//! the last key in the innermost store, and every following proof shows the
//! root computed so far is committed under the next key towards the root,
//! with the final computed root being the consensus state's root.

use ibc_primitives::prelude::*;
use ibc_proto::ibc::core::commitment::v1::MerkleProof as RawMerkleProof;
use ibc_proto::ics23::commitment_proof::Proof;
use ibc_proto::ics23::{
    calculate_existence_root, verify_membership, verify_non_membership, CommitmentProof,
    HostFunctionsProvider, NonExistenceProof, ProofSpec,
};
use ibc_proto::Protobuf;

use crate::commitment::{CommitmentPrefix, CommitmentRoot};
use crate::error::CommitmentError;
use crate::specs::ProofSpecs;

/// Keys from the outermost store down to the leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    pub key_path: Vec<Vec<u8>>,
}

impl MerklePath {
    pub fn new(key_path: Vec<Vec<u8>>) -> Self {
        Self { key_path }
    }
}

/// Prepends the counterparty's store prefix to a path within its IBC store.
pub fn apply_prefix(prefix: &CommitmentPrefix, path: MerklePath) -> MerklePath {
    let mut key_path = Vec::with_capacity(path.key_path.len() + 1);
    key_path.push(prefix.as_bytes().to_vec());
    key_path.extend(path.key_path);
    MerklePath { key_path }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

impl Protobuf<RawMerkleProof> for MerkleProof {}

impl TryFrom<RawMerkleProof> for MerkleProof {
    type Error = CommitmentError;

    fn try_from(proof: RawMerkleProof) -> Result<Self, Self::Error> {
        Ok(Self {
            proofs: proof.proofs,
        })
    }
}

impl From<MerkleProof> for RawMerkleProof {
    fn from(proof: MerkleProof) -> Self {
        Self {
            proofs: proof.proofs,
        }
    }
}

impl MerkleProof {
    /// Verifies that `value` is stored under `path` in the state committed
    /// to by `root`.
    pub fn verify_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
        value: Vec<u8>,
    ) -> Result<(), CommitmentError> {
        if value.is_empty() {
            return Err(CommitmentError::EmptyVerifiedValue);
        }
        let specs = self.check_shape(specs, root, path)?;

        self.verify_existence_chain::<H>(&specs, root, path, value, 0)
    }

    /// Verifies that nothing is stored under `path` in the state committed
    /// to by `root`.
    pub fn verify_non_membership<H: HostFunctionsProvider>(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<(), CommitmentError> {
        let specs = self.check_shape(specs, root, path)?;

        let (proof, spec, key) = match (
            self.proofs.first(),
            specs.first(),
            path.key_path.last(),
        ) {
            (Some(proof), Some(spec), Some(key)) => (proof, spec, key),
            _ => return Err(CommitmentError::EmptyMerkleProof),
        };

        let Some(Proof::Nonexist(non_existence_proof)) = &proof.proof else {
            return Err(CommitmentError::InvalidMerkleProof {
                description: "innermost proof is not a non-existence proof".into(),
            });
        };

        let subroot = calculate_non_existence_root::<H>(non_existence_proof)?;
        if !verify_non_membership::<H>(proof, spec, &subroot, key) {
            return Err(CommitmentError::VerificationFailure);
        }

        // the innermost subroot must itself be committed under the
        // remaining keys
        self.verify_existence_chain::<H>(&specs, root, path, subroot, 1)
    }

    fn check_shape(
        &self,
        specs: &ProofSpecs,
        root: &CommitmentRoot,
        path: &MerklePath,
    ) -> Result<Vec<ProofSpec>, CommitmentError> {
        if self.proofs.is_empty() {
            return Err(CommitmentError::EmptyMerkleProof);
        }
        if root.is_empty() {
            return Err(CommitmentError::EmptyMerkleRoot);
        }
        let specs = Vec::<ProofSpec>::from(specs.clone());
        if specs.len() != self.proofs.len() {
            return Err(CommitmentError::NumberOfSpecsMismatch {
                proofs: self.proofs.len(),
                specs: specs.len(),
            });
        }
        if path.key_path.len() != self.proofs.len() {
            return Err(CommitmentError::NumberOfKeysMismatch {
                proofs: self.proofs.len(),
                keys: path.key_path.len(),
            });
        }
        Ok(specs)
    }

    fn verify_existence_chain<H: HostFunctionsProvider>(
        &self,
        specs: &[ProofSpec],
        root: &CommitmentRoot,
        path: &MerklePath,
        mut value: Vec<u8>,
        start_index: usize,
    ) -> Result<(), CommitmentError> {
        // keys run root-to-leaf while proofs run leaf-to-root
        let links = self
            .proofs
            .iter()
            .zip(specs)
            .zip(path.key_path.iter().rev())
            .skip(start_index);

        for ((proof, spec), key) in links {
            let Some(Proof::Exist(existence_proof)) = &proof.proof else {
                return Err(CommitmentError::InvalidMerkleProof {
                    description: "expected an existence proof".into(),
                });
            };

            let subroot = calculate_existence_root::<H>(existence_proof).map_err(|e| {
                CommitmentError::InvalidMerkleProof {
                    description: e.to_string(),
                }
            })?;

            if !verify_membership::<H>(proof, spec, &subroot, key, &value) {
                return Err(CommitmentError::VerificationFailure);
            }
            value = subroot;
        }

        if root.as_bytes() != value.as_slice() {
            return Err(CommitmentError::VerificationFailure);
        }

        Ok(())
    }
}

fn calculate_non_existence_root<H: HostFunctionsProvider>(
    proof: &NonExistenceProof,
) -> Result<Vec<u8>, CommitmentError> {
    let neighbour = proof
        .left
        .as_ref()
        .or(proof.right.as_ref())
        .ok_or_else(|| CommitmentError::InvalidMerkleProof {
            description: "non-existence proof has no neighbours".into(),
        })?;

    calculate_existence_root::<H>(neighbour).map_err(|e| CommitmentError::InvalidMerkleProof {
        description: e.to_string(),
    })
}
