//! Proofs of values committed by a two-level store: a module store whose
//! root is committed under the prefix key in the chain's app hash.

use ibc_core_commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
use ibc_core_commitment_types::merkle::MerkleProof;
use ibc_core_commitment_types::proto::ics23::commitment_proof::Proof;
use ibc_core_commitment_types::proto::ics23::{
    calculate_existence_root, tendermint_spec, CommitmentProof, ExistenceProof, HashOp,
    HostFunctionsManager, LeafOp, LengthOp,
};
use ibc_core_commitment_types::specs::ProofSpecs;
use ibc_primitives::prelude::*;

/// Proof specs matching the proofs produced here.
pub fn proof_specs() -> ProofSpecs {
    ProofSpecs::try_from(vec![tendermint_spec(), tendermint_spec()]).expect("Never fails")
}

pub fn prefix() -> CommitmentPrefix {
    CommitmentPrefix::try_from(b"ibc".to_vec()).expect("Never fails")
}

/// Proves that `value` is stored under `key` in a module store holding
/// nothing else. Returns the proof and the app hash it verifies against.
pub fn membership_proof(key: &[u8], value: &[u8]) -> (CommitmentProofBytes, CommitmentRoot) {
    let inner = leaf_proof(key, value);
    let store_root = existence_root(&inner);
    let outer = leaf_proof(prefix().as_bytes(), &store_root);
    let root = CommitmentRoot::from(existence_root(&outer));

    let proof = CommitmentProofBytes::try_from(MerkleProof {
        proofs: vec![inner, outer],
    })
    .expect("Never fails");

    (proof, root)
}

fn leaf_proof(key: &[u8], value: &[u8]) -> CommitmentProof {
    CommitmentProof {
        proof: Some(Proof::Exist(ExistenceProof {
            key: key.to_vec(),
            value: value.to_vec(),
            leaf: Some(LeafOp {
                hash: HashOp::Sha256.into(),
                prehash_key: HashOp::NoHash.into(),
                prehash_value: HashOp::Sha256.into(),
                length: LengthOp::VarProto.into(),
                prefix: vec![0],
            }),
            path: vec![],
        })),
    }
}

fn existence_root(proof: &CommitmentProof) -> Vec<u8> {
    match &proof.proof {
        Some(Proof::Exist(exist)) => {
            calculate_existence_root::<HostFunctionsManager>(exist).expect("Never fails")
        }
        _ => unreachable!("only existence proofs are built here"),
    }
}
