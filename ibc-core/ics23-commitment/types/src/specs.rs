//! Defines proof specs, which encode the structure of proofs

use ibc_primitives::prelude::*;
use ibc_proto::ics23::{InnerSpec, ProofSpec};

use crate::error::CommitmentError;

/// Proof specifications for each level of a Merkle path, innermost store
/// first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ProofSpecs(Vec<ProofSpec>);

impl ProofSpecs {
    /// The specs of a Cosmos-SDK style multistore: an IAVL module store
    /// committed into a simple Merkle tree of store roots.
    pub fn cosmos() -> Self {
        Self(vec![ics23::iavl_spec(), ics23::tendermint_spec()])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn validate(&self) -> Result<(), CommitmentError> {
        if self.is_empty() {
            return Err(CommitmentError::EmptyProofSpecs);
        }
        self.0.iter().try_for_each(validate_proof_spec)
    }
}

/// A non-positive depth bound means "no limit"; two positive bounds must
/// form a range.
fn validate_proof_spec(spec: &ProofSpec) -> Result<(), CommitmentError> {
    if 0 < spec.min_depth && 0 < spec.max_depth && spec.max_depth < spec.min_depth {
        return Err(CommitmentError::InvalidDepthRange(
            spec.min_depth,
            spec.max_depth,
        ));
    }
    spec.inner_spec
        .as_ref()
        .map_or(Ok(()), validate_inner_spec)
}

fn validate_inner_spec(spec: &InnerSpec) -> Result<(), CommitmentError> {
    if spec.child_size <= 0 {
        return Err(CommitmentError::InvalidChildSize(spec.child_size));
    }
    if spec.min_prefix_length < 0
        || spec.max_prefix_length < 0
        || spec.max_prefix_length < spec.min_prefix_length
    {
        return Err(CommitmentError::InvalidPrefixLengthRange(
            spec.min_prefix_length,
            spec.max_prefix_length,
        ));
    }
    Ok(())
}

impl TryFrom<Vec<ProofSpec>> for ProofSpecs {
    type Error = CommitmentError;

    fn try_from(specs: Vec<ProofSpec>) -> Result<Self, CommitmentError> {
        specs.iter().try_for_each(validate_proof_spec)?;
        Ok(Self(specs))
    }
}

impl From<ProofSpecs> for Vec<ProofSpec> {
    fn from(specs: ProofSpecs) -> Self {
        specs.0
    }
}
