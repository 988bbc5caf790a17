//! Defines the commitment error type

use displaydoc::Display;
use ibc_primitives::prelude::*;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty merkle proof
    EmptyMerkleProof,
    /// empty merkle root
    EmptyMerkleRoot,
    /// empty verified value
    EmptyVerifiedValue,
    /// empty proof specs
    EmptyProofSpecs,
    /// invalid depth range: [{0}, {1}]
    InvalidDepthRange(i32, i32),
    /// invalid child size: `{0}`
    InvalidChildSize(i32),
    /// invalid prefix length range: `[{0}, {1}]`
    InvalidPrefixLengthRange(i32, i32),
    /// `{proofs}` proofs do not match `{specs}` proof specs
    NumberOfSpecsMismatch { proofs: usize, specs: usize },
    /// `{proofs}` proofs do not match `{keys}` path keys
    NumberOfKeysMismatch { proofs: usize, keys: usize },
    /// invalid merkle proof: `{description}`
    InvalidMerkleProof { description: String },
    /// proof verification failed
    VerificationFailure,
    /// decoding commitment proof bytes failed: `{0}`
    DecodingFailure(String),
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
