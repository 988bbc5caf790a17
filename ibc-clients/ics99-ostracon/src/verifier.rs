use tendermint::crypto::default::signature::Verifier as Ed25519Verifier;
use tendermint::crypto::default::Sha256;
use tendermint::crypto::signature::Verifier;
use tendermint::crypto::Sha256 as Sha256Hasher;
use tendermint::merkle::MerkleHash;

/// Specifies the cryptography hosts plug into Ostracon client verification.
///
/// Hosts with their own signature verification (e.g. a precompile) or hash
/// implementation define a unit struct implementing this trait and pass it
/// as the type parameter of [`verify_header`] and [`verify_misbehaviour`].
///
/// [`verify_header`]: crate::client_state::verify_header
/// [`verify_misbehaviour`]: crate::client_state::verify_misbehaviour
pub trait OstraconVerifier {
    /// Checks ed25519 vote signatures.
    type SignatureVerifier: Verifier;

    /// Hashes headers and validator sets.
    type Hasher: MerkleHash + Sha256Hasher + Default;
}

/// The default verifier, backed by the pure Rust crypto of the `tendermint`
/// crate.
pub struct DefaultVerifier;

impl OstraconVerifier for DefaultVerifier {
    type SignatureVerifier = Ed25519Verifier;
    type Hasher = Sha256;
}
