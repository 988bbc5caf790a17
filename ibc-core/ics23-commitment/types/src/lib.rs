//! ICS-23: vector commitments, the proofs a light client checks against the
//! commitment root of a stored consensus state.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod specs;

/// Re-exports the ICS-23 proto types from the `ibc-proto` crate.
pub mod proto {
    pub use ibc_proto::ibc::core::commitment::*;
    pub use ibc_proto::ics23;
}
