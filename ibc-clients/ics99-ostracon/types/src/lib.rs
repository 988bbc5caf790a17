//! ICS-99: the Ostracon client verifies headers of chains running the
//! Ostracon consensus algorithm, a Tendermint derivative in which a voter set
//! sampled from the validator set signs each block.
//!
//! This crate holds the client's data structures and the pure parts of its
//! verification: validator/voter set hashing and commit signature tallies,
//! and the structural validation of headers and misbehaviour.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod client_state;
mod consensus_state;
mod header;
mod misbehaviour;
mod trust_threshold;
mod validator_set;
mod vote;

pub use client_state::*;
pub use consensus_state::*;
pub use header::*;
pub use misbehaviour::*;
pub use trust_threshold::*;
pub use validator_set::*;
pub use vote::*;

pub mod error;
pub mod proto;

pub const OSTRACON_CLIENT_TYPE: &str = "99-ostracon";
