//! ICS 99: Ostracon light client implementation along with re-exporting the
//! necessary types from `ibc-client-ostracon-types` crate.
//!
//! The client works against a key-value store scoped to one client (see
//! [`context`]). Its mutating entry points, [`client_state::initialise`],
//! [`client_state::check_header_and_update_state`] and
//! [`client_state::check_misbehaviour_and_update_state`], either apply all of
//! their writes or none.
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

pub mod client_state;
pub mod context;
pub mod verifier;

/// Re-exports Ostracon light client data structures from the
/// `ibc-client-ostracon-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_client_ostracon_types::*;
}
