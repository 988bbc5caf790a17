//! Client Semantics (ICS-02) data structures shared by light clients.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod height;
mod status;

pub use height::*;
pub use status::*;

/// Re-exports ICS-02 proto types from the `ibc-proto` crate.
pub mod proto {
    pub use ibc_proto::ibc::core::client::*;
}
