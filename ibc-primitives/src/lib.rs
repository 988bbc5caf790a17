//! Contains primitive types and helpers shared by the Ostracon light client
//! crates.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod prelude;
pub mod utils;

mod types;
pub use types::*;

/// Re-exports the google proto types and the `Protobuf` trait used by every
/// domain type of the workspace.
pub mod proto {
    pub use ibc_proto::google::protobuf::{Any, Duration, Timestamp};
    pub use ibc_proto::Protobuf;
    pub use tendermint_proto::Error;
}
