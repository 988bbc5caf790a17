//! Verification and state transitions of the Ostracon client.
//!
//! Verification functions only read the client store; the execution
//! functions write to it. [`check_header_and_update_state`] and
//! [`check_misbehaviour_and_update_state`] chain the two and apply their
//! writes only when everything succeeded.

mod common;
mod execution;
mod misbehaviour;
mod update_client;

pub use common::*;
pub use execution::*;
pub use misbehaviour::*;
pub use update_client::*;
