//! Defines the errors of the client semantics types.

use core::num::ParseIntError;

use displaydoc::Display;
use ibc_primitives::prelude::*;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum HeightError {
    /// height `{height}` is not of the form `{{revision number}}-{{revision height}}`
    InvalidFormat { height: String },
    /// failed to parse `{height}`: `{error}`
    InvalidNumber { height: String, error: ParseIntError },
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum StatusError {
    /// unknown client status `{0}`
    UnknownStatus(String),
}

#[cfg(feature = "std")]
impl std::error::Error for HeightError {}

#[cfg(feature = "std")]
impl std::error::Error for StatusError {}
