use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;

use crate::error::IdentifierError;
use crate::validate::{validate_identifier_chars, validate_identifier_length};

/// Longest chain identifier a Tendermint-family chain accepts.
pub const MAX_CHAIN_ID_LENGTH: u64 = 50;

/// Chain identifier of the counterparty chain.
///
/// A chain identifier of the form `{chain name}-{revision number}` carries the
/// revision number of the chain, which changes only when the chain hard forks
/// to a new identifier. Any other identifier has revision number 0.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId {
    id: String,
    revision_number: u64,
}

impl ChainId {
    /// Creates a `ChainId`, validating it against the ICS-24 character set
    /// and the maximum chain identifier length.
    ///
    /// ```
    /// use ibc_core_host_types::identifiers::ChainId;
    ///
    /// let id = ChainId::new("ostracon").unwrap();
    /// assert_eq!(id.revision_number(), 0);
    ///
    /// let id = ChainId::new("ostracon-12").unwrap();
    /// assert_eq!(id.revision_number(), 12);
    /// ```
    pub fn new(chain_id: &str) -> Result<Self, IdentifierError> {
        Self::from_str(chain_id)
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    /// Revision number encoded in a raw chain identifier, without
    /// validating the rest of it.
    ///
    /// The suffix after the last `-` must be a decimal number without leading
    /// zeros and the name before it must not end in `-`; otherwise, or when
    /// the number does not fit a `u64`, the revision is 0.
    pub fn revision_number_of(chain_id: &str) -> u64 {
        let Some((name, revision)) = chain_id.rsplit_once('-') else {
            return 0;
        };
        if name.is_empty()
            || name.ends_with('-')
            || revision.is_empty()
            || !revision.bytes().all(|b| b.is_ascii_digit())
            || (revision.len() > 1 && revision.starts_with('0'))
        {
            return 0;
        }
        revision.parse().unwrap_or(0)
    }
}

impl FromStr for ChainId {
    type Err = IdentifierError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier_chars(id)?;
        validate_identifier_length(id, 1, MAX_CHAIN_ID_LENGTH)?;

        Ok(Self {
            id: id.to_string(),
            revision_number: Self::revision_number_of(id),
        })
    }
}

impl TryFrom<String> for ChainId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<ChainId> for String {
    fn from(chain_id: ChainId) -> Self {
        chain_id.id
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.id)
    }
}
