//! Defines the revision-aware `Height` type.

use core::cmp::Ordering;
use core::fmt::{Debug, Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;
use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use ibc_proto::Protobuf;

use crate::error::HeightError;

/// The height of a counterparty block: a revision number, bumped each time
/// the chain hard forks to a new chain identifier, and the block height
/// within that revision.
///
/// Heights order by revision number first. The zero height `0-0` is a
/// valid value used to mean "unset", e.g. the frozen height of an active
/// client or an absent trusted height.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Height {
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub const fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// The lowest block height of a revision.
    pub const fn min(revision_number: u64) -> Self {
        Self::new(revision_number, 1)
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }

    pub fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision_number
            .cmp(&other.revision_number)
            .then(self.revision_height.cmp(&other.revision_height))
    }
}

impl Protobuf<RawHeight> for Height {}

impl TryFrom<RawHeight> for Height {
    type Error = HeightError;

    fn try_from(raw: RawHeight) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.revision_number, raw.revision_height))
    }
}

impl From<Height> for RawHeight {
    fn from(height: Height) -> Self {
        RawHeight {
            revision_number: height.revision_number,
            revision_height: height.revision_height,
        }
    }
}

impl Debug for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("Height")
            .field("revision", &self.revision_number)
            .field("height", &self.revision_height)
            .finish()
    }
}

/// Displays as `{revision_number}-{revision_height}`, the form used in
/// consensus state store keys.
impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

impl FromStr for Height {
    type Err = HeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (revision_number, revision_height) =
            s.split_once('-').ok_or_else(|| HeightError::InvalidFormat {
                height: s.to_string(),
            })?;

        let parse = |part: &str| {
            part.parse::<u64>().map_err(|error| HeightError::InvalidNumber {
                height: s.to_string(),
                error,
            })
        };

        Ok(Self::new(parse(revision_number)?, parse(revision_height)?))
    }
}
