use core::fmt::{Display, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;

use crate::error::StatusError;

/// Status of a light client, derived from its client state and the age of
/// its latest consensus state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The client can be updated and used to verify proofs
    Active,
    /// Misbehaviour was proven; the client is unusable for good
    Frozen,
    /// The latest consensus state is outside the trusting period
    Expired,
}

impl Status {
    pub fn is_active(&self) -> bool {
        *self == Status::Active
    }

    pub fn is_frozen(&self) -> bool {
        *self == Status::Frozen
    }

    pub fn is_expired(&self) -> bool {
        *self == Status::Expired
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let status = match self {
            Status::Active => "ACTIVE",
            Status::Frozen => "FROZEN",
            Status::Expired => "EXPIRED",
        };
        write!(f, "{status}")
    }
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Status::Active),
            "FROZEN" => Ok(Status::Frozen),
            "EXPIRED" => Ok(Status::Expired),
            _ => Err(StatusError::UnknownStatus(s.to_string())),
        }
    }
}
