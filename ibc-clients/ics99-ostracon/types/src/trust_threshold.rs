//! Defines the trust threshold fraction a commit's signing power must exceed.

use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::prelude::*;
use ibc_proto::Protobuf;

use crate::error::OstraconClientError;
use crate::proto::v1::Fraction as RawFraction;

/// [`TrustThreshold`] defines the fraction `numerator / denominator` of
/// voting power that must sign a commit for it to be trusted.
///
/// A commit passes when strictly more than this fraction of the total power
/// signed it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrustThreshold {
    numerator: u64,
    denominator: u64,
}

/// Trust level used when a client is created without an explicit one.
pub const DEFAULT_TRUST_LEVEL: TrustThreshold = TrustThreshold::ONE_THIRD;

impl TrustThreshold {
    /// Constant for a trust threshold of 1/3.
    pub const ONE_THIRD: Self = Self {
        numerator: 1,
        denominator: 3,
    };

    /// Constant for a trust threshold of 2/3.
    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    /// Instantiates a new [`TrustThreshold`], rejecting zero numerators,
    /// zero denominators and fractions above one.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, OstraconClientError> {
        let threshold = Self {
            numerator,
            denominator,
        };
        threshold.validate()?;
        Ok(threshold)
    }

    pub fn validate(&self) -> Result<(), OstraconClientError> {
        if self.numerator < 1 || self.denominator < 1 || self.denominator < self.numerator {
            return Err(OstraconClientError::InvalidTrustLevel {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether `signed` voting power out of `total` strictly exceeds this
    /// fraction, i.e. `signed / total > numerator / denominator`.
    pub fn is_exceeded_by(&self, signed: u64, total: u64) -> bool {
        u128::from(signed) * u128::from(self.denominator)
            > u128::from(total) * u128::from(self.numerator)
    }
}

impl Display for TrustThreshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl Protobuf<RawFraction> for TrustThreshold {}

impl TryFrom<RawFraction> for TrustThreshold {
    type Error = OstraconClientError;

    fn try_from(value: RawFraction) -> Result<Self, Self::Error> {
        Self::new(value.numerator, value.denominator)
    }
}

impl From<TrustThreshold> for RawFraction {
    fn from(value: TrustThreshold) -> Self {
        Self {
            numerator: value.numerator,
            denominator: value.denominator,
        }
    }
}
