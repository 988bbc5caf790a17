use core::str::FromStr;

use derive_more::{Display, Into};
use ibc_primitives::prelude::*;

use crate::error::IdentifierError;
use crate::validate::{validate_client_identifier, validate_client_type};

/// Identifier of a client instance on the host, `{client type}-{counter}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Display)]
pub struct ClientId(String);

impl ClientId {
    /// Builds the identifier of the `counter`-th client of `client_type`.
    ///
    /// ```
    /// # use ibc_core_host_types::identifiers::ClientId;
    /// let client_id = ClientId::new("99-ostracon", 0).unwrap();
    /// assert_eq!(client_id.as_str(), "99-ostracon-0");
    /// ```
    pub fn new(client_type: &str, counter: u64) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type)?;
        let client_id = format!("{client_type}-{counter}");
        validate_client_identifier(&client_id)?;
        Ok(Self(client_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for ClientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl PartialEq<str> for ClientId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_ids_from_type_and_counter() {
        let id = ClientId::new("99-ostracon", 7).expect("valid client type");
        assert_eq!(id.as_str(), "99-ostracon-7");
        assert_eq!(ClientId::from_str("99-ostracon-7"), Ok(id));
    }

    #[test]
    fn rejects_short_client_types() {
        assert!(ClientId::new("99-os", 0).is_err());
    }
}
