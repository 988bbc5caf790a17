use ibc_primitives::prelude::*;

use crate::error::IdentifierError as Error;

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Checks that an identifier only uses the ICS-24 character set.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Checks that `id` has between `min` (at least one) and `max` characters.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = u64::try_from(id.len()).unwrap_or(u64::MAX);
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// A client identifier is 9 to 64 characters of the ICS-24 set.
pub fn validate_client_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 9, 64)
}

/// A client type is short enough that `{client_type}-{u64::MAX}` is still a
/// valid client identifier.
pub fn validate_client_type(client_type: &str) -> Result<(), Error> {
    validate_identifier_chars(client_type)?;
    validate_identifier_length(client_type, 7, 43)
}
