//! Pretty printing helpers for `Display` impls of collections.

use core::fmt::{Display, Error as FmtError, Formatter};

/// Displays a slice as `[ a, b, c ]`.
pub struct PrettySlice<'a, T>(pub &'a [T]);

impl<T: Display> Display for PrettySlice<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "[ ")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, " ]")
    }
}
