//! Cell name type
//!
//! A cell name is one or more ASCII letters followed by a run of digits that
//! does not start with zero, e.g. `A1`, `BC23`. Names are case-insensitive;
//! the canonical form is upper-case.

use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// A validated, canonical (upper-case) cell name
///
/// # Examples
/// ```
/// use slate_sheets_core::CellName;
///
/// let name = CellName::parse("bc23").unwrap();
/// assert_eq!(name.as_str(), "BC23");
///
/// assert!(CellName::parse("Z").is_err());
/// assert!(CellName::parse("X07").is_err());
/// assert!(CellName::parse("2X").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellName(String);

impl CellName {
    /// Parse and canonicalize a cell name
    ///
    /// Accepts any casing; the stored form is upper-case.
    pub fn parse(s: &str) -> Result<Self> {
        if Self::is_valid(s) {
            Ok(Self(s.to_ascii_uppercase()))
        } else {
            Err(Error::InvalidName(s.to_string()))
        }
    }

    /// Check whether a string matches the cell name grammar
    /// (letters, then a digit run not starting with zero)
    pub fn is_valid(s: &str) -> bool {
        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        // At least one letter, and the first digit must be nonzero
        if pos == 0 || pos == bytes.len() || !(b'1'..=b'9').contains(&bytes[pos]) {
            return false;
        }

        bytes[pos + 1..].iter().all(|b| b.is_ascii_digit())
    }

    /// The canonical name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the name, yielding the canonical `String`
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CellName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Allows map lookups by &str when keys are CellName
impl Borrow<str> for CellName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> String {
        name.0
    }
}
