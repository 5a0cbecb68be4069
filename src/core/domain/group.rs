//! Group type.
//!
//! Names one secrets namespace, and with it one store file.

use std::str::FromStr;

use crate::error::{Error, Result};

/// A validated, non-empty group name.
///
/// The name becomes a file name under the secrets root, so it may not
/// contain path separators or be a relative directory reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group(String);

impl Group {
    /// Validate a group name.
    ///
    /// # Errors
    ///
    /// Returns `Error::GroupRequired` for an empty name and
    /// `Error::InvalidGroup` for names that would escape the secrets root.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::GroupRequired);
        }
        if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
            return Err(Error::InvalidGroup(name));
        }

        Ok(Self(name))
    }

    /// Group name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Group {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
