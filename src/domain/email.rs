//! Student email address.

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Normalized student email (trimmed, lowercase).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Email(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailParseError {
    #[error("Email is required")]
    Empty,
}

impl Email {
    /// Wrap an email read back from the database.
    ///
    /// Rows are written through `FromStr`, so the stored value is kept as is.
    pub(crate) fn from_stored(email: String) -> Self {
        Email(email)
    }

    /// Get the email as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = EmailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailParseError::Empty);
        }
        Ok(Email(normalized))
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
