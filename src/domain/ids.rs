//! Request identifier type
//!
//! `custom_id` is the key that ties a batch request line to its response
//! line. The formatter synthesizes ids from row positions; the extractor accepts
//! whatever non-empty id the response file carries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ROW_ID_PREFIX: &str = "request-";

/// Batch request identifier newtype wrapper
///
/// Ordering is lexicographic by code point, which is the order the extractor
/// emits rows in by default (`request-10` sorts before `request-2`).
///
/// # Examples
///
/// ```
/// use batchkit::domain::ids::CustomId;
///
/// let id = CustomId::for_row(0);
/// assert_eq!(id.as_str(), "request-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomId(String);

impl CustomId {
    /// Creates a new CustomId, rejecting empty values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("custom_id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Synthesizes the id for a 0-based row position (`request-<index + 1>`)
    pub fn for_row(index: usize) -> Self {
        Self(format!("{ROW_ID_PREFIX}{}", index + 1))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CustomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
