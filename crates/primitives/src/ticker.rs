//! Ticker symbol type.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Exchange ticker symbol identifying the company being valued.
///
/// Deserialized values are normalised the same way as [`Ticker::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a new ticker, normalised to upper case.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
