//! Natural-key and code newtypes
//!
//! Countries are reconciled by name compared case-insensitively. Instead of
//! lowercasing at every comparison, the canonical form is computed once as a
//! [`NameKey`] and stored next to the display name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical, case-folded form of a country name
///
/// # Examples
///
/// ```
/// use meridian::domain::ids::NameKey;
///
/// assert_eq!(NameKey::from_name("France"), NameKey::from_name("fRANCE"));
/// assert_eq!(NameKey::from_name("Côte d'Ivoire").as_str(), "côte d'ivoire");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NameKey(String);

impl NameKey {
    /// Builds the key for a display name
    pub fn from_name(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NameKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Currency code as reported by the countries source (e.g. `EUR`)
///
/// The code is kept verbatim; the exchange-rate table is keyed by the same
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wraps a currency code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
