//! Secure credential handling using the secrecy crate
//!
//! The PostgreSQL connection string embeds a password, so it is held in a
//! `Secret<T>`: zeroed on drop, redacted in `Debug`, and only readable through
//! an explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use meridian::config::{SecretString, SecretValue};
//! use secrecy::{Secret, ExposeSecret};
//!
//! let conn: SecretString =
//!     Secret::new(SecretValue::from("postgresql://u:p@db/meridian".to_string()));
//!
//! assert!(conn.expose_secret().starts_with("postgresql://"));
//! println!("{:?}", conn); // Prints: Secret([REDACTED ...])
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Connection-string form with credentials removed, safe to log
    ///
    /// `postgresql://user:pw@db:5432/meridian` becomes `postgresql://***@db:5432/meridian`.
    pub fn redacted_endpoint(&self) -> String {
        match self.0.rsplit_once('@') {
            Some((_, host)) => format!("postgresql://***@{host}"),
            None => "postgresql://***".to_string(),
        }
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
