//! Records as they flow through a refresh
//!
//! [`RawCountryRecord`] mirrors the countries source verbatim and is untrusted:
//! every field stays untyped JSON until the validator has looked at it.
//! [`NormalizedRecord`] is what survives validation.

use super::ids::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One country entry from the countries source, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountryRecord {
    #[serde(default)]
    pub name: Value,

    #[serde(default)]
    pub capital: Value,

    #[serde(default)]
    pub region: Value,

    #[serde(default)]
    pub population: Value,

    #[serde(default)]
    pub currencies: Value,

    #[serde(default)]
    pub flag: Value,
}

/// A record that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<CurrencyCode>,
    pub flag: Option<String>,
}

/// Field name to message, as reported for a rejected record
///
/// Serializes as a flat JSON object, e.g. `{"population": "must be at least 0"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// A single-field error set
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self(errors)
    }

    /// Message recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Names of the failing fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Exchange rates keyed by currency code, from one snapshot of the rates source
///
/// Only strictly positive rates are kept, so dividing by a looked-up rate is
/// always defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, Decimal>,
}

impl ExchangeRateTable {
    /// Builds a table, dropping non-positive rates
    pub fn new(rates: impl IntoIterator<Item = (String, Decimal)>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_sign_positive() && !rate.is_zero())
            .collect();
        Self { rates }
    }

    /// Rate for `code`, if the snapshot has one
    pub fn rate_for(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(code.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
