//! Wire models for the upstream sources

use crate::domain::ExchangeRateTable;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Body of the exchange-rate endpoint
///
/// Only `rates` is read; `base_code`, `time_last_update_utc` and friends are
/// ignored. A body without `rates` is an empty table.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub rates: HashMap<String, Value>,
}

impl RatesResponse {
    /// Converts the loose JSON map into a rate table
    ///
    /// Entries that are not numbers are skipped.
    pub fn into_table(self) -> ExchangeRateTable {
        let rates = self.rates.into_iter().filter_map(|(code, value)| {
            let rate = decimal_from_json(&value);
            if rate.is_none() {
                tracing::debug!(currency_code = %code, value = %value, "Skipping non-numeric rate");
            }
            rate.map(|r| (code, r))
        });
        ExchangeRateTable::new(rates)
    }
}

/// Parses a JSON number into a `Decimal` using its textual form
fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
