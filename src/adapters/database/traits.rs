//! Persistence abstraction traits
//!
//! This module defines the traits that country stores must implement to back
//! the refresh pipeline and the read commands.

use crate::domain::{Country, CountryFields, NameKey, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Ordering applied by [`CountryStore::list`]
///
/// Rows without an estimated GDP always sort after rows that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountrySort {
    /// Insertion order
    #[default]
    Id,
    GdpDesc,
    GdpAsc,
    NameAsc,
    NameDesc,
    PopulationAsc,
    PopulationDesc,
}

impl FromStr for CountrySort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gdp_desc" => Ok(CountrySort::GdpDesc),
            "gdp_asc" => Ok(CountrySort::GdpAsc),
            "name_asc" => Ok(CountrySort::NameAsc),
            "name_desc" => Ok(CountrySort::NameDesc),
            "population_asc" => Ok(CountrySort::PopulationAsc),
            "population_desc" => Ok(CountrySort::PopulationDesc),
            other => Err(format!(
                "Invalid sort '{other}'. Must be one of: gdp_desc, gdp_asc, name_asc, name_desc, population_asc, population_desc"
            )),
        }
    }
}

impl fmt::Display for CountrySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CountrySort::Id => "id",
            CountrySort::GdpDesc => "gdp_desc",
            CountrySort::GdpAsc => "gdp_asc",
            CountrySort::NameAsc => "name_asc",
            CountrySort::NameDesc => "name_desc",
            CountrySort::PopulationAsc => "population_asc",
            CountrySort::PopulationDesc => "population_desc",
        };
        f.write_str(s)
    }
}

/// Filter for [`CountryStore::list`]
///
/// Region and currency match case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryFilter {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: CountrySort,
}

impl CountryFilter {
    /// Whether `country` passes the region and currency filters
    pub fn matches(&self, country: &Country) -> bool {
        let region_ok = match (&self.region, &country.region) {
            (None, _) => true,
            (Some(want), Some(have)) => want.eq_ignore_ascii_case(have),
            (Some(_), None) => false,
        };
        let currency_ok = match (&self.currency, &country.currency_code) {
            (None, _) => true,
            (Some(want), Some(have)) => want.eq_ignore_ascii_case(have.as_str()),
            (Some(_), None) => false,
        };
        region_ok && currency_ok
    }
}

/// Country persistence
///
/// Reads outside a transaction see committed state only. Every write made by a
/// refresh goes through a [`CountryTransaction`] obtained from [`begin`].
///
/// [`begin`]: CountryStore::begin
#[async_trait]
pub trait CountryStore: Send + Sync {
    /// Test the store connection
    async fn test_connection(&self) -> Result<()>;

    /// Create the schema if it does not exist
    async fn ensure_schema(&self) -> Result<()>;

    /// Open a unit of work
    async fn begin(&self) -> Result<Box<dyn CountryTransaction>>;

    /// Number of persisted countries
    async fn count(&self) -> Result<u64>;

    /// Most recent `last_refreshed_at` across all rows
    async fn max_last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>>;

    /// Case-insensitive lookup by name
    async fn find_by_name(&self, key: &NameKey) -> Result<Option<Country>>;

    /// Filtered, sorted listing
    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>>;

    /// Top `limit` rows by estimated GDP descending
    ///
    /// Rows without a GDP come last; ties break on name ascending.
    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>>;

    /// Case-insensitive delete; returns whether a row was removed
    async fn delete_by_name(&self, key: &NameKey) -> Result<bool>;

    /// Human-readable store name for logs
    fn store_name(&self) -> &str;
}

/// An open unit of work
///
/// Dropping a transaction without calling [`commit`](CountryTransaction::commit)
/// discards its writes.
#[async_trait]
pub trait CountryTransaction: Send {
    /// Case-insensitive lookup that sees this transaction's own writes
    async fn find_by_name(&mut self, key: &NameKey) -> Result<Option<Country>>;

    /// Insert a new row
    async fn create(&mut self, name: &str, fields: &CountryFields) -> Result<Country>;

    /// Overwrite the refreshable fields of row `id`
    async fn update(&mut self, id: i64, fields: &CountryFields) -> Result<()>;

    /// Make every write visible atomically
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discard every write
    async fn rollback(self: Box<Self>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountryFields, CurrencyCode};
    use test_case::test_case;

    #[test_case("gdp_desc", CountrySort::GdpDesc)]
    #[test_case("GDP_ASC", CountrySort::GdpAsc)]
    #[test_case("name_asc", CountrySort::NameAsc)]
    #[test_case("name_desc", CountrySort::NameDesc)]
    #[test_case("population_asc", CountrySort::PopulationAsc)]
    #[test_case("population_desc", CountrySort::PopulationDesc)]
    fn test_sort_parse(input: &str, expected: CountrySort) {
        assert_eq!(input.parse::<CountrySort>().unwrap(), expected);
    }

    #[test]
    fn test_sort_parse_invalid() {
        assert!("gdp".parse::<CountrySort>().is_err());
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let country = Country::create(
            1,
            "Nigeria",
            CountryFields {
                capital: None,
                region: Some("Africa".to_string()),
                population: 1,
                currency_code: Some(CurrencyCode::new("NGN")),
                exchange_rate: None,
                estimated_gdp: None,
                flag_url: None,
                last_refreshed_at: Utc::now(),
            },
            Utc::now(),
        );

        let filter = CountryFilter {
            region: Some("africa".to_string()),
            currency: Some("ngn".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&country));

        let filter = CountryFilter {
            region: Some("Europe".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&country));
    }
}
