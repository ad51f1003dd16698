//! Read and delete operations over persisted countries
//!
//! Every lookup by name is case-insensitive. Empty results are reported as
//! [`MeridianError::NotFound`] so callers can map them to a not-found outcome.

use crate::adapters::database::{CountryFilter, CountryStore};
use crate::domain::{Country, MeridianError, NameKey, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Totals reported by [`CountryCatalog::status`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStatus {
    pub total_countries: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Query facade over a [`CountryStore`]
pub struct CountryCatalog {
    store: Arc<dyn CountryStore + Send + Sync>,
}

impl CountryCatalog {
    pub fn new(store: Arc<dyn CountryStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Total countries and the latest refresh time
    ///
    /// # Errors
    ///
    /// `NotFound` before the first successful refresh.
    pub async fn status(&self) -> Result<CatalogStatus> {
        let total_countries = self.store.count().await?;
        if total_countries == 0 {
            return Err(MeridianError::NotFound(
                "No countries available. Run a refresh first.".to_string(),
            ));
        }

        let last_refreshed_at = self.store.max_last_refreshed_at().await?;
        Ok(CatalogStatus {
            total_countries,
            last_refreshed_at,
        })
    }

    /// Filtered, sorted listing
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing matches.
    pub async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let countries = self.store.list(filter).await?;
        if countries.is_empty() {
            return Err(MeridianError::NotFound(
                "No countries match the given filters".to_string(),
            ));
        }

        tracing::debug!(
            count = countries.len(),
            region = ?filter.region,
            currency = ?filter.currency,
            sort = %filter.sort,
            "Listed countries"
        );
        Ok(countries)
    }

    /// Single country by name
    pub async fn get(&self, name: &str) -> Result<Country> {
        self.store
            .find_by_name(&NameKey::from_name(name))
            .await?
            .ok_or_else(|| MeridianError::NotFound(format!("Country not found: {name}")))
    }

    /// Delete a country by name
    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.store.delete_by_name(&NameKey::from_name(name)).await? {
            return Err(MeridianError::NotFound(format!("Country not found: {name}")));
        }

        tracing::info!(name = %name, "Country deleted");
        Ok(())
    }
}
