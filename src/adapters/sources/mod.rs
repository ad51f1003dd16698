//! Upstream reference data sources
//!
//! The refresh pipeline reads two datasets: a country catalog and a USD-based
//! exchange-rate table. [`ReferenceDataSource`] is the seam the pipeline
//! depends on; [`ExternalDataClient`] is the HTTP implementation.

pub mod client;
pub mod models;

use crate::domain::{ExchangeRateTable, RawCountryRecord, SourceError};
use async_trait::async_trait;

pub use client::ExternalDataClient;

/// Provider of country records and exchange rates
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Fetch the full country catalog
    async fn fetch_countries(&self) -> Result<Vec<RawCountryRecord>, SourceError>;

    /// Fetch the current exchange-rate table
    async fn fetch_exchange_rates(&self) -> Result<ExchangeRateTable, SourceError>;

    /// Countries and exchange-rate endpoints, for logging
    fn endpoints(&self) -> (&str, &str);
}
