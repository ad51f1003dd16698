//! External system integrations for Meridian.
//!
//! - [`sources`] - HTTP clients for the countries and exchange-rate APIs
//! - [`database`] - Country store abstraction (trait-based)
//! - [`postgresql`] - PostgreSQL implementation
//! - [`memory`] - In-process implementation for tests and local runs
//! - [`artifact`] - Filesystem storage for the summary image
//!
//! # Example
//!
//! ```rust,no_run
//! use meridian::adapters::sources::{ExternalDataClient, ReferenceDataSource};
//! use meridian::config::SourcesConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ExternalDataClient::new(SourcesConfig::default())?;
//! let countries = client.fetch_countries().await?;
//! println!("Fetched {} countries", countries.len());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod database;
pub mod memory;
pub mod postgresql;
pub mod sources;
