//! Core business logic for Meridian.
//!
//! # Modules
//!
//! - [`refresh`] - The refresh pipeline: validation, GDP estimation, reconciliation
//! - [`summary`] - Summary image layout, rasterization and writing
//! - [`catalog`] - Status, listing, lookup and deletion of persisted countries
//!
//! # Refresh Workflow
//!
//! 1. **Fetch**: Read the country catalog, then the exchange-rate table
//! 2. **Snapshot**: Capture one timestamp for the whole batch
//! 3. **Reconcile**: Validate, estimate and upsert each record in one transaction
//! 4. **Commit**: All records or none
//! 5. **Render**: Draw the summary image from committed state
//!
//! # Example
//!
//! ```rust,no_run
//! use meridian::adapters::database::create_country_store;
//! use meridian::config::load_config;
//! use meridian::core::refresh::ReconciliationEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("meridian.toml")?;
//! let store = create_country_store(&config).await?;
//! let engine = ReconciliationEngine::from_config(&config, store)?;
//!
//! match engine.refresh().await {
//!     Ok(report) => println!("Created {}, updated {}", report.created, report.updated),
//!     Err(e) => eprintln!("Refresh failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod refresh;
pub mod summary;
