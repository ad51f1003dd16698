// Meridian - Country and Exchange-Rate Refresh Pipeline
// Copyright (c) 2025 Meridian Contributors
// Licensed under the MIT License

//! # Meridian - Country and Exchange-Rate Refresh Pipeline
//!
//! Meridian pulls country metadata and USD exchange rates from two public
//! HTTP sources, derives an estimated GDP per country and stores the result
//! in a case-insensitive country catalog. Every successful refresh also
//! renders a small PNG summary of the catalog.
//!
//! ## Overview
//!
//! A refresh runs these steps:
//! - **Fetch** the country list, then the exchange-rate table
//! - **Validate** each raw record (name, population, currency code)
//! - **Estimate** GDP as `population * R / exchange_rate` with `R` drawn from `[1000, 2000]`
//! - **Upsert** every record inside one transaction keyed by lower-cased name
//! - **Render** the summary image from the committed state
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (refresh, summary, catalog)
//! - [`adapters`] - External integrations (HTTP sources, PostgreSQL, memory, filesystem)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meridian::adapters::database::create_country_store;
//! use meridian::config::load_config;
//! use meridian::core::refresh::ReconciliationEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("meridian.toml")?;
//!     let store = create_country_store(&config).await?;
//!
//!     let engine = ReconciliationEngine::from_config(&config, store)?;
//!     let report = engine.refresh().await?;
//!
//!     println!("Refreshed {} countries", report.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library-level operations return [`domain::Result`], an alias over
//! [`domain::MeridianError`]. A refresh reports its own
//! [`core::refresh::RefreshError`] so callers can tell an upstream outage
//! from a validation failure.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
