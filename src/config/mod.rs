//! Configuration management for Meridian.
//!
//! # Overview
//!
//! Meridian uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MERIDIAN_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use meridian::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("meridian.toml")?;
//!
//! println!("Countries source: {}", config.sources.countries_url);
//! println!("Chunk size: {}", config.refresh.chunk_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`SourcesConfig`] - Countries and exchange-rate endpoints, request timeout
//! - [`RefreshConfig`] - Pipeline chunking
//! - [`PostgreSQLConfig`] - Connection pool settings
//! - [`SummaryConfig`] - Summary image location, font and layout size
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [sources]
//! countries_url = "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies"
//! exchange_rates_url = "https://open.er-api.com/v6/latest/USD"
//! timeout_seconds = 10
//!
//! [postgresql]
//! connection_string = "${MERIDIAN_DATABASE_URL}"
//!
//! [summary]
//! cache_dir = "cache"
//! font_path = "fonts/Roboto-Regular.ttf"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseTarget, LoggingConfig, MeridianConfig, PostgreSQLConfig,
    RefreshConfig, SourcesConfig, SummaryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
