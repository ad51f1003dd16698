//! Domain models and types for Meridian.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Natural keys** ([`NameKey`], [`CurrencyCode`])
//! - **Records** ([`RawCountryRecord`], [`NormalizedRecord`], [`ExchangeRateTable`])
//! - **The persisted entity** ([`Country`])
//! - **Error types** ([`MeridianError`], [`SourceError`], [`StoreError`], [`RenderError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MeridianError>`]:
//!
//! ```rust
//! use meridian::domain::{MeridianError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = meridian::config::load_config("meridian.toml")?;
//!     Ok(())
//! }
//! ```

pub mod country;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use country::{Country, CountryFields};
pub use errors::{DataSource, MeridianError, RenderError, SourceError, StoreError};
pub use ids::{CurrencyCode, NameKey};
pub use record::{ExchangeRateTable, FieldErrors, NormalizedRecord, RawCountryRecord};
pub use result::Result;
