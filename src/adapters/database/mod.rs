//! Persistence abstraction layer
//!
//! This module provides a trait-based abstraction over country storage,
//! allowing Meridian to run against PostgreSQL or a process-local store.

pub mod factory;
pub mod traits;

pub use factory::create_country_store;
pub use traits::{CountryFilter, CountrySort, CountryStore, CountryTransaction};
