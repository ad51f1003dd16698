//! Country store factory
//!
//! This module provides the factory function that creates a store based on configuration.

use crate::adapters::database::traits::CountryStore;
use crate::adapters::memory::MemoryCountryStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, MeridianConfig};
use crate::domain::{MeridianError, Result};
use std::sync::Arc;

/// Create a country store based on the configuration
///
/// The schema is ensured before the store is returned.
///
/// # Errors
///
/// Returns an error if the store cannot be created or the schema cannot be applied
pub async fn create_country_store(
    config: &MeridianConfig,
) -> Result<Arc<dyn CountryStore + Send + Sync>> {
    let store: Arc<dyn CountryStore + Send + Sync> = match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                MeridianError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL country store");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            Arc::new(PostgreSQLAdapter::new(client))
        }
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory country store");
            Arc::new(MemoryCountryStore::new())
        }
    };

    store.ensure_schema().await?;
    Ok(store)
}
