//! CLI command implementations
//!
//! This module contains all CLI command implementations.
//!
//! Exit codes shared by every command:
//!
//! - `0` success
//! - `1` not found
//! - `2` configuration error
//! - `3` validation failed
//! - `4` store or upstream source unreachable
//! - `5` internal error

pub mod countries;
pub mod image;
pub mod init;
pub mod refresh;
pub mod render;
pub mod status;
pub mod validate;

use crate::adapters::database::{create_country_store, CountryStore};
use crate::config::{load_config, MeridianConfig};
use crate::domain::MeridianError;
use std::sync::Arc;

pub const EXIT_OK: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_VALIDATION: i32 = 3;
pub const EXIT_UNAVAILABLE: i32 = 4;
pub const EXIT_INTERNAL: i32 = 5;

/// Load configuration and open the store, printing failures
///
/// On failure returns the exit code the command should end with.
pub(crate) async fn open_store(
    config_path: &str,
) -> Result<(MeridianConfig, Arc<dyn CountryStore + Send + Sync>), i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    match create_country_store(&config).await {
        Ok(store) => Ok((config, store)),
        Err(e) => {
            println!("❌ Failed to connect to database");
            println!("   Error: {e}");
            Err(EXIT_UNAVAILABLE)
        }
    }
}

/// Exit code for a failed catalog operation, printing the failure
pub(crate) fn report_catalog_error(err: &MeridianError) -> i32 {
    match err {
        MeridianError::NotFound(message) => {
            println!("🔍 {message}");
            EXIT_NOT_FOUND
        }
        MeridianError::Store(_) => {
            println!("❌ Database error");
            println!("   Error: {err}");
            EXIT_UNAVAILABLE
        }
        _ => {
            println!("❌ {err}");
            EXIT_INTERNAL
        }
    }
}

/// Pretty JSON for stdout
pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
