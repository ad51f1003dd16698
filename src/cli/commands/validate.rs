//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Meridian configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Countries Source: {}", config.sources.countries_url);
        println!("  Exchange Rates Source: {}", config.sources.exchange_rates_url);
        println!("  Source Timeout: {}s", config.sources.timeout_seconds);
        println!("  Chunk Size: {}", config.refresh.chunk_size);

        match config.database_target {
            DatabaseTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!("  Database Target: PostgreSQL");
                    println!(
                        "  PostgreSQL Connection: {}",
                        pg_config.connection_string.expose_secret().redacted_endpoint()
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                    println!("  SSL Mode: {}", pg_config.ssl_mode);
                }
            }
            DatabaseTarget::Memory => {
                println!("  Database Target: memory (contents are lost on exit)");
            }
        }

        println!(
            "  Summary Image: {}/{}",
            config.summary.cache_dir, config.summary.file_name
        );
        println!("  Summary Font: {}", config.summary.font_path);
        println!();
        Ok(EXIT_OK)
    }
}
