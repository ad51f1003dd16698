//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_INTERNAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "meridian.toml")]
    pub output: String,

    /// Include commented PostgreSQL and logging sections
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Meridian configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set database_target to 'postgresql' or 'memory'");
                println!("  3. For PostgreSQL, put MERIDIAN_DATABASE_URL in a .env file");
                println!("  4. Place a TrueType font at the configured summary.font_path");
                println!("  5. Validate configuration: meridian validate-config");
                println!("  6. Run a refresh: meridian refresh");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_INTERNAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Meridian Configuration File
# Country and exchange-rate refresh pipeline

# Database target (postgresql or memory)
database_target = "memory"

[application]
log_level = "info"

[sources]
countries_url = "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies"
exchange_rates_url = "https://open.er-api.com/v6/latest/USD"
timeout_seconds = 10

[refresh]
chunk_size = 50

[summary]
cache_dir = "cache"
file_name = "summary.png"
font_path = "fonts/Roboto-Regular.ttf"
top_n = 5

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with every section documented
    fn generate_config_with_examples() -> String {
        r#"# Meridian Configuration File
# Country and exchange-rate refresh pipeline
#
# Any value can reference an environment variable with ${VAR_NAME}.
# Any value can be overridden with MERIDIAN_<SECTION>_<KEY>,
# e.g. MERIDIAN_SOURCES_TIMEOUT_SECONDS=20.

# Database target: "postgresql" for persistent storage,
# "memory" for a process-local store (contents are lost on exit)
database_target = "postgresql"

[application]
# trace | debug | info | warn | error
log_level = "info"

[sources]
# JSON array of {name, capital, region, population, flag, currencies: [{code}]}
countries_url = "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies"
# JSON object with a "rates" map of currency code to units per USD
exchange_rates_url = "https://open.er-api.com/v6/latest/USD"
# Per-request timeout (1-120)
timeout_seconds = 10

[refresh]
# Records walked per chunk (1-1000); the whole refresh is still one transaction
chunk_size = 50

[postgresql]
connection_string = "${MERIDIAN_DATABASE_URL}"
max_connections = 10
connection_timeout_seconds = 30
statement_timeout_seconds = 60
# disable | prefer | require
ssl_mode = "prefer"

[summary]
cache_dir = "cache"
file_name = "summary.png"
font_path = "fonts/Roboto-Regular.ttf"
# Countries in the GDP ranking (1-10)
top_n = 5
width = 600
height = 400

[logging]
local_enabled = true
local_path = "/var/log/meridian"
# daily | hourly | size
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }
}
