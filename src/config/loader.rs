//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MeridianConfig;
use super::secret::secret_string;
use crate::domain::errors::MeridianError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MeridianConfig
/// 4. Applies environment variable overrides (MERIDIAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use meridian::config::loader::load_config;
///
/// let config = load_config("meridian.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MeridianConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MeridianError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MeridianError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MeridianConfig = toml::from_str(&contents)
        .map_err(|e| MeridianError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MeridianError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MeridianError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MeridianError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using MERIDIAN_* prefix
///
/// Environment variables follow the pattern: MERIDIAN_<SECTION>_<KEY>
/// For example: MERIDIAN_SOURCES_COUNTRIES_URL, MERIDIAN_REFRESH_CHUNK_SIZE
fn apply_env_overrides(config: &mut MeridianConfig) {
    if let Ok(val) = std::env::var("MERIDIAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Sources
    if let Ok(val) = std::env::var("MERIDIAN_SOURCES_COUNTRIES_URL") {
        config.sources.countries_url = val;
    }
    if let Ok(val) = std::env::var("MERIDIAN_SOURCES_EXCHANGE_RATES_URL") {
        config.sources.exchange_rates_url = val;
    }
    if let Ok(val) = std::env::var("MERIDIAN_SOURCES_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.sources.timeout_seconds = seconds;
        }
    }

    // Refresh
    if let Ok(val) = std::env::var("MERIDIAN_REFRESH_CHUNK_SIZE") {
        if let Ok(size) = val.parse() {
            config.refresh.chunk_size = size;
        }
    }

    // PostgreSQL (only if configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("MERIDIAN_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("MERIDIAN_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
    }

    // Summary
    if let Ok(val) = std::env::var("MERIDIAN_SUMMARY_CACHE_DIR") {
        config.summary.cache_dir = val;
    }
    if let Ok(val) = std::env::var("MERIDIAN_SUMMARY_FONT_PATH") {
        config.summary.font_path = val;
    }

    // Logging
    if let Ok(val) = std::env::var("MERIDIAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("MERIDIAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
