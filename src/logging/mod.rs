//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted local log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use meridian::logging::init_logging;
//! use meridian::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a refresh
///
/// # Example
///
/// ```no_run
/// use meridian::log_refresh_start;
///
/// log_refresh_start!("https://countries.example.com", "https://rates.example.com");
/// ```
#[macro_export]
macro_rules! log_refresh_start {
    ($countries_url:expr, $rates_url:expr) => {
        tracing::info!(
            countries_url = %$countries_url,
            exchange_rates_url = %$rates_url,
            "Starting country refresh"
        );
    };
}

/// Log the completion of a refresh
///
/// # Example
///
/// ```no_run
/// use meridian::log_refresh_complete;
/// use std::time::Duration;
///
/// log_refresh_complete!(250, 12, 238, Duration::from_millis(840));
/// ```
#[macro_export]
macro_rules! log_refresh_complete {
    ($total:expr, $created:expr, $updated:expr, $duration:expr) => {
        tracing::info!(
            total = $total,
            created = $created,
            updated = $updated,
            duration_ms = $duration.as_millis() as u64,
            "Country refresh committed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use meridian::log_error_with_context;
/// use meridian::domain::MeridianError;
///
/// let error = MeridianError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through the chunks of a batch
///
/// # Example
///
/// ```no_run
/// use meridian::log_chunk_processing;
///
/// log_chunk_processing!(100, 250);
/// ```
#[macro_export]
macro_rules! log_chunk_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing chunk"
        );
    };
}
