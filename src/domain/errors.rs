//! Domain error types
//!
//! This module defines the error hierarchy for Meridian.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Meridian error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External source errors (countries or exchange rates)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Summary artifact errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Which upstream dataset a source error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Country catalog
    Countries,
    /// Exchange-rate table
    ExchangeRates,
}

impl DataSource {
    /// Human-readable name used in caller-facing error details
    pub fn api_name(&self) -> &'static str {
        match self {
            DataSource::Countries => "Countries API",
            DataSource::ExchangeRates => "Exchange Rates API",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// External source errors
///
/// Every variant is treated as "unavailable" by the refresh pipeline; the
/// distinction only survives in logs.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure (DNS, refused connection, TLS)
    #[error("{source_name}: connection failed: {message}")]
    ConnectionFailed {
        source_name: DataSource,
        message: String,
    },

    /// Request exceeded the configured timeout
    #[error("{source_name}: request timed out after {seconds}s")]
    Timeout { source_name: DataSource, seconds: u64 },

    /// Non-success HTTP status
    #[error("{source_name}: unexpected status {status}")]
    Status { source_name: DataSource, status: u16 },

    /// Body could not be decoded
    #[error("{source_name}: invalid response body: {message}")]
    InvalidBody {
        source_name: DataSource,
        message: String,
    },
}

impl SourceError {
    /// The source this error came from
    pub fn data_source(&self) -> DataSource {
        match self {
            SourceError::ConnectionFailed { source_name, .. }
            | SourceError::Timeout { source_name, .. }
            | SourceError::Status { source_name, .. }
            | SourceError::InvalidBody { source_name, .. } => *source_name,
        }
    }
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not obtain a connection
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Insert/update failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Transaction begin/commit/rollback failed
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Unique key violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Row could not be mapped to a domain type
    #[error("Failed to decode row: {0}")]
    Decode(String),
}

/// Reason a summary artifact could not be produced
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rasterization backend failed or is unavailable
    #[error("Rendering backend unavailable: {0}")]
    Backend(String),

    /// Font resource missing or unreadable
    #[error("Font not found at: {0}")]
    FontMissing(String),

    /// Target directory missing or not writable
    #[error("Cannot write to directory: {0}")]
    DirectoryNotWritable(String),

    /// Writing the artifact failed
    #[error("Failed to save image to: {0}")]
    WriteFailed(String),

    /// Reading data for the summary failed
    #[error("Failed to read summary data: {0}")]
    Data(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MeridianError {
    fn from(err: std::io::Error) -> Self {
        MeridianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MeridianError {
    fn from(err: serde_json::Error) -> Self {
        MeridianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MeridianError {
    fn from(err: toml::de::Error) -> Self {
        MeridianError::Configuration(format!("TOML parse error: {err}"))
    }
}
