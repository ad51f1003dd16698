//! Refresh outcomes
//!
//! A refresh has two phases with independent outcomes: persistence (all or
//! nothing) and the summary artifact rendered after commit. [`RefreshReport`]
//! keeps them apart; [`RefreshResult`] folds them into the caller-facing shape.

use crate::domain::{DataSource, FieldErrors, RenderError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Reason a refresh did not commit
#[derive(Debug, Error)]
pub enum RefreshError {
    /// One of the upstream sources could not be read; nothing was written
    #[error("External data source unavailable: {0}")]
    Unavailable(DataSource),

    /// A record failed validation; the whole batch was rolled back
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Another refresh is running in this process
    #[error("Refresh already in progress")]
    InProgress,

    /// Anything else before commit; the batch was rolled back
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl RefreshError {
    /// Caller-facing error label
    pub fn label(&self) -> &'static str {
        match self {
            RefreshError::Unavailable(_) => "External data source unavailable",
            RefreshError::Validation(_) => "Validation failed",
            RefreshError::InProgress => "Refresh already in progress",
            RefreshError::Internal(_) => "Internal server error",
        }
    }

    /// Caller-facing details
    pub fn details(&self) -> Value {
        match self {
            RefreshError::Unavailable(source) => {
                json!(format!("Could not fetch data from {}", source.api_name()))
            }
            RefreshError::Validation(errors) => json!(errors),
            RefreshError::InProgress => json!("A refresh is already running; try again later"),
            RefreshError::Internal(message) => json!(message),
        }
    }
}

/// Result of a committed refresh
#[derive(Debug)]
pub struct RefreshReport {
    /// Snapshot time stamped on every touched row
    pub last_refreshed_at: DateTime<Utc>,

    /// Records processed
    pub total: usize,

    /// Rows created
    pub created: usize,

    /// Rows updated in place
    pub updated: usize,

    /// Wall time from first fetch to commit
    pub duration: Duration,

    /// Summary artifact outcome; persistence stands either way
    pub artifact: Result<PathBuf, RenderError>,
}

impl RefreshReport {
    /// Both phases succeeded
    pub fn is_complete(&self) -> bool {
        self.artifact.is_ok()
    }

    /// Log the report
    pub fn log_summary(&self) {
        crate::log_refresh_complete!(self.total, self.created, self.updated, self.duration);

        match &self.artifact {
            Ok(path) => tracing::info!(path = %path.display(), "Summary image written"),
            Err(e) => tracing::error!(
                error = %e,
                "Summary image failed after a committed refresh"
            ),
        }
    }
}

/// Caller-facing refresh result
///
/// Serializes as `{"success": true, "last_refreshed_at": ...}` or
/// `{"error": ..., "details": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RefreshResult {
    Success {
        success: bool,
        last_refreshed_at: DateTime<Utc>,
    },
    Failure {
        error: String,
        details: Value,
    },
}

impl RefreshResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RefreshResult::Success { .. })
    }

    /// Error label, if this is a failure
    pub fn error(&self) -> Option<&str> {
        match self {
            RefreshResult::Success { .. } => None,
            RefreshResult::Failure { error, .. } => Some(error),
        }
    }
}

impl From<&RefreshError> for RefreshResult {
    fn from(err: &RefreshError) -> Self {
        RefreshResult::Failure {
            error: err.label().to_string(),
            details: err.details(),
        }
    }
}

impl From<&RefreshReport> for RefreshResult {
    /// A render failure after commit is still reported as an internal error
    fn from(report: &RefreshReport) -> Self {
        match &report.artifact {
            Ok(_) => RefreshResult::Success {
                success: true,
                last_refreshed_at: report.last_refreshed_at,
            },
            Err(e) => RefreshResult::Failure {
                error: "Internal server error".to_string(),
                details: json!(e.to_string()),
            },
        }
    }
}

impl From<&Result<RefreshReport, RefreshError>> for RefreshResult {
    fn from(outcome: &Result<RefreshReport, RefreshError>) -> Self {
        match outcome {
            Ok(report) => report.into(),
            Err(err) => err.into(),
        }
    }
}
