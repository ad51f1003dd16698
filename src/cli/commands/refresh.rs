//! Refresh command implementation
//!
//! This module implements the `refresh` command, which runs the full pipeline
//! and prints the caller-facing result as JSON.

use super::{
    open_store, to_pretty_json, EXIT_INTERNAL, EXIT_OK, EXIT_UNAVAILABLE, EXIT_VALIDATION,
};
use crate::core::refresh::{ReconciliationEngine, RefreshError, RefreshReport, RefreshResult};
use clap::Args;

/// Arguments for the refresh command
#[derive(Args, Debug)]
pub struct RefreshArgs {}

impl RefreshArgs {
    /// Execute the refresh command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting refresh");

        let (config, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let engine = match ReconciliationEngine::from_config(&config, store) {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Failed to initialize refresh");
                println!("   Error: {e}");
                return Ok(EXIT_INTERNAL);
            }
        };

        let outcome = engine.refresh().await;
        println!("{}", to_pretty_json(&RefreshResult::from(&outcome))?);

        Ok(exit_code(&outcome))
    }
}

/// Exit code for a refresh outcome
pub fn exit_code(outcome: &Result<RefreshReport, RefreshError>) -> i32 {
    match outcome {
        Ok(report) if report.is_complete() => EXIT_OK,
        Ok(_) => EXIT_INTERNAL,
        Err(RefreshError::Validation(_)) => EXIT_VALIDATION,
        Err(RefreshError::Unavailable(_)) => EXIT_UNAVAILABLE,
        Err(RefreshError::InProgress) | Err(RefreshError::Internal(_)) => EXIT_INTERNAL,
    }
}
