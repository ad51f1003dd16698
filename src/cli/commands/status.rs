//! Status command implementation
//!
//! This module implements the `status` command for displaying the number of
//! persisted countries and the time of the last refresh.

use super::{open_store, report_catalog_error, to_pretty_json, EXIT_OK};
use crate::core::catalog::CountryCatalog;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking refresh status");

        let (_, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match CountryCatalog::new(store).status().await {
            Ok(status) => {
                println!("{}", to_pretty_json(&status)?);
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_catalog_error(&e)),
        }
    }
}
