//! Image command implementation
//!
//! This module implements the `image` command, which reports where the
//! summary image lives if one has been rendered.

use super::{EXIT_CONFIG, EXIT_NOT_FOUND, EXIT_OK};
use crate::adapters::artifact::{ArtifactStore, FsArtifactStore};
use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the image command
#[derive(Args, Debug)]
pub struct ImageArgs {}

impl ImageArgs {
    /// Execute the image command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let path = Path::new(&config.summary.cache_dir).join(&config.summary.file_name);
        if FsArtifactStore::new().exists(&path).await {
            println!("{}", path.display());
            Ok(EXIT_OK)
        } else {
            println!("🔍 Summary image not found");
            println!("   Run 'meridian refresh' or 'meridian render' first.");
            Ok(EXIT_NOT_FOUND)
        }
    }
}
