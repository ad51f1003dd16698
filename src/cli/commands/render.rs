//! Render command implementation
//!
//! This module implements the `render` command, which redraws the summary
//! image from persisted state without touching the upstream sources.

use super::{open_store, EXIT_INTERNAL, EXIT_OK};
use crate::core::summary::SummaryRenderer;
use chrono::Utc;
use clap::Args;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {}

impl RenderArgs {
    /// Execute the render command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Rendering summary image");

        let (config, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        // The footer shows the last committed refresh, falling back to now
        let as_of = match store.max_last_refreshed_at().await {
            Ok(Some(at)) => at,
            Ok(None) => Utc::now(),
            Err(e) => {
                println!("❌ Failed to read refresh time");
                println!("   Error: {e}");
                return Ok(EXIT_INTERNAL);
            }
        };

        let renderer = SummaryRenderer::with_defaults(store, config.summary.clone());
        match renderer.render(as_of).await {
            Ok(path) => {
                println!("✅ Summary image written: {}", path.display());
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to render summary image");
                println!("   Error: {e}");
                Ok(EXIT_INTERNAL)
            }
        }
    }
}
