//! Summary rendering from persisted state

use super::layout::SummaryLayout;
use super::raster::{PngRasterizer, Rasterizer};
use crate::adapters::artifact::{ArtifactStore, FsArtifactStore};
use crate::adapters::database::CountryStore;
use crate::config::SummaryConfig;
use crate::domain::RenderError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Renders the summary image from committed store state
///
/// Every failure, from reading the store to writing the file, surfaces as a
/// [`RenderError`].
pub struct SummaryRenderer {
    store: Arc<dyn CountryStore + Send + Sync>,
    artifacts: Arc<dyn ArtifactStore>,
    rasterizer: Arc<dyn Rasterizer>,
    config: SummaryConfig,
}

impl SummaryRenderer {
    pub fn new(
        store: Arc<dyn CountryStore + Send + Sync>,
        artifacts: Arc<dyn ArtifactStore>,
        rasterizer: Arc<dyn Rasterizer>,
        config: SummaryConfig,
    ) -> Self {
        Self {
            store,
            artifacts,
            rasterizer,
            config,
        }
    }

    /// Renderer writing PNGs to the local filesystem with the configured font
    pub fn with_defaults(store: Arc<dyn CountryStore + Send + Sync>, config: SummaryConfig) -> Self {
        let rasterizer = Arc::new(PngRasterizer::new(&config.font_path));
        Self::new(store, Arc::new(FsArtifactStore::new()), rasterizer, config)
    }

    /// Directory holding the artifact
    pub fn cache_dir(&self) -> &Path {
        Path::new(&self.config.cache_dir)
    }

    /// Well-known artifact location
    pub fn artifact_path(&self) -> PathBuf {
        self.cache_dir().join(&self.config.file_name)
    }

    /// Whether an artifact has been rendered
    pub async fn artifact_exists(&self) -> bool {
        self.artifacts.exists(&self.artifact_path()).await
    }

    /// Render and write the artifact, replacing any previous one
    pub async fn render(&self, as_of: DateTime<Utc>) -> Result<PathBuf, RenderError> {
        let total = self
            .store
            .count()
            .await
            .map_err(|e| RenderError::Data(e.to_string()))?;
        let top = self
            .store
            .top_by_estimated_gdp(self.config.top_n)
            .await
            .map_err(|e| RenderError::Data(e.to_string()))?;

        let layout = SummaryLayout::build(
            total,
            &top,
            self.config.top_n,
            as_of,
            self.config.width,
            self.config.height,
        );

        let rasterizer = Arc::clone(&self.rasterizer);
        let bytes = tokio::task::spawn_blocking(move || rasterizer.rasterize(&layout))
            .await
            .map_err(|e| RenderError::Backend(format!("Rasterizer task failed: {e}")))??;

        self.artifacts.ensure_dir(self.cache_dir()).await?;

        let path = self.artifact_path();
        self.artifacts.write_bytes(&path, &bytes).await?;

        tracing::info!(
            path = %path.display(),
            total_countries = total,
            ranked = top.len(),
            "Summary image rendered"
        );
        Ok(path)
    }
}
