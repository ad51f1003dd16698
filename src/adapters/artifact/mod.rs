//! Storage for rendered artifacts
//!
//! The summary renderer writes through [`ArtifactStore`]; [`FsArtifactStore`]
//! is the local filesystem implementation.

pub mod fs;

use crate::domain::RenderError;
use async_trait::async_trait;
use std::path::Path;

pub use fs::FsArtifactStore;

/// Named-path byte storage
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create `dir` if needed and check that it accepts writes
    async fn ensure_dir(&self, dir: &Path) -> Result<(), RenderError>;

    /// Replace the contents at `path`
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), RenderError>;

    /// Whether an artifact exists at `path`
    async fn exists(&self, path: &Path) -> bool;
}
