//! Filesystem artifact store

use super::ArtifactStore;
use crate::domain::RenderError;
use async_trait::async_trait;
use std::path::Path;

/// Writes artifacts to the local filesystem
///
/// Writes go to a sibling temporary file first and are renamed into place, so
/// a reader never sees a half-written image.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactStore;

impl FsArtifactStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn ensure_dir(&self, dir: &Path) -> Result<(), RenderError> {
        let not_writable = || RenderError::DirectoryNotWritable(dir.display().to_string());

        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to create artifact directory");
            not_writable()
        })?;

        let metadata = tokio::fs::metadata(dir).await.map_err(|_| not_writable())?;
        if !metadata.is_dir() || metadata.permissions().readonly() {
            return Err(not_writable());
        }

        Ok(())
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
        let failed = || RenderError::WriteFailed(path.display().to_string());

        let mut tmp_name = path.file_name().ok_or_else(failed)?.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, bytes).await.map_err(|e| {
            tracing::warn!(path = %tmp_path.display(), error = %e, "Failed to write artifact");
            failed()
        })?;

        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to move artifact into place");
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(failed());
        }

        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache");
        let path = cache.join("summary.png");
        let store = FsArtifactStore::new();

        store.ensure_dir(&cache).await.unwrap();
        assert!(!store.exists(&path).await);

        store.write_bytes(&path, b"first").await.unwrap();
        store.write_bytes(&path, b"second").await.unwrap();

        assert!(store.exists(&path).await);
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!cache.join("summary.png.tmp").exists());
    }

    #[tokio::test]
    async fn test_ensure_dir_over_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let err = FsArtifactStore::new().ensure_dir(&file).await.unwrap_err();
        assert!(matches!(err, RenderError::DirectoryNotWritable(_)));
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.png");

        let err = FsArtifactStore::new()
            .write_bytes(&path, b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::WriteFailed(_)));
    }
}
