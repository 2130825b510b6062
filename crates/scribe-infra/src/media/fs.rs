//! Flat-directory media store for uploaded thumbnails and avatars.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use scribe_core::ports::{MediaError, MediaStore};

/// Filesystem-backed media store.
///
/// Stored names are `<stem><uuid><.ext>`; the random suffix stands in for a
/// collision check. Removal failures are logged and swallowed so cleanup
/// never blocks a completed database write.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Derive a unique filename, keeping the upload's stem and extension
    /// around a random suffix.
    fn unique_name(original: &str) -> String {
        // Strip any path components a client may have smuggled in.
        let original = Path::new(original)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");

        match original.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                format!("{stem}{}.{ext}", Uuid::new_v4())
            }
            _ => format!("{original}{}", Uuid::new_v4()),
        }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, MediaError> {
        let filename = Self::unique_name(original_name);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| MediaError {
                filename: filename.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(file = %filename, bytes = data.len(), "stored upload");
        Ok(filename)
    }

    async fn remove(&self, filename: &str) {
        let Some(name) = Path::new(filename).file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(file = %filename, "refusing to remove path-like media name");
            return;
        };

        if let Err(e) = tokio::fs::remove_file(self.root.join(name)).await {
            tracing::warn!(file = %filename, error = %e, "failed to remove media file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_keeps_stem_and_extension() {
        let tmp = TempDir::new().unwrap();
        let store = FsMediaStore::new(tmp.path()).unwrap();

        let name = store.store("photo.png", b"png-bytes").await.unwrap();

        assert!(name.starts_with("photo"));
        assert!(name.ends_with(".png"));
        assert_ne!(name, "photo.png");
        assert_eq!(std::fs::read(tmp.path().join(&name)).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn store_generates_distinct_names() {
        let tmp = TempDir::new().unwrap();
        let store = FsMediaStore::new(tmp.path()).unwrap();

        let first = store.store("photo.png", b"a").await.unwrap();
        let second = store.store("photo.png", b"b").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn store_handles_extensionless_names() {
        let tmp = TempDir::new().unwrap();
        let store = FsMediaStore::new(tmp.path()).unwrap();

        let name = store.store("README", b"text").await.unwrap();

        assert!(name.starts_with("README"));
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let tmp = TempDir::new().unwrap();
        let store = FsMediaStore::new(tmp.path()).unwrap();

        let name = store.store("photo.png", b"bytes").await.unwrap();
        store.remove(&name).await;

        assert!(!tmp.path().join(&name).exists());
    }

    #[tokio::test]
    async fn remove_missing_file_is_silent() {
        let tmp = TempDir::new().unwrap();
        let store = FsMediaStore::new(tmp.path()).unwrap();

        // Must not panic or surface the failure.
        store.remove("never-stored.png").await;
    }
}
