//! Local-disk blob store
//!
//! Files are written below `root` and served back by the HTTP layer under
//! [`LocalBlobStore::MOUNT_PATH`].

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{BlobStore, StoredBlob};
use crate::core::error::AppError;

pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// URL path the stored files are served from
    pub const MOUNT_PATH: &'static str = "/uploads";

    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_prefix(&self) -> String {
        format!("{}{}/", self.public_base_url, Self::MOUNT_PATH)
    }

    /// Resolve a key to a path inside `root`, refusing anything that escapes it
    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !safe {
            return Err(AppError::BadRequest(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredBlob, AppError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Internal(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write file '{}': {}", path.display(), e))
        })?;

        debug!("Stored file '{}' on local disk", path.display());

        Ok(StoredBlob {
            key: key.to_string(),
            url: format!("{}{}", self.url_prefix(), key),
        })
    }

    async fn delete_by_url(&self, url: &str) -> Result<(), AppError> {
        let prefix = self.url_prefix();
        let Some(key) = url.strip_prefix(prefix.as_str()) else {
            warn!("URL '{}' is not served by the local store", url);
            return Ok(());
        };

        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted local file '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_delete_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:3000/");

        let blob = store
            .put("lesson.pdf", b"%PDF-1.7".to_vec(), "application/pdf")
            .await
            .unwrap();
        assert_eq!(blob.url, "http://localhost:3000/uploads/lesson.pdf");
        assert!(dir.path().join("lesson.pdf").exists());

        store.delete_by_url(&blob.url).await.unwrap();
        assert!(!dir.path().join("lesson.pdf").exists());

        // deleting twice is not an error
        store.delete_by_url(&blob.url).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_keys_escaping_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:3000");

        let result = store.put("../evil.pdf", vec![1], "application/pdf").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_foreign_urls_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:3000");

        store
            .delete_by_url("https://elsewhere.example/uploads/x.pdf")
            .await
            .unwrap();
    }
}
