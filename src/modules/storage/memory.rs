//! In-memory blob store for tests and local demos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobStore, StoredBlob};
use crate::core::error::AppError;

const URL_SCHEME: &str = "memory://";

/// Blobs kept in a `HashMap` behind a [`RwLock`]
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bytes and content type behind a URL
    pub async fn get(&self, url: &str) -> Option<(String, Vec<u8>)> {
        let key = url.strip_prefix(URL_SCHEME)?;
        self.blobs.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredBlob, AppError> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), (content_type.to_string(), data));

        Ok(StoredBlob {
            key: key.to_string(),
            url: format!("{}{}", URL_SCHEME, key),
        })
    }

    async fn delete_by_url(&self, url: &str) -> Result<(), AppError> {
        if let Some(key) = url.strip_prefix(URL_SCHEME) {
            self.blobs.write().await.remove(key);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryBlobStore::new();
        let blob = store
            .put("a.xlsx", vec![1, 2, 3], "application/octet-stream")
            .await
            .unwrap();

        assert_eq!(blob.url, "memory://a.xlsx");
        let (content_type, data) = store.get(&blob.url).await.unwrap();
        assert_eq!(content_type, "application/octet-stream");
        assert_eq!(data, vec![1, 2, 3]);

        store.delete_by_url(&blob.url).await.unwrap();
        assert!(store.is_empty().await);
    }
}
