//! Storage module for uploaded file bytes
//!
//! The rest of the crate only sees the [`BlobStore`] trait: bytes go in under a
//! key, a retrievable URL comes out. Backends: MinIO/S3, local disk, and an
//! in-memory store used by tests and demos.

mod local;
mod memory;
mod minio_client;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use minio_client::MinIOClient;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::AppError;

/// Where a blob landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Backend-relative object key
    pub key: String,
    /// URL a browser can open to view or download the blob
    pub url: String,
}

/// Opaque store for raw file bytes
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, returning its URL
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<StoredBlob, AppError>;

    /// Remove the blob behind a URL previously returned by [`BlobStore::put`].
    /// Unknown URLs are ignored.
    async fn delete_by_url(&self, url: &str) -> Result<(), AppError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Generate a collision-free object key keeping the original extension
pub fn generate_key(extension: &str) -> String {
    format!("{}.{}", Uuid::now_v7(), extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_keeps_lowercase_extension() {
        let key = generate_key("PDF");
        assert!(key.ends_with(".pdf"));
        let stem = key.trim_end_matches(".pdf");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_generate_key_is_unique() {
        assert_ne!(generate_key("docx"), generate_key("docx"));
    }
}
