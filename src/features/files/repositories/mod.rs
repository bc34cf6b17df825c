//! Storage access for files and their download counters
//!
//! The service layer only talks to [`FileRepository`]; PostgreSQL backs it in
//! production and [`InMemoryFileRepository`] in tests.

mod memory;
mod postgres;

pub use memory::InMemoryFileRepository;
pub use postgres::PgFileRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::files::models::{File, FileFilter, FileWithCount, NewFile};
use crate::shared::types::PageRequest;

#[async_trait]
pub trait FileRepository: Send + Sync {
    /// One page of files matching `filter`, newest first (`created_at DESC, id DESC`),
    /// plus the total number of matches
    async fn list(
        &self,
        filter: &FileFilter,
        page: PageRequest,
    ) -> Result<(Vec<FileWithCount>, i64)>;

    async fn find(&self, id: Uuid) -> Result<Option<FileWithCount>>;

    /// Insert the file and its zeroed download counter atomically
    async fn create(&self, new_file: NewFile) -> Result<FileWithCount>;

    /// Delete the file (cascading to its counter); `None` when no row matched
    async fn delete(&self, id: Uuid) -> Result<Option<File>>;

    /// Atomically add one to the counter; `None` when the file does not exist
    async fn increment_download_count(&self, id: Uuid) -> Result<Option<i64>>;
}
