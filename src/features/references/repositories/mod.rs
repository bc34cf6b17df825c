//! Storage access for the reference vocabularies

mod memory;
mod postgres;

pub use memory::InMemoryReferenceRepository;
pub use postgres::PgReferenceRepository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::references::models::{ReferenceEntry, ReferenceKind};

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Entries of one vocabulary in seed order
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>>;

    /// Whether `code` exists in the vocabulary
    async fn exists(&self, kind: ReferenceKind, code: &str) -> Result<bool>;
}
