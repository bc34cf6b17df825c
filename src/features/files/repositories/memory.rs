use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::FileRepository;
use crate::core::error::Result;
use crate::features::files::models::{File, FileFilter, FileWithCount, NewFile};
use crate::shared::types::PageRequest;

#[derive(Default)]
struct Tables {
    files: HashMap<Uuid, File>,
    download_counts: HashMap<Uuid, i64>,
}

/// File rows and counters kept behind a single [`RwLock`], so the file/counter
/// pair is always created, deleted and incremented as one unit
#[derive(Default)]
pub struct InMemoryFileRepository {
    tables: RwLock<Tables>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a download-count row exists for `id`
    pub async fn has_download_count(&self, id: Uuid) -> bool {
        self.tables.read().await.download_counts.contains_key(&id)
    }
}

fn with_count(tables: &Tables, file: &File) -> FileWithCount {
    FileWithCount {
        file: file.clone(),
        download_count: tables.download_counts.get(&file.id).copied().unwrap_or(0),
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn list(
        &self,
        filter: &FileFilter,
        page: PageRequest,
    ) -> Result<(Vec<FileWithCount>, i64)> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&File> = tables
            .files
            .values()
            .filter(|file| filter.matches(file))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|file| with_count(&tables, file))
            .collect();

        Ok((items, total))
    }

    async fn find(&self, id: Uuid) -> Result<Option<FileWithCount>> {
        let tables = self.tables.read().await;
        Ok(tables.files.get(&id).map(|file| with_count(&tables, file)))
    }

    async fn create(&self, new_file: NewFile) -> Result<FileWithCount> {
        let file = new_file.into_file();
        let mut tables = self.tables.write().await;

        tables.download_counts.insert(file.id, 0);
        tables.files.insert(file.id, file.clone());

        Ok(FileWithCount {
            file,
            download_count: 0,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<Option<File>> {
        let mut tables = self.tables.write().await;

        let removed = tables.files.remove(&id);
        if removed.is_some() {
            tables.download_counts.remove(&id);
        }
        Ok(removed)
    }

    async fn increment_download_count(&self, id: Uuid) -> Result<Option<i64>> {
        let mut tables = self.tables.write().await;

        Ok(tables.download_counts.get_mut(&id).map(|count| {
            *count += 1;
            *count
        }))
    }
}
