use async_trait::async_trait;
use sqlx::PgPool;

use super::ReferenceRepository;
use crate::core::error::{AppError, Result};
use crate::features::references::models::{ReferenceEntry, ReferenceKind};

pub struct PgReferenceRepository {
    pool: PgPool,
}

impl PgReferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceRepository for PgReferenceRepository {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>> {
        let query = format!(
            "SELECT id, name, display_name FROM {} ORDER BY id",
            kind.table()
        );

        sqlx::query_as::<_, ReferenceEntry>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {}: {:?}", kind.table(), e);
                AppError::Database(e)
            })
    }

    async fn exists(&self, kind: ReferenceKind, code: &str) -> Result<bool> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1)",
            kind.table()
        );

        sqlx::query_scalar::<_, bool>(&query)
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up {} '{}': {:?}", kind.field(), code, e);
                AppError::Database(e)
            })
    }
}
