use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::FileRepository;
use crate::core::error::{AppError, Result};
use crate::features::files::models::{File, FileFilter, FileWithCount, NewFile};
use crate::shared::types::PageRequest;

const FILE_COLUMNS: &str = "id, title, description, subject, grade, semester, \
     filename, filepath, filetype, filesize, created_at, updated_at";

const SELECT_WITH_COUNT: &str = r#"
    SELECT f.id, f.title, f.description, f.subject, f.grade, f.semester,
           f.filename, f.filepath, f.filetype, f.filesize, f.created_at, f.updated_at,
           COALESCE(dc.count, 0)::BIGINT AS download_count
    FROM files f
    LEFT JOIN download_counts dc ON dc.file_id = f.id
"#;

pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for `filter`; every constraint is a bound parameter
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &FileFilter) {
    let mut separator = " WHERE ";

    let exact = [
        ("f.subject", &filter.subject),
        ("f.grade", &filter.grade),
        ("f.semester", &filter.semester),
    ];
    for (column, value) in exact {
        if let Some(value) = value {
            builder
                .push(separator)
                .push(column)
                .push(" = ")
                .push_bind(value.clone());
            separator = " AND ";
        }
    }

    if let Some(pattern) = filter.search_pattern() {
        builder
            .push(separator)
            .push("(f.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR f.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn list(
        &self,
        filter: &FileFilter,
        page: PageRequest,
    ) -> Result<(Vec<FileWithCount>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM files f");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count files: {:?}", e);
                AppError::Database(e)
            })?;

        let mut query = QueryBuilder::<Postgres>::new(SELECT_WITH_COUNT);
        push_filters(&mut query, filter);
        query
            .push(" ORDER BY f.created_at DESC, f.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<FileWithCount>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list files: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows, total))
    }

    async fn find(&self, id: Uuid) -> Result<Option<FileWithCount>> {
        let query = format!("{} WHERE f.id = $1", SELECT_WITH_COUNT);

        sqlx::query_as::<_, FileWithCount>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get file {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn create(&self, new_file: NewFile) -> Result<FileWithCount> {
        let mut tx = self.pool.begin().await?;

        let insert = format!(
            r#"
            INSERT INTO files (id, title, description, subject, grade, semester,
                               filename, filepath, filetype, filesize, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            FILE_COLUMNS
        );

        let file = sqlx::query_as::<_, File>(&insert)
            .bind(new_file.id)
            .bind(&new_file.title)
            .bind(&new_file.description)
            .bind(&new_file.subject)
            .bind(&new_file.grade)
            .bind(&new_file.semester)
            .bind(&new_file.filename)
            .bind(&new_file.filepath)
            .bind(new_file.filetype.as_str())
            .bind(new_file.filesize)
            .bind(new_file.created_at)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO download_counts (file_id, count) VALUES ($1, 0)")
            .bind(file.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Inserted file row {} with zeroed download count", file.id);

        Ok(FileWithCount {
            file,
            download_count: 0,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<Option<File>> {
        let mut tx = self.pool.begin().await?;

        // download_counts rows go with it through ON DELETE CASCADE
        let delete = format!("DELETE FROM files WHERE id = $1 RETURNING {}", FILE_COLUMNS);
        let deleted = sqlx::query_as::<_, File>(&delete)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }

    async fn increment_download_count(&self, id: Uuid) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE download_counts
            SET count = count + 1
            WHERE file_id = $1
            RETURNING count::BIGINT
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to increment download count for {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}
