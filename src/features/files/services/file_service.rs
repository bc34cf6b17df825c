use std::sync::Arc;

use chrono::{Timelike, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    CreateFileDto, FileListQuery, FileListResponse, FileWithRefs, UploadedFile,
    ACCEPTED_FILE_TYPES,
};
use crate::features::files::models::{FileType, NewFile};
use crate::features::files::repositories::FileRepository;
use crate::features::references::models::ReferenceKind;
use crate::features::references::ReferenceService;
use crate::modules::storage::{generate_key, BlobStore};
use crate::shared::constants::MAX_FILE_SIZE;
use crate::shared::types::Pagination;

const FILE_NOT_FOUND: &str = "الملف غير موجود";

/// A blob that has already been written to the blob store
#[derive(Debug, Clone)]
pub struct BlobRef {
    pub filename: String,
    pub url: String,
    pub filetype: FileType,
    pub size: i64,
}

/// Service for file metadata, blobs and download counts
pub struct FileService {
    repository: Arc<dyn FileRepository>,
    references: Arc<ReferenceService>,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(
        repository: Arc<dyn FileRepository>,
        references: Arc<ReferenceService>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            repository,
            references,
            blobs,
        }
    }

    /// Filtered, newest-first page of files
    pub async fn list_files(&self, query: &FileListQuery) -> Result<FileListResponse> {
        let filter = query.filter();
        let page = query.page_request();

        let (rows, total) = self.repository.list(&filter, page).await?;

        debug!(
            "Listed {} of {} files (page {}, size {})",
            rows.len(),
            total,
            page.page,
            page.page_size
        );

        Ok(FileListResponse {
            files: rows.into_iter().map(FileWithRefs::from).collect(),
            pagination: Pagination::new(page, total),
        })
    }

    pub async fn get_file(&self, id: Uuid) -> Result<FileWithRefs> {
        self.repository
            .find(id)
            .await?
            .map(FileWithRefs::from)
            .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))
    }

    /// Trimmed copy of `dto` after shape and vocabulary checks
    pub async fn validate_input(&self, dto: &CreateFileDto) -> Result<CreateFileDto> {
        let dto = dto.trimmed();
        dto.validate()?;

        self.references
            .ensure_exists(ReferenceKind::Subject, &dto.subject)
            .await?;
        self.references
            .ensure_exists(ReferenceKind::Grade, &dto.grade)
            .await?;
        self.references
            .ensure_exists(ReferenceKind::Semester, &dto.semester)
            .await?;

        Ok(dto)
    }

    /// Persist metadata for a blob that is already stored
    ///
    /// The id and timestamps are assigned here; the download counter starts at 0.
    pub async fn create_file(&self, dto: &CreateFileDto, blob: BlobRef) -> Result<FileWithRefs> {
        let dto = self.validate_input(dto).await?;
        self.persist(dto, blob).await
    }

    /// Insert an already validated row
    async fn persist(&self, dto: CreateFileDto, blob: BlobRef) -> Result<FileWithRefs> {
        let now = Utc::now();
        // Postgres keeps microseconds; truncate so both repositories agree
        let created_at = now
            .with_nanosecond(now.nanosecond() / 1_000 * 1_000)
            .unwrap_or(now);

        let new_file = NewFile {
            id: Uuid::now_v7(),
            title: dto.title,
            description: dto.description,
            subject: dto.subject,
            grade: dto.grade,
            semester: dto.semester,
            filename: blob.filename,
            filepath: blob.url,
            filetype: blob.filetype,
            filesize: blob.size,
            created_at,
        };

        let created = self.repository.create(new_file).await?;

        info!(
            "File created: id={}, type={}, size={}",
            created.file.id, created.file.filetype, created.file.filesize
        );

        Ok(FileWithRefs::from(created))
    }

    /// Validate, store the bytes, then record the metadata
    ///
    /// The blob is removed again when the metadata cannot be saved.
    pub async fn upload_file(
        &self,
        dto: &CreateFileDto,
        upload: Option<UploadedFile>,
    ) -> Result<FileWithRefs> {
        let dto = self.validate_input(dto).await?;

        let upload = upload.ok_or_else(|| AppError::field("file", "يرجى اختيار ملف لرفعه"))?;
        let filetype = FileType::from_filename(&upload.filename).ok_or_else(|| {
            AppError::field(
                "file",
                format!(
                    "نوع الملف غير مدعوم. الأنواع المسموحة: {}",
                    ACCEPTED_FILE_TYPES.join(", ")
                ),
            )
        })?;
        if upload.data.is_empty() {
            return Err(AppError::field("file", "الملف المرفوع فارغ"));
        }
        if upload.data.len() > MAX_FILE_SIZE {
            return Err(AppError::field(
                "file",
                format!(
                    "حجم الملف يتجاوز الحد المسموح ({} ميجابايت)",
                    MAX_FILE_SIZE / 1024 / 1024
                ),
            ));
        }

        let size = upload.data.len() as i64;
        let key = generate_key(filetype.as_str());
        let stored = self
            .blobs
            .put(&key, upload.data, filetype.content_type())
            .await?;

        debug!(
            "Blob stored via {}: {}",
            self.blobs.backend_name(),
            stored.key
        );

        let blob = BlobRef {
            filename: upload.filename,
            url: stored.url.clone(),
            filetype,
            size,
        };

        match self.persist(dto, blob).await {
            Ok(file) => Ok(file),
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete_by_url(&stored.url).await {
                    warn!("Failed to remove orphaned blob {}: {}", stored.url, cleanup);
                }
                Err(e)
            }
        }
    }

    /// Delete a file and its counter; the blob is removed best-effort afterwards
    pub async fn delete_file(&self, id: Uuid) -> Result<()> {
        let file = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))?;

        if let Err(e) = self.blobs.delete_by_url(&file.filepath).await {
            warn!("File {} deleted but blob {} remains: {}", id, file.filepath, e);
        }

        info!("File deleted: id={}", id);

        Ok(())
    }

    pub async fn increment_download_count(&self, id: Uuid) -> Result<i64> {
        self.repository
            .increment_download_count(id)
            .await?
            .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))
    }

    /// Record a download and return the URL to redirect to
    pub async fn download(&self, id: Uuid) -> Result<String> {
        let file = self.get_file(id).await?;
        let count = self.increment_download_count(id).await?;

        debug!("Download #{} of file {}", count, id);

        Ok(file.filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::repositories::InMemoryFileRepository;
    use crate::features::references::InMemoryReferenceRepository;
    use crate::features::references::models::ReferenceEntry;
    use crate::features::references::repositories::ReferenceRepository;
    use crate::modules::storage::MemoryBlobStore;
    use fake::faker::lorem::en::Words;
    use fake::Fake;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        service: Arc<FileService>,
        repository: Arc<InMemoryFileRepository>,
        blobs: Arc<MemoryBlobStore>,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryFileRepository::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let references = Arc::new(ReferenceService::new(Arc::new(
            InMemoryReferenceRepository::seeded(),
        )));
        let service = Arc::new(FileService::new(
            repository.clone(),
            references,
            blobs.clone(),
        ));
        Fixture {
            service,
            repository,
            blobs,
        }
    }

    fn dto() -> CreateFileDto {
        let title: Vec<String> = Words(2..4).fake();
        let description: Vec<String> = Words(3..6).fake();
        CreateFileDto {
            title: format!("Lesson {}", title.join(" ")),
            description: format!("Summary: {}", description.join(" ")),
            subject: "math".to_string(),
            grade: "10".to_string(),
            semester: "1".to_string(),
        }
    }

    fn pdf() -> UploadedFile {
        UploadedFile {
            filename: "worksheet.pdf".to_string(),
            data: b"%PDF-1.7 test".to_vec(),
        }
    }

    fn field_names(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation { fields, .. } => fields.into_keys().collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_valid_file_starts_with_zero_downloads() {
        let f = fixture();
        let file = f.service.upload_file(&dto(), Some(pdf())).await.unwrap();

        assert_eq!(file.download_count, 0);
        assert_eq!(file.filetype, FileType::Pdf);
        assert_eq!(file.filename, "worksheet.pdf");
        assert_eq!(file.filesize, 13);
        assert_eq!(file.created_at, file.updated_at);
        assert!(f.blobs.get(&file.filepath).await.is_some());
        assert!(f.repository.has_download_count(file.id).await);
    }

    #[tokio::test]
    async fn test_rejects_short_title_short_description_and_missing_subject() {
        let f = fixture();

        let short_title = CreateFileDto {
            title: "ab".to_string(),
            ..dto()
        };
        let err = f.service.upload_file(&short_title, Some(pdf())).await;
        assert_eq!(field_names(err.unwrap_err()), vec!["title"]);

        let short_description = CreateFileDto {
            description: "short".to_string(),
            ..dto()
        };
        let err = f.service.upload_file(&short_description, Some(pdf())).await;
        assert_eq!(field_names(err.unwrap_err()), vec!["description"]);

        let missing_subject = CreateFileDto {
            subject: String::new(),
            ..dto()
        };
        let err = f.service.upload_file(&missing_subject, Some(pdf())).await;
        assert_eq!(field_names(err.unwrap_err()), vec!["subject"]);

        assert!(f.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejects_unknown_vocabulary_code() {
        let f = fixture();
        let input = CreateFileDto {
            grade: "9".to_string(),
            ..dto()
        };

        let err = f.service.upload_file(&input, Some(pdf())).await.unwrap_err();
        assert_eq!(field_names(err), vec!["grade"]);
    }

    #[tokio::test]
    async fn test_rejects_bad_uploads() {
        let f = fixture();

        let err = f.service.upload_file(&dto(), None).await.unwrap_err();
        assert_eq!(field_names(err), vec!["file"]);

        let image = UploadedFile {
            filename: "photo.png".to_string(),
            data: vec![1, 2, 3],
        };
        let err = f.service.upload_file(&dto(), Some(image)).await.unwrap_err();
        assert_eq!(field_names(err), vec!["file"]);

        let empty = UploadedFile {
            filename: "empty.docx".to_string(),
            data: Vec::new(),
        };
        let err = f.service.upload_file(&dto(), Some(empty)).await.unwrap_err();
        assert_eq!(field_names(err), vec!["file"]);

        let huge = UploadedFile {
            filename: "huge.xlsx".to_string(),
            data: vec![0; MAX_FILE_SIZE + 1],
        };
        let err = f.service.upload_file(&dto(), Some(huge)).await.unwrap_err();
        assert_eq!(field_names(err), vec!["file"]);

        assert!(f.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_file_count_and_blob() {
        let f = fixture();
        let file = f.service.upload_file(&dto(), Some(pdf())).await.unwrap();

        f.service.delete_file(file.id).await.unwrap();

        assert!(!f.repository.has_download_count(file.id).await);
        assert!(f.blobs.get(&file.filepath).await.is_none());
        let listing = f
            .service
            .list_files(&FileListQuery::default())
            .await
            .unwrap();
        assert!(listing.files.iter().all(|item| item.id != file.id));

        let second = f.service.delete_file(file.id).await.unwrap_err();
        assert!(matches!(second, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_downloads_count_exactly() {
        let f = fixture();
        let file = f.service.upload_file(&dto(), Some(pdf())).await.unwrap();

        let downloads: Vec<_> = (0..25)
            .map(|_| {
                let service = Arc::clone(&f.service);
                tokio::spawn(async move { service.download(file.id).await })
            })
            .collect();
        for result in futures::future::join_all(downloads).await {
            assert_eq!(result.unwrap().unwrap(), file.filepath);
        }

        assert_eq!(f.service.get_file(file.id).await.unwrap().download_count, 25);
    }

    #[tokio::test]
    async fn test_increment_unknown_file_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .increment_download_count(Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_files_filters_and_paginates() {
        let f = fixture();
        for i in 0..7 {
            let input = CreateFileDto {
                subject: if i < 5 { "math" } else { "physics" }.to_string(),
                ..dto()
            };
            f.service.upload_file(&input, Some(pdf())).await.unwrap();
        }

        let query = FileListQuery {
            subject: Some("math".to_string()),
            page_size: Some(2),
            page: Some(3),
            ..Default::default()
        };
        let listing = f.service.list_files(&query).await.unwrap();

        assert_eq!(listing.files.len(), 1);
        assert!(listing.files.iter().all(|file| file.subject == "math"));
        assert_eq!(listing.pagination.total, 5);
        assert_eq!(listing.pagination.total_pages, 3);
    }

    /// Counts vocabulary lookups made through it
    struct CountingReferences {
        inner: InMemoryReferenceRepository,
        lookups: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ReferenceRepository for CountingReferences {
        async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>> {
            self.inner.list(kind).await
        }

        async fn exists(&self, kind: ReferenceKind, code: &str) -> Result<bool> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.exists(kind, code).await
        }
    }

    #[tokio::test]
    async fn test_upload_checks_each_vocabulary_once() {
        let references = Arc::new(CountingReferences {
            inner: InMemoryReferenceRepository::seeded(),
            lookups: AtomicUsize::new(0),
        });
        let service = FileService::new(
            Arc::new(InMemoryFileRepository::new()),
            Arc::new(ReferenceService::new(references.clone())),
            Arc::new(MemoryBlobStore::new()),
        );

        service.upload_file(&dto(), Some(pdf())).await.unwrap();

        assert_eq!(references.lookups.load(Ordering::SeqCst), 3);
    }
}
