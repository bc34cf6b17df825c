use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::files::models::{FileFilter, FileType, FileWithCount};
use crate::shared::types::{PageRequest, Pagination};
use crate::shared::validation::{
    validate_description, validate_grade, validate_semester, validate_subject, validate_title,
};

/// A file joined with its live download count, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileWithRefs {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(example = "math")]
    pub subject: String,
    #[schema(example = "10")]
    pub grade: String,
    #[schema(example = "1")]
    pub semester: String,
    /// Original filename as uploaded
    pub filename: String,
    /// URL to view or download the stored file
    pub filepath: String,
    pub filetype: FileType,
    /// Size of the file in bytes
    pub filesize: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub download_count: i64,
    /// Upload instant normalized to RFC 3339 UTC with millisecond precision
    #[schema(example = "2025-03-01T09:30:00.000Z")]
    pub upload_date: String,
}

impl From<FileWithCount> for FileWithRefs {
    fn from(row: FileWithCount) -> Self {
        let file = row.file;
        Self {
            upload_date: file.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            id: file.id,
            title: file.title,
            description: file.description,
            subject: file.subject,
            grade: file.grade,
            semester: file.semester,
            filename: file.filename,
            filepath: file.filepath,
            filetype: file.filetype,
            filesize: file.filesize,
            created_at: file.created_at,
            updated_at: file.updated_at,
            download_count: row.download_count,
        }
    }
}

/// Query parameters for `GET /api/files`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FileListQuery {
    /// Subject code (exact match)
    pub subject: Option<String>,
    /// Grade code (exact match)
    pub grade: Option<String>,
    /// Semester code (exact match)
    pub semester: Option<String>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Number of items per page (default: 6, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl FileListQuery {
    /// Filter part of the query; blank values impose no constraint
    pub fn filter(&self) -> FileFilter {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        FileFilter {
            subject: present(&self.subject),
            grade: present(&self.grade),
            semester: present(&self.semester),
            search: present(&self.search),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Response body of `GET /api/files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileWithRefs>,
    pub pagination: Pagination,
}

/// Metadata accompanying an upload
///
/// Server-assigned fields (id, timestamps) have no counterpart here, so they
/// can never be supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CreateFileDto {
    #[validate(custom(function = "validate_title"))]
    #[serde(default)]
    pub title: String,

    #[validate(custom(function = "validate_description"))]
    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_subject"))]
    #[serde(default)]
    pub subject: String,

    #[validate(custom(function = "validate_grade"))]
    #[serde(default)]
    pub grade: String,

    #[validate(custom(function = "validate_semester"))]
    #[serde(default)]
    pub semester: String,
}

impl CreateFileDto {
    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            subject: self.subject.trim().to_string(),
            grade: self.grade.trim().to_string(),
            semester: self.semester.trim().to_string(),
        }
    }
}

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The document to upload (.pdf, .docx, .pptx or .xlsx, up to 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    #[schema(example = "ملخص الوحدة الأولى")]
    pub title: String,
    #[schema(example = "ملخص شامل لدروس الوحدة الأولى مع تمارين")]
    pub description: String,
    #[schema(example = "math")]
    pub subject: String,
    #[schema(example = "10")]
    pub grade: String,
    #[schema(example = "1")]
    pub semester: String,
}

/// Raw uploaded bytes with their client-side name
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Accepted extensions, as shown in error messages
pub const ACCEPTED_FILE_TYPES: &[&str] = &[".pdf", ".docx", ".pptx", ".xlsx"];
