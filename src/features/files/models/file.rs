use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Accepted document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
}

impl FileType {
    pub const ALL: [FileType; 4] = [Self::Pdf, Self::Docx, Self::Pptx, Self::Xlsx];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Derive the type from a filename's extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        extension.parse().ok()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported file type '{0}'")]
pub struct UnsupportedFileType(pub String);

impl FromStr for FileType {
    type Err = UnsupportedFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "pptx" => Ok(Self::Pptx),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(UnsupportedFileType(s.to_string())),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = UnsupportedFileType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Database model for files
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct File {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub grade: String,
    pub semester: String,
    /// Original filename as uploaded
    pub filename: String,
    /// URL of the stored blob
    pub filepath: String,
    #[sqlx(try_from = "String")]
    pub filetype: FileType,
    pub filesize: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A file joined with its download counter
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FileWithCount {
    #[sqlx(flatten)]
    pub file: File,
    pub download_count: i64,
}

/// Everything needed to insert a file row; the id is generated by the caller
#[derive(Debug, Clone)]
pub struct NewFile {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub grade: String,
    pub semester: String,
    pub filename: String,
    pub filepath: String,
    pub filetype: FileType,
    pub filesize: i64,
    pub created_at: DateTime<Utc>,
}

impl NewFile {
    pub fn into_file(self) -> File {
        File {
            id: self.id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            grade: self.grade,
            semester: self.semester,
            filename: self.filename,
            filepath: self.filepath,
            filetype: self.filetype,
            filesize: self.filesize,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Listing filter; `None` imposes no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub semester: Option<String>,
    pub search: Option<String>,
}

impl FileFilter {
    /// Whether an in-memory file satisfies every supplied constraint
    pub fn matches(&self, file: &File) -> bool {
        let exact = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().map_or(true, |w| w == actual)
        };

        exact(&self.subject, &file.subject)
            && exact(&self.grade, &file.grade)
            && exact(&self.semester, &file.semester)
            && self.search.as_deref().map_or(true, |term| {
                let term = term.to_lowercase();
                file.title.to_lowercase().contains(&term)
                    || file.description.to_lowercase().contains(&term)
            })
    }

    /// ILIKE pattern for the search term with `%`, `_` and `\` matched literally
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }
}
