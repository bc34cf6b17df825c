use std::fmt;

use crate::features::files::dtos::FileWithRefs;
use crate::features::files::models::FileType;
use crate::features::references::dtos::ReferenceListDto;
use crate::presentation::format::{arabic_date, format_bytes};

pub const UNKNOWN_SUBJECT: &str = "مادة غير معروفة";
pub const UNKNOWN_GRADE: &str = "صف غير معروف";
pub const UNKNOWN_SEMESTER: &str = "فصل غير معروف";
pub const VIEW_LABEL: &str = "عرض";

/// Icon glyph per document type
pub fn file_icon(filetype: FileType) -> &'static str {
    match filetype {
        FileType::Pdf => "📕",
        FileType::Docx => "📘",
        FileType::Pptx => "📙",
        FileType::Xlsx => "📗",
    }
}

/// Everything a file card shows, already resolved and formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCard {
    pub icon: &'static str,
    pub extension: &'static str,
    pub title: String,
    pub subject_name: String,
    pub grade_name: String,
    pub semester_name: String,
    pub size_label: String,
    pub date_label: String,
    pub view_url: String,
    pub download_count: i64,
}

impl FileCard {
    pub fn new(file: &FileWithRefs, references: &ReferenceListDto) -> Self {
        Self {
            icon: file_icon(file.filetype),
            extension: file.filetype.as_str(),
            title: file.title.clone(),
            subject_name: references
                .subject_name(&file.subject)
                .unwrap_or(UNKNOWN_SUBJECT)
                .to_string(),
            grade_name: references
                .grade_name(&file.grade)
                .unwrap_or(UNKNOWN_GRADE)
                .to_string(),
            semester_name: references
                .semester_name(&file.semester)
                .unwrap_or(UNKNOWN_SEMESTER)
                .to_string(),
            size_label: format_bytes(file.filesize),
            date_label: arabic_date(file.created_at),
            view_url: file.filepath.clone(),
            download_count: file.download_count,
        }
    }
}

impl fmt::Display for FileCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}] {}", self.icon, self.extension, self.title)?;
        writeln!(f, "{} • {}", self.subject_name, self.size_label)?;
        writeln!(
            f,
            "{} • {} • {}",
            self.grade_name, self.semester_name, self.date_label
        )?;
        write!(f, "{}: {}", VIEW_LABEL, self.view_url)
    }
}
