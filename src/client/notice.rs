/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message emitted after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

pub const UPLOAD_SUCCESS: &str = "تم رفع الملف بنجاح";
pub const UPLOAD_SUCCESS_DETAIL: &str = "تم إضافة الملف إلى قاعدة البيانات";
pub const UPLOAD_FAILED: &str = "فشل في رفع الملف";
pub const UPLOAD_FAILED_DETAIL: &str = "حدث خطأ أثناء رفع الملف";
pub const DELETE_SUCCESS: &str = "تم حذف الملف بنجاح";
pub const DELETE_FAILED: &str = "فشل في حذف الملف";
pub const DELETE_FAILED_DETAIL: &str = "حدث خطأ أثناء حذف الملف";

impl Notice {
    pub fn success(title: &str, description: Option<&str>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            description: Some(description.to_string()),
        }
    }
}
