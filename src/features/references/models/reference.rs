use sqlx::FromRow;

/// Row of one of the reference vocabulary tables
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ReferenceEntry {
    pub id: i32,
    /// Stable code, e.g. "arabic" or "10"
    pub name: String,
    /// Localized label shown to users
    pub display_name: String,
}

/// The three vocabularies a file is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Subject,
    Grade,
    Semester,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [Self::Subject, Self::Grade, Self::Semester];

    pub fn table(self) -> &'static str {
        match self {
            Self::Subject => "subjects",
            Self::Grade => "grades",
            Self::Semester => "semesters",
        }
    }

    /// Field name used in file payloads and validation errors
    pub fn field(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Grade => "grade",
            Self::Semester => "semester",
        }
    }

    /// Localized message for a code missing from the vocabulary
    pub fn unknown_code_message(self) -> &'static str {
        match self {
            Self::Subject => "المادة المختارة غير موجودة",
            Self::Grade => "الصف الدراسي المختار غير موجود",
            Self::Semester => "الفصل الدراسي المختار غير موجود",
        }
    }
}
