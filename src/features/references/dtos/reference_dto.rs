use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::references::models::ReferenceEntry;

/// One vocabulary entry as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDto {
    /// Stable code used when filtering and uploading
    #[schema(example = "math")]
    pub code: String,
    /// Localized label
    #[schema(example = "الرياضيات")]
    pub display_name: String,
}

impl From<ReferenceEntry> for ReferenceDto {
    fn from(entry: ReferenceEntry) -> Self {
        Self {
            code: entry.name,
            display_name: entry.display_name,
        }
    }
}

/// All vocabularies in one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceListDto {
    pub subjects: Vec<ReferenceDto>,
    pub grades: Vec<ReferenceDto>,
    pub semesters: Vec<ReferenceDto>,
}

impl ReferenceListDto {
    /// Display name of a subject code, if known
    pub fn subject_name(&self, code: &str) -> Option<&str> {
        Self::lookup(&self.subjects, code)
    }

    pub fn grade_name(&self, code: &str) -> Option<&str> {
        Self::lookup(&self.grades, code)
    }

    pub fn semester_name(&self, code: &str) -> Option<&str> {
        Self::lookup(&self.semesters, code)
    }

    fn lookup<'a>(entries: &'a [ReferenceDto], code: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.display_name.as_str())
    }
}
