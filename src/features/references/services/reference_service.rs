use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::references::dtos::{ReferenceDto, ReferenceListDto};
use crate::features::references::models::ReferenceKind;
use crate::features::references::repositories::ReferenceRepository;

/// Service for the subject, grade and semester vocabularies
pub struct ReferenceService {
    repository: Arc<dyn ReferenceRepository>,
}

impl ReferenceService {
    pub fn new(repository: Arc<dyn ReferenceRepository>) -> Self {
        Self { repository }
    }

    /// All three vocabularies
    pub async fn list_all(&self) -> Result<ReferenceListDto> {
        Ok(ReferenceListDto {
            subjects: self.list(ReferenceKind::Subject).await?,
            grades: self.list(ReferenceKind::Grade).await?,
            semesters: self.list(ReferenceKind::Semester).await?,
        })
    }

    pub async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceDto>> {
        let entries = self.repository.list(kind).await?;
        Ok(entries.into_iter().map(ReferenceDto::from).collect())
    }

    /// Fail with a field-level validation error when `code` is not in the vocabulary
    pub async fn ensure_exists(&self, kind: ReferenceKind, code: &str) -> Result<()> {
        if self.repository.exists(kind, code).await? {
            Ok(())
        } else {
            Err(AppError::field(kind.field(), kind.unknown_code_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::references::repositories::InMemoryReferenceRepository;

    fn service() -> ReferenceService {
        ReferenceService::new(Arc::new(InMemoryReferenceRepository::seeded()))
    }

    #[tokio::test]
    async fn test_list_all_resolves_display_names() {
        let references = service().list_all().await.unwrap();
        assert_eq!(references.subject_name("physics"), Some("الفيزياء"));
        assert_eq!(references.grade_name("11"), Some("الصف الحادي عشر"));
        assert_eq!(references.semester_name("1"), Some("الفصل الأول"));
        assert_eq!(references.subject_name("music"), None);
    }

    #[tokio::test]
    async fn test_ensure_exists_reports_field() {
        let err = service()
            .ensure_exists(ReferenceKind::Subject, "music")
            .await
            .unwrap_err();

        match err {
            AppError::Validation { fields, .. } => {
                assert_eq!(
                    fields.get("subject"),
                    Some(&vec!["المادة المختارة غير موجودة".to_string()])
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
