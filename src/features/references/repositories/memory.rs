use async_trait::async_trait;

use super::ReferenceRepository;
use crate::core::error::Result;
use crate::features::references::models::{ReferenceEntry, ReferenceKind};
use crate::shared::constants::{GRADES, SEMESTERS, SUBJECTS};

/// Read-only vocabularies seeded from the same data as the migrations
pub struct InMemoryReferenceRepository {
    subjects: Vec<ReferenceEntry>,
    grades: Vec<ReferenceEntry>,
    semesters: Vec<ReferenceEntry>,
}

impl InMemoryReferenceRepository {
    pub fn seeded() -> Self {
        Self {
            subjects: entries(SUBJECTS),
            grades: entries(GRADES),
            semesters: entries(SEMESTERS),
        }
    }

    fn entries_of(&self, kind: ReferenceKind) -> &[ReferenceEntry] {
        match kind {
            ReferenceKind::Subject => &self.subjects,
            ReferenceKind::Grade => &self.grades,
            ReferenceKind::Semester => &self.semesters,
        }
    }
}

impl Default for InMemoryReferenceRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

fn entries(seed: &[(&str, &str)]) -> Vec<ReferenceEntry> {
    seed.iter()
        .zip(1..)
        .map(|(&(name, display_name), id)| ReferenceEntry {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
        })
        .collect()
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntry>> {
        Ok(self.entries_of(kind).to_vec())
    }

    async fn exists(&self, kind: ReferenceKind, code: &str) -> Result<bool> {
        Ok(self.entries_of(kind).iter().any(|e| e.name == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_vocabularies() {
        let repo = InMemoryReferenceRepository::seeded();

        let subjects = repo.list(ReferenceKind::Subject).await.unwrap();
        assert_eq!(subjects.len(), 7);
        assert_eq!(subjects[0].id, 1);
        assert_eq!(subjects[0].name, "arabic");

        assert!(repo.exists(ReferenceKind::Grade, "12").await.unwrap());
        assert!(!repo.exists(ReferenceKind::Grade, "9").await.unwrap());
        assert!(repo.exists(ReferenceKind::Semester, "2").await.unwrap());
    }
}
