use std::collections::HashMap;

use crate::features::files::dtos::{FileListQuery, FileListResponse};

/// Cache key: every listing parameter exactly as requested
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub semester: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<&FileListQuery> for ListingKey {
    fn from(query: &FileListQuery) -> Self {
        Self {
            subject: query.subject.clone(),
            grade: query.grade.clone(),
            semester: query.semester.clone(),
            search: query.search.clone(),
            page: query.page,
            page_size: query.page_size,
        }
    }
}

/// Listing responses by [`ListingKey`]
///
/// `generation` moves on every invalidation so a fetch that started before a
/// mutation cannot repopulate the cache with a pre-mutation page.
#[derive(Debug, Default)]
pub struct ListingCache {
    entries: HashMap<ListingKey, FileListResponse>,
    generation: u64,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &FileListQuery) -> Option<&FileListResponse> {
        self.entries.get(&ListingKey::from(query))
    }

    pub fn insert(&mut self, query: &FileListQuery, response: FileListResponse) {
        self.entries.insert(ListingKey::from(query), response);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Store `response` only if no invalidation happened since `generation` was read
    pub fn insert_if_current(
        &mut self,
        generation: u64,
        query: &FileListQuery,
        response: FileListResponse,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.insert(query, response);
        true
    }

    /// Drop every listing; any mutation may shift items across pages and filters
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{PageRequest, Pagination};

    fn empty_page() -> FileListResponse {
        FileListResponse {
            files: Vec::new(),
            pagination: Pagination::new(PageRequest::default(), 0),
        }
    }

    #[test]
    fn test_any_parameter_change_misses() {
        let mut cache = ListingCache::new();
        let query = FileListQuery {
            subject: Some("math".to_string()),
            page: Some(1),
            ..Default::default()
        };
        cache.insert(&query, empty_page());

        assert!(cache.get(&query).is_some());
        for changed in [
            FileListQuery {
                page: Some(2),
                ..query.clone()
            },
            FileListQuery {
                page_size: Some(12),
                ..query.clone()
            },
            FileListQuery {
                search: Some("x".to_string()),
                ..query.clone()
            },
            FileListQuery {
                grade: Some("10".to_string()),
                ..query.clone()
            },
        ] {
            assert!(cache.get(&changed).is_none());
        }

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_after_invalidation_is_dropped() {
        let mut cache = ListingCache::new();
        let query = FileListQuery::default();

        let seen = cache.generation();
        cache.invalidate_all();

        assert!(!cache.insert_if_current(seen, &query, empty_page()));
        assert!(cache.get(&query).is_none());

        let current = cache.generation();
        assert!(cache.insert_if_current(current, &query, empty_page()));
        assert_eq!(cache.len(), 1);
    }
}
