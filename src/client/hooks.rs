//! Front-end data hooks over [`FilesApi`]
//!
//! Listings are cached per parameter tuple. Successful uploads and deletes
//! clear the whole listing cache and every mutation outcome is reported as a
//! [`Notice`]. A listing read gets one retry after a transport or server
//! failure; mutations are attempted once and never retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::api::{FilesApi, UploadRequest};
use super::cache::ListingCache;
use super::notice::{
    Notice, DELETE_FAILED, DELETE_FAILED_DETAIL, DELETE_SUCCESS, UPLOAD_FAILED,
    UPLOAD_FAILED_DETAIL, UPLOAD_SUCCESS, UPLOAD_SUCCESS_DETAIL,
};
use super::ClientError;
use crate::features::files::dtos::{FileListQuery, FileListResponse, FileWithRefs};

const READ_RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct FilesStore {
    api: Arc<dyn FilesApi>,
    cache: Mutex<ListingCache>,
    notices: Mutex<Vec<Notice>>,
    read_retry_delay: Duration,
}

impl FilesStore {
    pub fn new(api: Arc<dyn FilesApi>) -> Self {
        Self {
            api,
            cache: Mutex::new(ListingCache::new()),
            notices: Mutex::new(Vec::new()),
            read_retry_delay: READ_RETRY_DELAY,
        }
    }

    pub fn with_read_retry_delay(mut self, delay: Duration) -> Self {
        self.read_retry_delay = delay;
        self
    }

    /// Cached listing; fetched when this exact parameter tuple has not been seen
    pub async fn list_files(&self, query: &FileListQuery) -> Result<FileListResponse, ClientError> {
        let generation = {
            let cache = self.cache.lock().await;
            if let Some(hit) = cache.get(query) {
                debug!("Listing cache hit");
                return Ok(hit.clone());
            }
            cache.generation()
        };

        let response = self.fetch_listing(query).await?;

        let stored = self
            .cache
            .lock()
            .await
            .insert_if_current(generation, query, response.clone());
        if !stored {
            debug!("Listing fetched before a mutation; not cached");
        }
        Ok(response)
    }

    async fn fetch_listing(&self, query: &FileListQuery) -> Result<FileListResponse, ClientError> {
        match self.api.list_files(query).await {
            Err(err @ (ClientError::Network(_) | ClientError::Server { .. })) => {
                warn!("Listing failed, retrying once: {}", err);
                tokio::time::sleep(self.read_retry_delay).await;
                self.api.list_files(query).await
            }
            result => result,
        }
    }

    pub async fn upload_file(&self, request: UploadRequest) -> Result<FileWithRefs, ClientError> {
        match self.api.upload_file(request).await {
            Ok(file) => {
                self.cache.lock().await.invalidate_all();
                self.notify(Notice::success(UPLOAD_SUCCESS, Some(UPLOAD_SUCCESS_DETAIL)))
                    .await;
                Ok(file)
            }
            Err(err) => {
                warn!("Upload failed: {}", err);
                let detail = err.user_message().unwrap_or(UPLOAD_FAILED_DETAIL);
                self.notify(Notice::error(UPLOAD_FAILED, detail)).await;
                Err(err)
            }
        }
    }

    pub async fn delete_file(&self, id: Uuid) -> Result<(), ClientError> {
        match self.api.delete_file(id).await {
            Ok(()) => {
                self.cache.lock().await.invalidate_all();
                self.notify(Notice::success(DELETE_SUCCESS, None)).await;
                Ok(())
            }
            Err(err) => {
                warn!("Delete of {} failed: {}", id, err);
                self.notify(Notice::error(DELETE_FAILED, DELETE_FAILED_DETAIL))
                    .await;
                Err(err)
            }
        }
    }

    /// Notices emitted since the last call
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().await)
    }

    pub async fn cached_listings(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn notify(&self, notice: Notice) {
        self.notices.lock().await.push(notice);
    }
}
