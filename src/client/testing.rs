use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use super::api::{FilesApi, UploadRequest};
use super::ClientError;
use crate::features::auth::dtos::{AuthStatusDto, LoginRequestDto};
use crate::features::files::dtos::{FileListQuery, FileListResponse, FileWithRefs};
use crate::features::files::models::FileType;
use crate::features::references::dtos::ReferenceListDto;
use crate::shared::types::Pagination;

pub const FAKE_PASSWORD: &str = "letmein";

/// Scriptable in-process [`FilesApi`] that counts its calls
#[derive(Default)]
pub struct FakeFilesApi {
    files: Mutex<Vec<FileWithRefs>>,
    admin: Mutex<bool>,
    next_error: Mutex<Option<ClientError>>,
    list_gate: Mutex<Option<ListGate>>,
    list_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

/// Pauses one listing call after it has read its data
#[derive(Clone, Default)]
pub struct ListGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl FakeFilesApi {
    /// Make the next call fail with `err`
    pub fn fail_next(&self, err: ClientError) {
        *self.next_error.lock().unwrap() = Some(err);
    }

    /// Hold the next `list_files` call between its snapshot and its reply
    pub fn hold_next_list(&self) -> ListGate {
        let gate = ListGate::default();
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    fn scripted(&self) -> Result<(), ClientError> {
        match self.next_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FilesApi for FakeFilesApi {
    async fn list_files(&self, query: &FileListQuery) -> Result<FileListResponse, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.scripted()?;

        let gate = self.list_gate.lock().unwrap().take();
        let files = self.files.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let total = files.len() as i64;
        Ok(FileListResponse {
            files,
            pagination: Pagination::new(query.page_request(), total),
        })
    }

    async fn upload_file(&self, request: UploadRequest) -> Result<FileWithRefs, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.scripted()?;

        let now = Utc::now();
        let file = FileWithRefs {
            id: Uuid::now_v7(),
            title: request.metadata.title,
            description: request.metadata.description,
            subject: request.metadata.subject,
            grade: request.metadata.grade,
            semester: request.metadata.semester,
            filepath: format!("memory://{}", request.file.filename),
            filetype: FileType::from_filename(&request.file.filename).unwrap_or(FileType::Pdf),
            filename: request.file.filename,
            filesize: request.file.data.len() as i64,
            created_at: now,
            updated_at: now,
            download_count: 0,
            upload_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.files.lock().unwrap().insert(0, file.clone());
        Ok(file)
    }

    async fn delete_file(&self, id: Uuid) -> Result<(), ClientError> {
        self.scripted()?;

        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|file| file.id != id);
        if files.len() == before {
            return Err(ClientError::NotFound("الملف غير موجود".to_string()));
        }
        Ok(())
    }

    async fn list_references(&self) -> Result<ReferenceListDto, ClientError> {
        self.scripted()?;
        Ok(ReferenceListDto::default())
    }

    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthStatusDto, ClientError> {
        self.scripted()?;

        if credentials.password != FAKE_PASSWORD {
            return Err(ClientError::Validation {
                message: "اسم المستخدم أو كلمة المرور غير صحيحة".to_string(),
                field_errors: Default::default(),
            });
        }
        *self.admin.lock().unwrap() = true;
        Ok(AuthStatusDto { is_admin: true })
    }

    async fn logout(&self) -> Result<AuthStatusDto, ClientError> {
        self.scripted()?;
        *self.admin.lock().unwrap() = false;
        Ok(AuthStatusDto { is_admin: false })
    }

    async fn auth_status(&self) -> Result<AuthStatusDto, ClientError> {
        self.scripted()?;
        Ok(AuthStatusDto {
            is_admin: *self.admin.lock().unwrap(),
        })
    }
}
