use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use crate::core::app::{api_router, AppServices};
use crate::core::config::AdminConfig;
use crate::features::auth::SessionService;
use crate::features::files::{FileService, InMemoryFileRepository};
use crate::features::references::{InMemoryReferenceRepository, ReferenceService};
use crate::modules::storage::MemoryBlobStore;
use crate::shared::constants::SESSION_COOKIE;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Router-level fixture backed by in-memory storage
pub struct TestApp {
    pub server: TestServer,
    pub services: AppServices,
    pub repository: Arc<InMemoryFileRepository>,
    pub blobs: Arc<MemoryBlobStore>,
}

pub fn test_services() -> (AppServices, Arc<InMemoryFileRepository>, Arc<MemoryBlobStore>) {
    let repository = Arc::new(InMemoryFileRepository::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let references = Arc::new(ReferenceService::new(Arc::new(
        InMemoryReferenceRepository::seeded(),
    )));
    let files = Arc::new(FileService::new(
        repository.clone(),
        Arc::clone(&references),
        blobs.clone(),
    ));
    let sessions = Arc::new(SessionService::new(AdminConfig {
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        session_ttl: Duration::from_secs(3600),
    }));

    (
        AppServices {
            files,
            references,
            sessions,
        },
        repository,
        blobs,
    )
}

pub fn test_app() -> TestApp {
    let (services, repository, blobs) = test_services();
    let server = TestServer::new(api_router(&services)).expect("test server");

    TestApp {
        server,
        services,
        repository,
        blobs,
    }
}

impl TestApp {
    /// `Cookie` header for a freshly logged-in admin
    pub async fn admin_cookie(&self) -> (HeaderName, HeaderValue) {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD,
            }))
            .await;
        let cookie = response.cookie(SESSION_COOKIE);
        let value = format!("{}={}", SESSION_COOKIE, cookie.value());

        (
            header::COOKIE,
            HeaderValue::from_str(&value).expect("cookie header"),
        )
    }
}

/// Multipart body for `POST /api/files` with valid metadata
pub fn upload_form(title: &str, subject: &str, filename: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("description", "Practice questions with worked answers")
        .add_text("subject", subject.to_string())
        .add_text("grade", "11")
        .add_text("semester", "2")
        .add_part(
            "file",
            Part::bytes(data.to_vec())
                .file_name(filename.to_string())
                .mime_type("application/octet-stream"),
        )
}
