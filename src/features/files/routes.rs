use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::files::handlers::{
    delete_file, download_file, get_file, list_files, upload_file,
};
use crate::features::files::services::FileService;
use crate::shared::constants::MAX_FILE_SIZE;

/// Create routes for the files feature
///
/// Reads are public; upload and delete check the admin session in their handlers.
pub fn routes(file_service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/files",
            // Allow body size up to MAX_FILE_SIZE + buffer for multipart overhead
            get(list_files)
                .post(upload_file)
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route("/api/files/{id}", get(get_file).delete(delete_file))
        .route("/api/files/{id}/download", get(download_file))
        .with_state(file_service)
}
