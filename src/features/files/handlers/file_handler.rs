use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::RequireAdmin;
use crate::features::files::dtos::{
    CreateFileDto, FileListQuery, FileListResponse, FileWithRefs, UploadFileDto, UploadedFile,
};
use crate::features::files::services::FileService;
use crate::shared::constants::MAX_FILE_SIZE;

/// List files with optional filters and pagination
#[utoipa::path(
    get,
    path = "/api/files",
    params(FileListQuery),
    responses(
        (status = 200, description = "Files retrieved successfully", body = FileListResponse),
    ),
    tag = "files"
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
    Query(query): Query<FileListQuery>,
) -> Result<Json<FileListResponse>> {
    Ok(Json(service.list_files(&query).await?))
}

/// Get a single file
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File retrieved successfully", body = FileWithRefs),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn get_file(
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FileWithRefs>> {
    Ok(Json(service.get_file(id).await?))
}

/// Upload a file
///
/// Accepts multipart/form-data with:
/// - `file`: the document (.pdf, .docx, .pptx or .xlsx, up to 10MB)
/// - `title`, `description`, `subject`, `grade`, `semester`
#[utoipa::path(
    post,
    path = "/api/files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Document plus its metadata",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = FileWithRefs),
        (status = 400, description = "Invalid file or validation error"),
        (status = 401, description = "Admin session required"),
        (status = 413, description = "File too large")
    ),
    security(
        ("session_cookie" = [])
    ),
    tag = "files"
)]
pub async fn upload_file(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileWithRefs>)> {
    let mut dto = CreateFileDto::default();
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error("file data", e))?;
            upload = Some(UploadedFile {
                filename,
                data: data.to_vec(),
            });
            continue;
        }

        let slot = match field_name.as_str() {
            "title" => &mut dto.title,
            "description" => &mut dto.description,
            "subject" => &mut dto.subject,
            "grade" => &mut dto.grade,
            "semester" => &mut dto.semester,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
                continue;
            }
        };
        *slot = field
            .text()
            .await
            .map_err(|e| multipart_error(&field_name, e))?;
    }

    let file = service.upload_file(&dto, upload).await?;

    debug!("File {} uploaded by {}", file.id, admin.username);

    Ok((StatusCode::CREATED, Json(file)))
}

/// Oversized bodies keep their 413; anything else is a malformed request
fn multipart_error(part: &str, err: MultipartError) -> AppError {
    debug!("Failed to read {}: {}", part, err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "حجم الملف يتجاوز الحد المسموح ({} ميجابايت)",
            MAX_FILE_SIZE / 1024 / 1024
        ))
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", part, err))
    }
}

/// Delete a file and its download counter
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 204, description = "File deleted successfully"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "File not found")
    ),
    security(
        ("session_cookie" = [])
    ),
    tag = "files"
)]
pub async fn delete_file(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.delete_file(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count a download and redirect to the stored file
#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 302, description = "Redirect to the file URL"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let url = service.download(id).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
