use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::references::dtos::ReferenceListDto;
use crate::features::references::services::ReferenceService;

/// List the subject, grade and semester vocabularies
#[utoipa::path(
    get,
    path = "/api/references",
    responses(
        (status = 200, description = "Reference vocabularies", body = ReferenceListDto),
    ),
    tag = "references"
)]
pub async fn list_references(
    State(service): State<Arc<ReferenceService>>,
) -> Result<Json<ReferenceListDto>> {
    Ok(Json(service.list_all().await?))
}
