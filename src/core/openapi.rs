use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers, models as files_models};
use crate::features::references::{dtos as references_dtos, handlers as references_handlers};
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::types::Pagination;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::status,
        // Files
        files_handlers::list_files,
        files_handlers::get_file,
        files_handlers::upload_file,
        files_handlers::delete_file,
        files_handlers::download_file,
        // References (public)
        references_handlers::list_references,
    ),
    components(
        schemas(
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthStatusDto,
            // Files
            files_models::FileType,
            files_dtos::FileWithRefs,
            files_dtos::FileListResponse,
            files_dtos::UploadFileDto,
            Pagination,
            // References
            references_dtos::ReferenceDto,
            references_dtos::ReferenceListDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin session login and logout"),
        (name = "files", description = "Educational files: listing, upload, deletion and downloads"),
        (name = "references", description = "Subject, grade and semester vocabularies (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "EduFiles API",
        version = "0.1.0",
        description = "API documentation for the educational file repository",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
