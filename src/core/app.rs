use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};

use crate::core::middleware;
use crate::features::auth::{self, SessionService};
use crate::features::files::{self, FileService};
use crate::features::references::{self, ReferenceService};

/// Services shared by every route
#[derive(Clone)]
pub struct AppServices {
    pub files: Arc<FileService>,
    pub references: Arc<ReferenceService>,
    pub sessions: Arc<SessionService>,
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Every API route, with admin sessions resolved from the cookie
///
/// Swagger, static uploads and the outer HTTP layers are added by the binary.
pub fn api_router(services: &AppServices) -> Router {
    Router::new()
        .merge(files::routes(Arc::clone(&services.files)))
        .merge(references::routes(Arc::clone(&services.references)))
        .merge(auth::routes(Arc::clone(&services.sessions)))
        .route("/health", get(health_check))
        .layer(from_fn_with_state(
            Arc::clone(&services.sessions),
            middleware::session_middleware,
        ))
}
