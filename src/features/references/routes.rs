use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::references::handlers;
use crate::features::references::services::ReferenceService;

/// Create routes for the reference vocabularies
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ReferenceService>) -> Router {
    Router::new()
        .route("/api/references", get(handlers::list_references))
        .with_state(service)
}
