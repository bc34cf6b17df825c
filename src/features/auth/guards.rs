//! Authorization guards for admin-only handlers.
//!
//! The session middleware resolves the cookie into an [`AdminIdentity`] request
//! extension; these extractors only read that extension.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::model::AdminIdentity;

/// Guard for handlers that mutate the catalogue.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AdminIdentity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .cloned()
            .map(RequireAdmin)
            .ok_or_else(|| AppError::Unauthorized("يجب تسجيل الدخول كمسؤول".to_string()))
    }
}

/// Optional admin identity, for handlers that only report status
pub struct MaybeAdmin(pub Option<AdminIdentity>);

impl<S> FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(parts.extensions.get::<AdminIdentity>().cloned()))
    }
}
