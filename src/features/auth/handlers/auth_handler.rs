use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthStatusDto, LoginRequestDto};
use crate::features::auth::guards::MaybeAdmin;
use crate::features::auth::services::{session_token, SessionService};

/// Login as administrator
///
/// On success the session token is returned in the `edufiles_session` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = AuthStatusDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<impl IntoResponse> {
    dto.validate()?;

    let token = service.login(&dto).await?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, service.session_cookie(&token))]),
        Json(AuthStatusDto { is_admin: true }),
    ))
}

/// Logout and expire the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session closed", body = AuthStatusDto)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<SessionService>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        service.logout(&token).await;
    }

    (
        AppendHeaders([(header::SET_COOKIE, SessionService::expired_cookie())]),
        Json(AuthStatusDto { is_admin: false }),
    )
}

/// Whether the caller holds an admin session
#[utoipa::path(
    get,
    path = "/api/auth/status",
    responses(
        (status = 200, description = "Current session status", body = AuthStatusDto)
    ),
    tag = "auth"
)]
pub async fn status(MaybeAdmin(admin): MaybeAdmin) -> Json<AuthStatusDto> {
    Json(AuthStatusDto {
        is_admin: admin.is_some(),
    })
}
