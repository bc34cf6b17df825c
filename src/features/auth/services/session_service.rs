use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::config::AdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::AdminIdentity;
use crate::shared::constants::SESSION_COOKIE;

struct Session {
    identity: AdminIdentity,
    expires_at: Instant,
}

/// Server-side admin sessions keyed by an opaque cookie token
pub struct SessionService {
    config: AdminConfig,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionService {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.config.session_ttl
    }

    /// Check the credentials and open a session, returning its token
    pub async fn login(&self, dto: &LoginRequestDto) -> Result<String> {
        let username_ok = constant_time_eq(dto.username.as_bytes(), self.config.username.as_bytes());
        let password_ok = constant_time_eq(dto.password.as_bytes(), self.config.password.as_bytes());

        if !(username_ok && password_ok) {
            warn!("Rejected admin login for '{}'", dto.username);
            return Err(AppError::Unauthorized(
                "اسم المستخدم أو كلمة المرور غير صحيحة".to_string(),
            ));
        }

        let token = new_token();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                identity: AdminIdentity {
                    username: self.config.username.clone(),
                },
                expires_at: now + self.config.session_ttl,
            },
        );

        info!("Admin session opened ({} active)", sessions.len());

        Ok(token)
    }

    /// Forget the session; unknown tokens are ignored
    pub async fn logout(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            info!("Admin session closed");
        }
    }

    /// Identity behind a live token
    pub async fn identify(&self, token: &str) -> Option<AdminIdentity> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|session| session.expires_at > Instant::now())
            .map(|session| session.identity.clone())
    }

    /// `Set-Cookie` value carrying a fresh session token
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.config.session_ttl.as_secs()
        )
    }

    /// `Set-Cookie` value that expires the session cookie
    pub fn expired_cookie() -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            SESSION_COOKIE
        )
    }
}

/// Session token from the request's `Cookie` headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn new_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn service(ttl: Duration) -> SessionService {
        SessionService::new(AdminConfig {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
            session_ttl: ttl,
        })
    }

    fn login(username: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_identify_logout() {
        let sessions = service(Duration::from_secs(60));

        let token = sessions.login(&login("admin", "s3cret")).await.unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(
            sessions.identify(&token).await.map(|id| id.username),
            Some("admin".to_string())
        );

        sessions.logout(&token).await;
        assert!(sessions.identify(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_unauthorized() {
        let sessions = service(Duration::from_secs(60));

        for (user, pass) in [("admin", "nope"), ("root", "s3cret"), ("", "")] {
            let err = sessions.login(&login(user, pass)).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let sessions = service(Duration::ZERO);
        let token = sessions.login(&login("admin", "s3cret")).await.unwrap();
        assert!(sessions.identify(&token).await.is_none());
    }

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; edufiles_session=abc123; lang=ar"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, HeaderValue::from_static("edufiles_session="));
        assert_eq!(session_token(&empty), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let sessions = service(Duration::from_secs(3600));
        let cookie = sessions.session_cookie("tok");
        assert!(cookie.starts_with("edufiles_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(SessionService::expired_cookie().contains("Max-Age=0"));
    }
}
