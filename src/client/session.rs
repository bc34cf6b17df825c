use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::api::FilesApi;
use super::ClientError;
use crate::features::auth::dtos::LoginRequestDto;

/// Client-side admin flag with an explicit login/logout lifecycle
///
/// The flag only mirrors the server session; mutations are still checked by the
/// server against the session cookie.
pub struct AdminSession {
    api: Arc<dyn FilesApi>,
    is_admin: AtomicBool,
}

impl AdminSession {
    pub fn new(api: Arc<dyn FilesApi>) -> Self {
        Self {
            api,
            is_admin: AtomicBool::new(false),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.load(Ordering::SeqCst)
    }

    /// `Ok(false)` for rejected credentials; other failures are errors
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, ClientError> {
        let credentials = LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(status) => {
                self.is_admin.store(status.is_admin, Ordering::SeqCst);
                info!("Admin login succeeded");
                Ok(status.is_admin)
            }
            Err(ClientError::Validation { message, .. }) => {
                warn!("Admin login rejected: {}", message);
                self.is_admin.store(false, Ordering::SeqCst);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Forget the flag locally even when the server cannot be reached
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.is_admin.store(false, Ordering::SeqCst);
        self.api.logout().await.map(|_| ())
    }

    /// Re-read the flag from the server
    pub async fn refresh(&self) -> Result<bool, ClientError> {
        let status = self.api.auth_status().await?;
        self.is_admin.store(status.is_admin, Ordering::SeqCst);
        Ok(status.is_admin)
    }
}
