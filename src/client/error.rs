use thiserror::Error;

use crate::shared::types::ApiResponse;
use crate::shared::validation::FieldErrors;

/// Failure of a call to the file repository API, as seen by a front end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other 4xx; `message` is the server's localized text
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: FieldErrors,
    },
}

impl ClientError {
    /// Classify a non-success response by status, keeping the server's message
    pub fn from_response(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(body).ok();
        let message = envelope
            .as_ref()
            .and_then(|e| e.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            404 => ClientError::NotFound(message),
            400..=499 => ClientError::Validation {
                message,
                field_errors: envelope
                    .and_then(|e| e.field_errors)
                    .unwrap_or_default(),
            },
            _ => ClientError::Server { status, message },
        }
    }

    /// Message suitable for showing to the user, when the server supplied one
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ClientError::Validation { message, .. } | ClientError::NotFound(message) => {
                Some(message.as_str()).filter(|m| !m.is_empty())
            }
            ClientError::Server { .. } | ClientError::Network(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::from_response(status.as_u16(), &err.to_string()),
            None => ClientError::Network(err.to_string()),
        }
    }
}
