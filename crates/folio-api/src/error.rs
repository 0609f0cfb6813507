//! Error types for content API operations.

use crate::forms::FormError;

/// Error from content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// A protected operation was attempted without a session.
    #[error("not logged in")]
    Unauthenticated,

    /// The login endpoint answered without a usable user or key.
    #[error("login failed: {0}")]
    Login(String),

    /// Form rejected before it was sent.
    #[error("invalid form: {0}")]
    Form(#[from] FormError),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a response error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server reported that the requested resource has no records.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The request lacked a valid API key.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthenticated) || matches!(self.status(), Some(401 | 403))
    }

    /// Message suitable for an inline notice.
    ///
    /// Prefers the `message` field of a JSON error body, then the error's own
    /// description.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::HttpResponse { body, .. } = self
            && let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
            && let Some(message) = value.get("message").and_then(serde_json::Value::as_str)
            && !message.is_empty()
        {
            return message.to_owned();
        }
        let message = self.to_string();
        if message.is_empty() {
            "An unexpected error occurred.".to_owned()
        } else {
            message
        }
    }
}
