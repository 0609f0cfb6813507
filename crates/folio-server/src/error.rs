//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_api::{ApiError, Id};
use folio_navigator::MISSING_SUBJECT_MESSAGE;
use serde_json::json;

use crate::layout;

/// Message for a sub title that is not part of the requested subject.
const MISSING_PAGE_MESSAGE: &str = "The page you are looking for does not exist.";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Subject is unknown or has no published content.
    #[error("Subject not found: {0}")]
    SubjectNotFound(Id),

    /// Sub title is not in the subject's outline.
    #[error("Sub title {sub_title_id} not found in subject {subject_id}")]
    SubTitleNotFound {
        /// Requested subject.
        subject_id: Id,
        /// Requested sub title.
        sub_title_id: Id,
    },

    /// Content API error.
    #[error("Content API error: {0}")]
    Api(#[from] ApiError),

    /// Blocking worker task failed.
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::SubjectNotFound(_) | Self::SubTitleNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Api(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the reader.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::SubjectNotFound(_) => MISSING_SUBJECT_MESSAGE.to_owned(),
            Self::SubTitleNotFound { .. } => MISSING_PAGE_MESSAGE.to_owned(),
            Self::Api(e) => e.user_message(),
            Self::Worker(_) => "An unexpected error occurred.".to_owned(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Html(layout::error_page(status, &self.message()))).into_response()
    }
}

/// [`ServerError`] rendered as JSON for API routes.
#[derive(Debug)]
pub(crate) struct JsonError(pub(crate) ServerError);

impl From<ServerError> for JsonError {
    fn from(error: ServerError) -> Self {
        Self(error)
    }
}

impl From<ApiError> for JsonError {
    fn from(error: ApiError) -> Self {
        Self(ServerError::Api(error))
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let body = match &self.0 {
            ServerError::SubjectNotFound(id) => {
                json!({"error": self.0.message(), "subjectId": id})
            }
            ServerError::SubTitleNotFound {
                subject_id,
                sub_title_id,
            } => json!({
                "error": self.0.message(),
                "subjectId": subject_id,
                "subTitleId": sub_title_id,
            }),
            ServerError::Api(_) | ServerError::Worker(_) => json!({"error": self.0.message()}),
        };
        (status, axum::Json(body)).into_response()
    }
}
