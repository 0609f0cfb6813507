//! CLI error types.

use folio_api::ApiError;
use folio_config::ConfigError;
use folio_navigator::{ExploreError, OutlineError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Explore(#[from] ExploreError),

    #[error("{0}")]
    Outline(#[from] OutlineError),

    #[error("{0}")]
    Server(String),
}

impl CliError {
    /// Follow-up advice printed under the error.
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Api(e) if e.is_unauthorized() => {
                Some("Run `folio login` to authenticate, then retry.")
            }
            Self::Explore(ExploreError::NotFound { .. }) => {
                Some("Use `folio subjects` and `folio main-titles` to list valid IDs.")
            }
            _ => None,
        }
    }
}
