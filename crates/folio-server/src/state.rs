//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use folio_api::{ApiError, ContentApi, ImageUrlResolver};
use folio_renderer::RenderOptions;

use crate::error::ServerError;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Content source.
    pub(crate) api: Arc<dyn ContentApi>,
    /// Resolves image references against the API base URL.
    pub(crate) images: ImageUrlResolver,
    /// Component rendering options.
    pub(crate) options: RenderOptions,
}

impl AppState {
    /// Run a blocking API call off the async runtime.
    ///
    /// The outer error is a failed worker task; the inner result is the
    /// API's own.
    pub(crate) async fn fetch<T, F>(&self, call: F) -> Result<Result<T, ApiError>, ServerError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ContentApi) -> Result<T, ApiError> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        Ok(tokio::task::spawn_blocking(move || call(api.as_ref())).await?)
    }
}
