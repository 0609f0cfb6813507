//! HTTP request handlers.

pub(crate) mod catalogue;
pub(crate) mod navigation;
pub(crate) mod subjects;

use serde::Deserialize;

/// `?q=` search parameter shared by the catalogue and subject pages.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub(crate) q: String,
}

/// URL of a subject page.
pub(crate) fn subject_path(subject_id: folio_api::Id) -> String {
    format!("/subjects/{subject_id}")
}

/// URL of a sub title within its subject.
pub(crate) fn sub_title_path(subject_id: folio_api::Id, sub_title_id: folio_api::Id) -> String {
    format!("/subjects/{subject_id}/{sub_title_id}")
}

/// Handle GET /health.
pub(crate) async fn health() -> &'static str {
    "ok"
}
