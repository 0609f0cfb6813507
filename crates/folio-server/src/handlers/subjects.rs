//! Subject reader pages.
//!
//! Each request loads the subject's navigation tree, applies the requested
//! (or default) sub title selection, and renders that sub title's
//! components next to the outline.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use folio_api::Id;
use folio_navigator::SubjectOutline;
use folio_renderer::Document;

use crate::error::ServerError;
use crate::handlers::SearchQuery;
use crate::layout;
use crate::state::AppState;

/// Handle GET /subjects/{subjectId}.
pub(crate) async fn get_subject(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<Id>,
    Query(search): Query<SearchQuery>,
) -> Result<Html<String>, ServerError> {
    render_subject(&state, subject_id, None, &search.q).await
}

/// Handle GET /subjects/{subjectId}/{subTitleId}.
pub(crate) async fn get_sub_title(
    State(state): State<Arc<AppState>>,
    Path((subject_id, sub_title_id)): Path<(Id, Id)>,
    Query(search): Query<SearchQuery>,
) -> Result<Html<String>, ServerError> {
    render_subject(&state, subject_id, Some(sub_title_id), &search.q).await
}

async fn render_subject(
    state: &AppState,
    subject_id: Id,
    sub_title_id: Option<Id>,
    query: &str,
) -> Result<Html<String>, ServerError> {
    let mut outline = load_outline(state, subject_id, sub_title_id).await?;
    outline.set_filter(query);

    let document = match outline.selected() {
        Some(id) => Some(load_document(state, id).await?),
        None => None,
    };

    Ok(Html(layout::subject_page(&outline, document.as_ref(), query)))
}

/// Load a published subject's outline and select `sub_title_id` if given.
pub(crate) async fn load_outline(
    state: &AppState,
    subject_id: Id,
    sub_title_id: Option<Id>,
) -> Result<SubjectOutline, ServerError> {
    let detail = state
        .fetch(move |api| api.subject_detail(subject_id))
        .await?
        .map_err(|e| {
            if e.is_not_found() {
                ServerError::SubjectNotFound(subject_id)
            } else {
                ServerError::Api(e)
            }
        })?;

    if !detail.subject.publish_status.is_published() {
        tracing::debug!(subject_id, "Subject is not published");
        return Err(ServerError::SubjectNotFound(subject_id));
    }

    let mut outline = SubjectOutline::from_detail(detail)
        .map_err(|_| ServerError::SubjectNotFound(subject_id))?;

    if let Some(sub_title_id) = sub_title_id {
        outline
            .select_sub_title(sub_title_id)
            .map_err(|_| ServerError::SubTitleNotFound {
                subject_id,
                sub_title_id,
            })?;
    }
    Ok(outline)
}

/// Render a sub title's components.
///
/// An API 404 is an empty document; any other failure becomes an inline
/// notice so the page still renders.
async fn load_document(state: &AppState, sub_title_id: Id) -> Result<Document, ServerError> {
    let result = state
        .fetch(move |api| api.page_components(sub_title_id))
        .await?;
    Ok(match result {
        Ok(entries) => Document::from_entries(&entries, &state.images, state.options),
        Err(e) if e.is_not_found() => Document::default(),
        Err(e) => {
            tracing::warn!(error = %e, sub_title_id, "Failed to load page components");
            Document::failed(e.user_message())
        }
    })
}
