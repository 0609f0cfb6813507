//! Subject catalogue page.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use folio_api::Subject;
use folio_navigator::filter_by_title;

use crate::error::ServerError;
use crate::handlers::SearchQuery;
use crate::layout;
use crate::state::AppState;

/// Handle GET /.
///
/// API failures render the catalogue with an inline notice; a 404 from the
/// API means there are no subjects yet.
pub(crate) async fn get_catalogue(
    State(state): State<Arc<AppState>>,
    Query(search): Query<SearchQuery>,
) -> Result<Html<String>, ServerError> {
    let result = state.fetch(|api| api.list_subjects()).await?;

    let html = match result {
        Ok(subjects) => {
            let published = published(subjects);
            let visible = filter_by_title(&published, &search.q);
            layout::catalogue_page(&visible, &search.q, &state.images, None)
        }
        Err(e) if e.is_not_found() => layout::catalogue_page(&[], &search.q, &state.images, None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load subjects");
            layout::catalogue_page(&[], &search.q, &state.images, Some(&e.user_message()))
        }
    };
    Ok(Html(html))
}

/// Published subjects in server order.
fn published(subjects: Vec<Subject>) -> Vec<Subject> {
    subjects
        .into_iter()
        .filter(|s| s.publish_status.is_published())
        .collect()
}

#[cfg(test)]
mod tests {
    use folio_api::PublishStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_published_keeps_order() {
        let subject = |id: u64, status: PublishStatus| Subject {
            id,
            name: format!("s{id}"),
            description: String::new(),
            image: None,
            order: 1,
            publish_status: status,
        };
        let subjects = vec![
            subject(3, PublishStatus::Publish),
            subject(1, PublishStatus::Onhold),
            subject(2, PublishStatus::Publish),
        ];

        let ids: Vec<u64> = published(subjects).iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![3, 2]);
    }
}
