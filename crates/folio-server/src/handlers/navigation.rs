//! Navigation API endpoint.
//!
//! Returns a subject's outline with the breadcrumbs and previous/next links
//! of the selected sub title.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use folio_api::Id;
use folio_navigator::{Breadcrumbs, Neighbors, SubjectOutline};
use serde::{Deserialize, Serialize};

use crate::error::JsonError;
use crate::handlers::subjects::load_outline;
use crate::state::AppState;

/// Query for GET /api/subjects/{subjectId}/nav.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NavQuery {
    /// Sub title to select instead of the default.
    sub_title: Option<Id>,
}

/// Response for GET /api/subjects/{subjectId}/nav.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Outline with its selection.
    outline: SubjectOutline,
    /// Breadcrumbs of the selection.
    breadcrumbs: Option<Breadcrumbs>,
    /// Neighbouring sub titles of the selection.
    neighbors: Neighbors,
}

impl From<SubjectOutline> for NavigationResponse {
    fn from(outline: SubjectOutline) -> Self {
        Self {
            breadcrumbs: outline.breadcrumbs(),
            neighbors: outline.neighbors(),
            outline,
        }
    }
}

/// Handle GET /api/subjects/{subjectId}/nav.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<Id>,
    Query(query): Query<NavQuery>,
) -> Result<Json<NavigationResponse>, JsonError> {
    let outline = load_outline(&state, subject_id, query.sub_title).await?;
    Ok(Json(NavigationResponse::from(outline)))
}

#[cfg(test)]
mod tests {
    use folio_api::{NavMainTitle, NavSubTitle, PublishStatus, Subject, SubjectDetail};

    use super::*;

    #[test]
    fn test_navigation_response_serialization() {
        let outline = SubjectOutline::from_detail(SubjectDetail {
            subject: Subject {
                id: 1,
                name: "Rust".to_owned(),
                description: String::new(),
                image: None,
                order: 1,
                publish_status: PublishStatus::Publish,
            },
            nav: vec![NavMainTitle {
                main_subject_id: 10,
                main_subject_title: "Basics".to_owned(),
                sub_titles: vec![NavSubTitle {
                    sub_subject_id: 100,
                    sub_subject_title: "Install".to_owned(),
                }],
            }],
        })
        .unwrap();

        let json = serde_json::to_value(NavigationResponse::from(outline)).unwrap();

        assert_eq!(json["outline"]["selected"], 100);
        assert_eq!(json["breadcrumbs"]["main_title"], "Basics");
        assert!(json["neighbors"]["next"].is_null());
    }
}
