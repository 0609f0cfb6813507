//! Reader bootstrap payload: subject plus its navigation tree.

use serde::{Deserialize, Serialize};

use super::component::ComponentEntry;
use super::lenient;
use super::taxonomy::{Id, SubTitle, Subject};

/// Response of `GET /subject-details/{subjectId}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubjectDetail {
    /// The subject itself.
    pub subject: Subject,
    /// Main titles with their sub titles, in display order.
    #[serde(default)]
    pub nav: Vec<NavMainTitle>,
}

/// Main title entry of a subject's navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavMainTitle {
    /// Main title ID.
    pub main_subject_id: Id,
    /// Display title.
    #[serde(default)]
    pub main_subject_title: String,
    /// Sub titles under this main title.
    #[serde(rename = "subTitle", default)]
    pub sub_titles: Vec<NavSubTitle>,
}

/// Sub title entry of a subject's navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavSubTitle {
    /// Sub title ID.
    pub sub_subject_id: Id,
    /// Display title.
    #[serde(default)]
    pub sub_subject_title: String,
}

/// Response of the admin components endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminComponents {
    /// The sub title being edited.
    pub sub_subject: Option<SubTitle>,
    /// Components in server order.
    #[serde(default, deserialize_with = "lenient::elements")]
    pub page_components: Vec<ComponentEntry>,
}
