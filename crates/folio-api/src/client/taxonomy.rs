//! Public read operations.

use tracing::{debug, info};

use super::HttpContentApi;
use crate::error::ApiError;
use crate::types::{
    AdminComponents, ComponentEntry, ComponentsResponse, Id, MainTitle, SubTitle, Subject,
    SubjectDetail,
};

impl HttpContentApi {
    pub(crate) fn get_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        let subjects: Vec<Subject> = self.get_json("/subjects")?;
        info!("Found {} subjects", subjects.len());
        Ok(subjects)
    }

    pub(crate) fn get_main_titles(&self, subject_id: Id) -> Result<Vec<MainTitle>, ApiError> {
        debug!("Getting main titles for subject {}", subject_id);
        self.get_json(&format!("/main-subject-titles/subject/{subject_id}"))
    }

    pub(crate) fn get_sub_titles(&self, main_title_id: Id) -> Result<Vec<SubTitle>, ApiError> {
        debug!("Getting sub titles for main title {}", main_title_id);
        self.get_json(&format!("/sub-subject-titles/main-title/{main_title_id}"))
    }

    pub(crate) fn get_subject_detail(&self, subject_id: Id) -> Result<SubjectDetail, ApiError> {
        debug!("Getting subject detail {}", subject_id);
        self.get_json(&format!("/subject-details/{subject_id}"))
    }

    pub(crate) fn get_page_components(
        &self,
        sub_title_id: Id,
    ) -> Result<Vec<ComponentEntry>, ApiError> {
        let response: ComponentsResponse =
            self.get_json(&format!("/blog/{sub_title_id}/page-components"))?;
        debug!(
            "Found {} component entries for sub title {}",
            response.page_components.len(),
            sub_title_id
        );
        Ok(response.page_components)
    }

    pub(crate) fn get_admin_page_components(
        &self,
        sub_title_id: Id,
    ) -> Result<AdminComponents, ApiError> {
        self.get_json(&format!("/sub-subject/{sub_title_id}/page-components"))
    }
}
