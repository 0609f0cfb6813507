//! Authenticated create/update/delete operations.

use tracing::info;

use super::HttpContentApi;
use crate::error::ApiError;
use crate::forms::{MainTitleForm, PageComponentForm, SubTitleForm, SubjectForm};
use crate::types::Id;

impl HttpContentApi {
    pub(crate) fn post_subject(&self, form: &SubjectForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Creating subject '{}'", form.name);
        self.send_multipart(self.agent.post(self.url("/subject")), &form.parts())
    }

    pub(crate) fn put_subject(&self, id: Id, form: &SubjectForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Updating subject {}", id);
        self.send_multipart(
            self.agent.put(self.url(&format!("/subject/{id}"))),
            &form.parts(),
        )
    }

    pub(crate) fn remove_subject(&self, id: Id) -> Result<(), ApiError> {
        info!("Deleting subject {}", id);
        self.send_delete(self.agent.delete(self.url(&format!("/subject/{id}"))))
    }

    pub(crate) fn post_main_title(&self, form: &MainTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Creating main title '{}'", form.title);
        self.send_json(self.agent.post(self.url("/main-subject-title")), form)
    }

    pub(crate) fn put_main_title(&self, id: Id, form: &MainTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Updating main title {}", id);
        self.send_json(
            self.agent.put(self.url(&format!("/main-subject-title/{id}"))),
            form,
        )
    }

    pub(crate) fn remove_main_title(&self, id: Id) -> Result<(), ApiError> {
        info!("Deleting main title {}", id);
        self.send_delete(
            self.agent
                .delete(self.url(&format!("/main-subject-title/{id}"))),
        )
    }

    pub(crate) fn post_sub_title(&self, form: &SubTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Creating sub title '{}'", form.title);
        self.send_json(self.agent.post(self.url("/sub-subject-title")), form)
    }

    pub(crate) fn put_sub_title(&self, id: Id, form: &SubTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        info!("Updating sub title {}", id);
        self.send_json(
            self.agent.put(self.url(&format!("/sub-subject-title/{id}"))),
            form,
        )
    }

    pub(crate) fn remove_sub_title(&self, id: Id) -> Result<(), ApiError> {
        info!("Deleting sub title {}", id);
        self.send_delete(
            self.agent
                .delete(self.url(&format!("/sub-subject-title/{id}"))),
        )
    }

    pub(crate) fn post_component(&self, form: &PageComponentForm) -> Result<(), ApiError> {
        form.validate(false)?;
        info!(
            "Creating '{}' component for sub title {}",
            form.component_type, form.sub_title_id
        );
        self.send_multipart(self.agent.post(self.url("/page-component")), &form.parts())
    }

    pub(crate) fn put_component(
        &self,
        id: Id,
        form: &PageComponentForm,
        has_stored_image: bool,
    ) -> Result<(), ApiError> {
        form.validate(has_stored_image)?;
        info!("Updating component {}", id);
        self.send_multipart(
            self.agent.put(self.url(&format!("/page-component/{id}"))),
            &form.parts(),
        )
    }

    pub(crate) fn remove_component(&self, id: Id) -> Result<(), ApiError> {
        info!("Deleting component {}", id);
        self.send_delete(self.agent.delete(self.url(&format!("/page-component/{id}"))))
    }
}
