//! Content source abstraction.
//!
//! [`ContentApi`] is the seam between the navigator/renderer/server and the
//! remote content service. [`HttpContentApi`](crate::HttpContentApi) talks
//! to the real service; `MockContentApi` (feature `mock`) serves fixtures.

use folio_config::LoginRole;

use crate::error::ApiError;
use crate::forms::{MainTitleForm, PageComponentForm, SubTitleForm, SubjectForm};
use crate::session::Session;
use crate::types::{
    AdminComponents, ComponentEntry, Credentials, Id, MainTitle, SubTitle, Subject, SubjectDetail,
};

/// Operations offered by the content service.
///
/// Read operations are public. Mutations require a session and fail with
/// [`ApiError::Unauthenticated`] without one.
///
/// # Not found
///
/// The service answers `404` when a parent has no children. Callers that
/// list children should treat [`ApiError::is_not_found`] as an empty list.
pub trait ContentApi: Send + Sync {
    /// List all subjects, including unpublished ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure.
    fn list_subjects(&self) -> Result<Vec<Subject>, ApiError>;

    /// List main titles of a subject.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure.
    fn list_main_titles(&self, subject_id: Id) -> Result<Vec<MainTitle>, ApiError>;

    /// List sub titles of a main title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure. A main title
    /// without sub titles yields a `404` response error.
    fn list_sub_titles(&self, main_title_id: Id) -> Result<Vec<SubTitle>, ApiError>;

    /// Subject plus its reader navigation tree.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure.
    fn subject_detail(&self, subject_id: Id) -> Result<SubjectDetail, ApiError>;

    /// Components of a sub title, rows already grouped by the service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure.
    fn page_components(&self, sub_title_id: Id) -> Result<Vec<ComponentEntry>, ApiError>;

    /// Components of a sub title as seen by the admin editor.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or decode failure.
    fn admin_page_components(&self, sub_title_id: Id) -> Result<AdminComponents, ApiError>;

    /// Create a subject.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Form`] for an invalid form and
    /// [`ApiError::Unauthenticated`] without a session.
    fn create_subject(&self, form: &SubjectForm) -> Result<(), ApiError>;

    /// Replace a subject.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn update_subject(&self, id: Id, form: &SubjectForm) -> Result<(), ApiError>;

    /// Delete a subject.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a session.
    fn delete_subject(&self, id: Id) -> Result<(), ApiError>;

    /// Create a main title.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn create_main_title(&self, form: &MainTitleForm) -> Result<(), ApiError>;

    /// Replace a main title.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn update_main_title(&self, id: Id, form: &MainTitleForm) -> Result<(), ApiError>;

    /// Delete a main title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a session.
    fn delete_main_title(&self, id: Id) -> Result<(), ApiError>;

    /// Create a sub title.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn create_sub_title(&self, form: &SubTitleForm) -> Result<(), ApiError>;

    /// Replace a sub title.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn update_sub_title(&self, id: Id, form: &SubTitleForm) -> Result<(), ApiError>;

    /// Delete a sub title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a session.
    fn delete_sub_title(&self, id: Id) -> Result<(), ApiError>;

    /// Create a page component.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn create_component(&self, form: &PageComponentForm) -> Result<(), ApiError>;

    /// Replace a page component.
    ///
    /// `has_stored_image` relaxes the image requirement for image
    /// components that already have one.
    ///
    /// # Errors
    ///
    /// See [`ContentApi::create_subject`].
    fn update_component(
        &self,
        id: Id,
        form: &PageComponentForm,
        has_stored_image: bool,
    ) -> Result<(), ApiError>;

    /// Delete a page component.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without a session.
    fn delete_component(&self, id: Id) -> Result<(), ApiError>;

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Login`] when the service accepts the request but
    /// the account may not use `role`, and [`ApiError::HttpResponse`] when it
    /// rejects the credentials.
    fn login(&self, role: LoginRole, credentials: &Credentials) -> Result<Session, ApiError>;
}
