//! HTTP client for the content API.
//!
//! Sync `ureq` client. Public reads go out without credentials; mutations
//! attach the session's API key in the `x-api-key` header.

mod admin;
mod auth;
mod multipart;
mod taxonomy;

use std::time::Duration;

use folio_config::{ApiConfig, LoginRole};
use serde::Serialize;
use serde::de::DeserializeOwned;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::ApiError;
use crate::forms::{FormPart, MainTitleForm, PageComponentForm, SubTitleForm, SubjectForm};
use crate::session::Session;
use crate::source::ContentApi;
use crate::types::{
    AdminComponents, ComponentEntry, Credentials, Id, MainTitle, SubTitle, Subject, SubjectDetail,
};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Header carrying the session's API key.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Content API client over HTTP.
pub struct HttpContentApi {
    agent: Agent,
    base_url: String,
    session: Option<Session>,
}

impl HttpContentApi {
    /// Create a client for `base_url` with the given request timeout.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            session: None,
        }
    }

    /// Create a client for the configured environment.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let timeout = if config.timeout_secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            config.timeout_secs
        };
        Self::new(config.base_url(), Duration::from_secs(timeout))
    }

    /// Attach (or detach) a session.
    #[must_use]
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn require_session(&self) -> Result<&Session, ApiError> {
        self.session.as_ref().ok_or(ApiError::Unauthenticated)
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        let request = request.header("Accept", "application/json");
        match &self.session {
            Some(session) => request.header(API_KEY_HEADER, &session.api_key),
            None => request,
        }
    }

    /// GET `path` and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.agent.get(self.url(path))).call()?;
        let mut body = check_status(response)?;
        Ok(body.read_json()?)
    }

    /// POST a JSON payload without requiring a session.
    fn post_json_public<P: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<T, ApiError> {
        let bytes = serde_json::to_vec(payload)?;
        let response = self
            .authorize(self.agent.post(self.url(path)))
            .header("Content-Type", "application/json")
            .send(&bytes[..])?;
        let mut body = check_status(response)?;
        Ok(body.read_json()?)
    }

    /// POST or PUT a JSON payload as the logged-in user.
    fn send_json<P: Serialize>(
        &self,
        request: RequestBuilder<WithBody>,
        payload: &P,
    ) -> Result<(), ApiError> {
        self.require_session()?;
        let bytes = serde_json::to_vec(payload)?;
        let response = self
            .authorize(request)
            .header("Content-Type", "application/json")
            .send(&bytes[..])?;
        check_status(response)?;
        Ok(())
    }

    /// POST or PUT a multipart form as the logged-in user.
    fn send_multipart(
        &self,
        request: RequestBuilder<WithBody>,
        parts: &[FormPart<'_>],
    ) -> Result<(), ApiError> {
        self.require_session()?;
        let form = multipart::encode(parts);
        let response = self
            .authorize(request)
            .header("Content-Type", &form.content_type())
            .send(&form.body[..])?;
        check_status(response)?;
        Ok(())
    }

    /// DELETE as the logged-in user.
    fn send_delete(&self, request: RequestBuilder<WithoutBody>) -> Result<(), ApiError> {
        self.require_session()?;
        let response = self.authorize(request).call()?;
        check_status(response)?;
        Ok(())
    }
}

impl ContentApi for HttpContentApi {
    fn list_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.get_subjects()
    }

    fn list_main_titles(&self, subject_id: Id) -> Result<Vec<MainTitle>, ApiError> {
        self.get_main_titles(subject_id)
    }

    fn list_sub_titles(&self, main_title_id: Id) -> Result<Vec<SubTitle>, ApiError> {
        self.get_sub_titles(main_title_id)
    }

    fn subject_detail(&self, subject_id: Id) -> Result<SubjectDetail, ApiError> {
        self.get_subject_detail(subject_id)
    }

    fn page_components(&self, sub_title_id: Id) -> Result<Vec<ComponentEntry>, ApiError> {
        self.get_page_components(sub_title_id)
    }

    fn admin_page_components(&self, sub_title_id: Id) -> Result<AdminComponents, ApiError> {
        self.get_admin_page_components(sub_title_id)
    }

    fn create_subject(&self, form: &SubjectForm) -> Result<(), ApiError> {
        self.post_subject(form)
    }

    fn update_subject(&self, id: Id, form: &SubjectForm) -> Result<(), ApiError> {
        self.put_subject(id, form)
    }

    fn delete_subject(&self, id: Id) -> Result<(), ApiError> {
        self.remove_subject(id)
    }

    fn create_main_title(&self, form: &MainTitleForm) -> Result<(), ApiError> {
        self.post_main_title(form)
    }

    fn update_main_title(&self, id: Id, form: &MainTitleForm) -> Result<(), ApiError> {
        self.put_main_title(id, form)
    }

    fn delete_main_title(&self, id: Id) -> Result<(), ApiError> {
        self.remove_main_title(id)
    }

    fn create_sub_title(&self, form: &SubTitleForm) -> Result<(), ApiError> {
        self.post_sub_title(form)
    }

    fn update_sub_title(&self, id: Id, form: &SubTitleForm) -> Result<(), ApiError> {
        self.put_sub_title(id, form)
    }

    fn delete_sub_title(&self, id: Id) -> Result<(), ApiError> {
        self.remove_sub_title(id)
    }

    fn create_component(&self, form: &PageComponentForm) -> Result<(), ApiError> {
        self.post_component(form)
    }

    fn update_component(
        &self,
        id: Id,
        form: &PageComponentForm,
        has_stored_image: bool,
    ) -> Result<(), ApiError> {
        self.put_component(id, form, has_stored_image)
    }

    fn delete_component(&self, id: Id) -> Result<(), ApiError> {
        self.remove_component(id)
    }

    fn login(&self, role: LoginRole, credentials: &Credentials) -> Result<Session, ApiError> {
        self.post_login(role, credentials)
    }
}

/// Turn an error status into [`ApiError::HttpResponse`].
fn check_status(response: ureq::http::Response<Body>) -> Result<Body, ApiError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ApiError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use folio_config::{Environment, LoginRole};

    use super::*;
    use crate::forms::SubjectForm;
    use crate::source::ContentApi;
    use crate::types::User;

    fn config(environment: Environment) -> ApiConfig {
        ApiConfig {
            environment,
            local_url: "http://localhost:3000/api/".to_owned(),
            production_url: "https://kb.example.com/api".to_owned(),
            timeout_secs: 5,
            login_role: LoginRole::Admin,
        }
    }

    #[test]
    fn test_from_config_uses_environment_url() {
        let local = HttpContentApi::from_config(&config(Environment::Local));
        assert_eq!(local.base_url(), "http://localhost:3000/api");

        let production = HttpContentApi::from_config(&config(Environment::Production));
        assert_eq!(production.base_url(), "https://kb.example.com/api");
    }

    #[test]
    fn test_url_joins_path() {
        let client = HttpContentApi::new("http://localhost:3000/api", Duration::from_secs(1));
        assert_eq!(client.url("/subjects"), "http://localhost:3000/api/subjects");
    }

    #[test]
    fn test_with_session() {
        let session = Session::new(User::default(), "k");
        let client = HttpContentApi::new("http://localhost:3000/api", Duration::from_secs(1))
            .with_session(Some(session.clone()));
        assert_eq!(client.session(), Some(&session));
    }

    #[test]
    fn test_mutation_without_session_is_rejected_before_sending() {
        // Port 9 (discard) is never contacted: the session check fails first.
        let client = HttpContentApi::new("http://127.0.0.1:9/api", Duration::from_secs(1));
        let form = SubjectForm {
            name: "Rust".to_owned(),
            description: "Systems".to_owned(),
            order: 1,
            image: None,
        };

        let err = client.create_subject(&form).unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated));
        assert!(matches!(
            client.delete_subject(1).unwrap_err(),
            ApiError::Unauthenticated
        ));
    }

    #[test]
    fn test_invalid_form_is_rejected_before_session_check() {
        let client = HttpContentApi::new("http://127.0.0.1:9/api", Duration::from_secs(1));
        let form = SubjectForm::default();

        let err = client.create_subject(&form).unwrap_err();

        assert!(matches!(err, ApiError::Form(_)));
    }
}
