//! In-memory content API for testing.
//!
//! Provides [`MockContentApi`] for unit testing without a running service.

use std::collections::HashMap;
use std::sync::RwLock;

use folio_config::LoginRole;

use crate::error::ApiError;
use crate::forms::{MainTitleForm, PageComponentForm, SubTitleForm, SubjectForm};
use crate::session::Session;
use crate::source::ContentApi;
use crate::types::{
    AdminComponents, ComponentEntry, Credentials, Id, MainTitle, NavMainTitle, NavSubTitle,
    PageComponent, PublishStatus, RowEnvelope, RowStatus, SubTitle, Subject, SubjectDetail, User,
};

fn not_found(what: &str) -> ApiError {
    ApiError::HttpResponse {
        status: 404,
        body: format!(r#"{{"message": "{what} not found"}}"#),
    }
}

struct Account {
    password: String,
    user: User,
}

/// Mock content API for testing.
///
/// Holds subjects, titles, and components in memory. Mutations change the
/// stored data and are recorded in a log, so tests can assert both the
/// resulting state and the calls made.
///
/// # Example
///
/// ```ignore
/// use folio_api::{ContentApi, MockContentApi};
///
/// let api = MockContentApi::new()
///     .with_subject(1, "Rust")
///     .with_main_title(10, 1, "Basics")
///     .with_sub_title(100, 10, "Install");
///
/// let titles = api.list_sub_titles(10).unwrap();
/// ```
#[derive(Default)]
pub struct MockContentApi {
    subjects: RwLock<Vec<Subject>>,
    main_titles: RwLock<Vec<MainTitle>>,
    sub_titles: RwLock<Vec<SubTitle>>,
    components: RwLock<HashMap<Id, Vec<ComponentEntry>>>,
    accounts: RwLock<HashMap<String, Account>>,
    failures: RwLock<HashMap<String, u16>>,
    session: RwLock<Option<Session>>,
    log: RwLock<Vec<String>>,
}

impl MockContentApi {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published subject.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_subject(self, id: Id, name: impl Into<String>) -> Self {
        let order = u32::try_from(self.subjects.read().unwrap().len() + 1).unwrap_or(u32::MAX);
        self.subjects.write().unwrap().push(Subject {
            id,
            name: name.into(),
            description: String::new(),
            image: None,
            order,
            publish_status: PublishStatus::Publish,
        });
        self
    }

    /// Add a subject record as is.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_subject_record(self, subject: Subject) -> Self {
        self.subjects.write().unwrap().push(subject);
        self
    }

    /// Add a published main title under `subject_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_main_title(self, id: Id, subject_id: Id, title: impl Into<String>) -> Self {
        let order = u32::try_from(
            self.main_titles
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.subject_id == subject_id)
                .count()
                + 1,
        )
        .unwrap_or(u32::MAX);
        let title = title.into();
        self.main_titles.write().unwrap().push(MainTitle {
            id,
            subject_id,
            short_title: title.clone(),
            title,
            order,
            publish_status: PublishStatus::Publish,
        });
        self
    }

    /// Add a published sub title under `main_title_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_sub_title(self, id: Id, main_title_id: Id, title: impl Into<String>) -> Self {
        let order = u32::try_from(
            self.sub_titles
                .read()
                .unwrap()
                .iter()
                .filter(|t| t.main_title_id == main_title_id)
                .count()
                + 1,
        )
        .unwrap_or(u32::MAX);
        let title = title.into();
        self.sub_titles.write().unwrap().push(SubTitle {
            id,
            main_title_id,
            short_title: title.clone(),
            title,
            order,
            publish_status: PublishStatus::Publish,
        });
        self
    }

    /// Set the component entries of a sub title, in server order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_components(self, sub_title_id: Id, entries: Vec<ComponentEntry>) -> Self {
        self.components
            .write()
            .unwrap()
            .insert(sub_title_id, entries);
        self
    }

    /// Register an account accepted by [`ContentApi::login`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_account(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        let username = username.into();
        self.accounts.write().unwrap().insert(
            username.clone(),
            Account {
                password: password.into(),
                user: User {
                    username: Some(username),
                    user_type: Some(user_type.into()),
                    staff: None,
                },
            },
        );
        self
    }

    /// Attach a session so mutations are accepted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.write().unwrap() = Some(session);
        self
    }

    /// Make `operation` (a [`ContentApi`] method name) fail with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self, operation: &str, status: u16) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(operation.to_owned(), status);
        self
    }

    /// Mutations performed so far, e.g. `create_subject Rust`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn mutations(&self) -> Vec<String> {
        self.log.read().unwrap().clone()
    }

    fn check_failure(&self, operation: &str) -> Result<(), ApiError> {
        match self.failures.read().unwrap().get(operation) {
            Some(&status) => Err(ApiError::HttpResponse {
                status,
                body: format!(r#"{{"message": "{operation} failed"}}"#),
            }),
            None => Ok(()),
        }
    }

    fn authorize(&self, operation: &str) -> Result<(), ApiError> {
        self.check_failure(operation)?;
        if self.session.read().unwrap().is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(())
    }

    fn record(&self, entry: String) {
        self.log.write().unwrap().push(entry);
    }

    fn next_component_id(&self) -> Id {
        self.components
            .read()
            .unwrap()
            .values()
            .flat_map(|entries| entries.iter().flat_map(cells))
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn stored_component(&self, id: Id) -> Option<PageComponent> {
        self.components
            .read()
            .unwrap()
            .values()
            .flat_map(|entries| entries.iter().flat_map(cells))
            .find(|c| c.id == id)
            .cloned()
    }

    fn insert_component(&self, component: PageComponent) {
        let mut components = self.components.write().unwrap();
        let entries = components.entry(component.sub_title_id).or_default();
        if component.row_status == RowStatus::Row {
            if let Some(ComponentEntry::Row(row)) = entries.last_mut() {
                row.col.push(component);
                return;
            }
            entries.push(ComponentEntry::Row(RowEnvelope {
                row_status: RowStatus::Row,
                col: vec![component],
            }));
        } else {
            entries.push(ComponentEntry::Single(component));
        }
    }

    fn remove_component(&self, id: Id) -> bool {
        let mut components = self.components.write().unwrap();
        let mut removed = false;
        for entries in components.values_mut() {
            entries.retain_mut(|entry| match entry {
                ComponentEntry::Single(c) => {
                    let keep = c.id != id;
                    removed |= !keep;
                    keep
                }
                ComponentEntry::Row(row) => {
                    let before = row.col.len();
                    row.col.retain(|c| c.id != id);
                    removed |= row.col.len() != before;
                    !row.col.is_empty()
                }
            });
        }
        removed
    }
}

fn cells(entry: &ComponentEntry) -> Vec<&PageComponent> {
    match entry {
        ComponentEntry::Single(c) => vec![c],
        ComponentEntry::Row(row) => row.col.iter().collect(),
    }
}

fn component_from_form(id: Id, form: &PageComponentForm, image: Option<String>) -> PageComponent {
    PageComponent {
        id,
        sub_title_id: form.sub_title_id,
        component_type: Some(form.component_type.clone()),
        description: if image.is_some() {
            None
        } else {
            Some(form.description.clone())
        },
        order: form.order,
        row_status: form.row_status,
        special_class: Some(form.special_class.clone()).filter(|c| !c.is_empty()),
        image,
        language: form.language.clone().filter(|l| !l.is_empty()),
    }
}

fn next_id<T>(records: &[T], id: impl Fn(&T) -> Id) -> Id {
    records.iter().map(id).max().unwrap_or(0) + 1
}

impl ContentApi for MockContentApi {
    fn list_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.check_failure("list_subjects")?;
        Ok(self.subjects.read().unwrap().clone())
    }

    fn list_main_titles(&self, subject_id: Id) -> Result<Vec<MainTitle>, ApiError> {
        self.check_failure("list_main_titles")?;
        Ok(self
            .main_titles
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.subject_id == subject_id)
            .cloned()
            .collect())
    }

    fn list_sub_titles(&self, main_title_id: Id) -> Result<Vec<SubTitle>, ApiError> {
        self.check_failure("list_sub_titles")?;
        let titles: Vec<SubTitle> = self
            .sub_titles
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.main_title_id == main_title_id)
            .cloned()
            .collect();
        if titles.is_empty() {
            return Err(not_found("sub titles"));
        }
        Ok(titles)
    }

    fn subject_detail(&self, subject_id: Id) -> Result<SubjectDetail, ApiError> {
        self.check_failure("subject_detail")?;
        let subject = self
            .subjects
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == subject_id)
            .cloned()
            .ok_or_else(|| not_found("subject"))?;

        let mut mains: Vec<MainTitle> = self
            .main_titles
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.subject_id == subject_id && t.publish_status.is_published())
            .cloned()
            .collect();
        mains.sort_by_key(|t| t.order);

        let sub_titles = self.sub_titles.read().unwrap();
        let nav = mains
            .into_iter()
            .map(|main| {
                let mut subs: Vec<&SubTitle> = sub_titles
                    .iter()
                    .filter(|s| s.main_title_id == main.id && s.publish_status.is_published())
                    .collect();
                subs.sort_by_key(|s| s.order);
                NavMainTitle {
                    main_subject_id: main.id,
                    main_subject_title: main.title,
                    sub_titles: subs
                        .into_iter()
                        .map(|s| NavSubTitle {
                            sub_subject_id: s.id,
                            sub_subject_title: s.title.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(SubjectDetail { subject, nav })
    }

    fn page_components(&self, sub_title_id: Id) -> Result<Vec<ComponentEntry>, ApiError> {
        self.check_failure("page_components")?;
        if let Some(entries) = self.components.read().unwrap().get(&sub_title_id) {
            return Ok(entries.clone());
        }
        if self
            .sub_titles
            .read()
            .unwrap()
            .iter()
            .any(|s| s.id == sub_title_id)
        {
            return Ok(Vec::new());
        }
        Err(not_found("sub title"))
    }

    fn admin_page_components(&self, sub_title_id: Id) -> Result<AdminComponents, ApiError> {
        self.check_failure("admin_page_components")?;
        let sub_subject = self
            .sub_titles
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == sub_title_id)
            .cloned();
        let page_components = self
            .components
            .read()
            .unwrap()
            .get(&sub_title_id)
            .cloned()
            .unwrap_or_default();
        Ok(AdminComponents {
            sub_subject,
            page_components,
        })
    }

    fn create_subject(&self, form: &SubjectForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("create_subject")?;
        let mut subjects = self.subjects.write().unwrap();
        let id = next_id(&subjects, |s| s.id);
        subjects.push(Subject {
            id,
            name: form.name.clone(),
            description: form.description.clone(),
            image: form.image.as_ref().map(|i| format!("uploads/{}", i.filename)),
            order: form.order,
            publish_status: PublishStatus::Onhold,
        });
        drop(subjects);
        self.record(format!("create_subject {}", form.name));
        Ok(())
    }

    fn update_subject(&self, id: Id, form: &SubjectForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("update_subject")?;
        let mut subjects = self.subjects.write().unwrap();
        let subject = subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("subject"))?;
        subject.name.clone_from(&form.name);
        subject.description.clone_from(&form.description);
        subject.order = form.order;
        if let Some(image) = &form.image {
            subject.image = Some(format!("uploads/{}", image.filename));
        }
        drop(subjects);
        self.record(format!("update_subject {id}"));
        Ok(())
    }

    fn delete_subject(&self, id: Id) -> Result<(), ApiError> {
        self.authorize("delete_subject")?;
        let mut subjects = self.subjects.write().unwrap();
        let before = subjects.len();
        subjects.retain(|s| s.id != id);
        if subjects.len() == before {
            return Err(not_found("subject"));
        }
        drop(subjects);

        let removed_mains: Vec<Id> = self
            .main_titles
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.subject_id == id)
            .map(|t| t.id)
            .collect();
        self.main_titles
            .write()
            .unwrap()
            .retain(|t| t.subject_id != id);
        for main in removed_mains {
            self.cascade_main_title(main);
        }
        self.record(format!("delete_subject {id}"));
        Ok(())
    }

    fn create_main_title(&self, form: &MainTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("create_main_title")?;
        let mut titles = self.main_titles.write().unwrap();
        let id = next_id(&titles, |t| t.id);
        titles.push(MainTitle {
            id,
            subject_id: form.subject_id,
            title: form.title.clone(),
            short_title: form.short_title.clone(),
            order: form.order,
            publish_status: form.publish_status,
        });
        drop(titles);
        self.record(format!("create_main_title {}", form.title));
        Ok(())
    }

    fn update_main_title(&self, id: Id, form: &MainTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("update_main_title")?;
        let mut titles = self.main_titles.write().unwrap();
        let title = titles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("main title"))?;
        title.subject_id = form.subject_id;
        title.title.clone_from(&form.title);
        title.short_title.clone_from(&form.short_title);
        title.order = form.order;
        title.publish_status = form.publish_status;
        drop(titles);
        self.record(format!("update_main_title {id}"));
        Ok(())
    }

    fn delete_main_title(&self, id: Id) -> Result<(), ApiError> {
        self.authorize("delete_main_title")?;
        let mut titles = self.main_titles.write().unwrap();
        let before = titles.len();
        titles.retain(|t| t.id != id);
        if titles.len() == before {
            return Err(not_found("main title"));
        }
        drop(titles);
        self.cascade_main_title(id);
        self.record(format!("delete_main_title {id}"));
        Ok(())
    }

    fn create_sub_title(&self, form: &SubTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("create_sub_title")?;
        let mut titles = self.sub_titles.write().unwrap();
        let id = next_id(&titles, |t| t.id);
        titles.push(SubTitle {
            id,
            main_title_id: form.main_title_id,
            title: form.title.clone(),
            short_title: form.short_title.clone(),
            order: form.order,
            publish_status: form.publish_status,
        });
        drop(titles);
        self.record(format!("create_sub_title {}", form.title));
        Ok(())
    }

    fn update_sub_title(&self, id: Id, form: &SubTitleForm) -> Result<(), ApiError> {
        form.validate()?;
        self.authorize("update_sub_title")?;
        let mut titles = self.sub_titles.write().unwrap();
        let title = titles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("sub title"))?;
        title.main_title_id = form.main_title_id;
        title.title.clone_from(&form.title);
        title.short_title.clone_from(&form.short_title);
        title.order = form.order;
        title.publish_status = form.publish_status;
        drop(titles);
        self.record(format!("update_sub_title {id}"));
        Ok(())
    }

    fn delete_sub_title(&self, id: Id) -> Result<(), ApiError> {
        self.authorize("delete_sub_title")?;
        let mut titles = self.sub_titles.write().unwrap();
        let before = titles.len();
        titles.retain(|t| t.id != id);
        if titles.len() == before {
            return Err(not_found("sub title"));
        }
        drop(titles);
        self.components.write().unwrap().remove(&id);
        self.record(format!("delete_sub_title {id}"));
        Ok(())
    }

    fn create_component(&self, form: &PageComponentForm) -> Result<(), ApiError> {
        form.validate(false)?;
        self.authorize("create_component")?;
        let id = self.next_component_id();
        let image = form.image.as_ref().map(|i| format!("uploads/{}", i.filename));
        self.insert_component(component_from_form(id, form, image));
        self.record(format!("create_component {}", form.component_type));
        Ok(())
    }

    fn update_component(
        &self,
        id: Id,
        form: &PageComponentForm,
        has_stored_image: bool,
    ) -> Result<(), ApiError> {
        form.validate(has_stored_image)?;
        self.authorize("update_component")?;
        let stored = self
            .stored_component(id)
            .ok_or_else(|| not_found("component"))?;
        let image = match &form.image {
            Some(upload) => Some(format!("uploads/{}", upload.filename)),
            None if form.description.trim().is_empty() => stored.image,
            None => None,
        };
        self.remove_component(id);
        self.insert_component(component_from_form(id, form, image));
        self.record(format!("update_component {id}"));
        Ok(())
    }

    fn delete_component(&self, id: Id) -> Result<(), ApiError> {
        self.authorize("delete_component")?;
        if !self.remove_component(id) {
            return Err(not_found("component"));
        }
        self.record(format!("delete_component {id}"));
        Ok(())
    }

    fn login(&self, role: LoginRole, credentials: &Credentials) -> Result<Session, ApiError> {
        self.check_failure("login")?;
        let accounts = self.accounts.read().unwrap();
        let account = accounts
            .get(&credentials.username)
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| ApiError::HttpResponse {
                status: 401,
                body: r#"{"message": "Invalid credentials"}"#.to_owned(),
            })?;
        if role == LoginRole::Admin && account.user.user_type.as_deref() != Some("admin") {
            return Err(ApiError::Login("unexpected user type".to_owned()));
        }
        let session = Session::new(
            account.user.clone(),
            format!("mock-key-{}", credentials.username),
        );
        drop(accounts);
        *self.session.write().unwrap() = Some(session.clone());
        Ok(session)
    }
}

impl MockContentApi {
    fn cascade_main_title(&self, main_title_id: Id) {
        let removed: Vec<Id> = self
            .sub_titles
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.main_title_id == main_title_id)
            .map(|s| s.id)
            .collect();
        self.sub_titles
            .write()
            .unwrap()
            .retain(|s| s.main_title_id != main_title_id);
        let mut components = self.components.write().unwrap();
        for id in removed {
            components.remove(&id);
        }
    }
}
