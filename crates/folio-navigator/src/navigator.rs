//! Three-level taxonomy navigator.
//!
//! [`TaxonomyNavigator`] holds the subject, main title and sub title lists,
//! the current [`Selection`], and per-level request tokens. It performs no
//! I/O: each `select_*` call returns a [`FetchTicket`] describing the fetch
//! to run, and the caller hands the result back through the matching
//! `apply_*` method. Results for superseded tickets are ignored.
//!
//! Selecting or clearing a level resets every level below it immediately,
//! before any new fetch completes.

use folio_api::{ApiError, Id, MainTitle, SubTitle, Subject};
use tracing::{debug, warn};

use crate::filter::filter_by_title;
use crate::selection::Selection;
use crate::token::{FetchTicket, Level, RequestTokens};

/// Invalid selection request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigatorError {
    /// A main title was selected with no subject selected.
    #[error("no subject selected")]
    NoSubject,
    /// A sub title was selected with no main title selected.
    #[error("no main title selected")]
    NoMainTitle,
    /// The main title belongs to another subject.
    #[error("main title {main_title_id} does not belong to subject {subject_id}")]
    ForeignMainTitle {
        /// Rejected main title.
        main_title_id: Id,
        /// Selected subject.
        subject_id: Id,
    },
    /// The sub title belongs to another main title.
    #[error("sub title {sub_title_id} does not belong to main title {main_title_id}")]
    ForeignSubTitle {
        /// Rejected sub title.
        sub_title_id: Id,
        /// Selected main title.
        main_title_id: Id,
    },
}

/// Outcome of handing a fetch result back to the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The result updated the navigator.
    Updated,
    /// The ticket was superseded; the result was dropped.
    Stale,
}

/// Search box contents per level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Filters {
    subjects: String,
    main_titles: String,
    sub_titles: String,
}

/// Navigation state for subject → main title → sub title browsing.
#[derive(Debug, Default)]
pub struct TaxonomyNavigator {
    subjects: Vec<Subject>,
    main_titles: Vec<MainTitle>,
    sub_titles: Vec<SubTitle>,
    selection: Selection,
    tokens: RequestTokens,
    filters: Filters,
    error: Option<String>,
}

impl TaxonomyNavigator {
    /// Empty navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// All loaded subjects.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Main titles of the selected subject.
    #[must_use]
    pub fn main_titles(&self) -> &[MainTitle] {
        &self.main_titles
    }

    /// Sub titles of the selected main title.
    #[must_use]
    pub fn sub_titles(&self) -> &[SubTitle] {
        &self.sub_titles
    }

    /// Last fetch error, shown until dismissed or the next successful fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismiss the error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Whether `ticket` is still the latest for its level.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.tokens.is_current(ticket)
    }

    /// Start (re)loading the subject list.
    pub fn load_subjects(&mut self) -> FetchTicket {
        self.tokens.issue(Level::Subjects, 0)
    }

    /// Select `subject`, resetting both lower levels, and request its main titles.
    pub fn select_subject(&mut self, subject: Subject) -> FetchTicket {
        debug!(subject_id = subject.id, "Selecting subject");
        self.reset_below(Level::Subjects);
        let ticket = self.tokens.issue(Level::MainTitles, subject.id);
        self.selection = Selection::Subject(subject);
        ticket
    }

    /// Select a main title of the selected subject and request its sub titles.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError`] if no subject is selected or the main title
    /// belongs to another subject. The selection is unchanged in that case.
    pub fn select_main_title(&mut self, main_title: MainTitle) -> Result<FetchTicket, NavigatorError> {
        let subject = self
            .selection
            .subject()
            .cloned()
            .ok_or(NavigatorError::NoSubject)?;
        if main_title.subject_id != subject.id {
            return Err(NavigatorError::ForeignMainTitle {
                main_title_id: main_title.id,
                subject_id: subject.id,
            });
        }
        debug!(main_title_id = main_title.id, "Selecting main title");
        self.reset_below(Level::MainTitles);
        let ticket = self.tokens.issue(Level::SubTitles, main_title.id);
        self.selection = Selection::MainTitle {
            subject,
            main_title,
        };
        Ok(ticket)
    }

    /// Select a sub title of the selected main title and request its components.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError`] if no main title is selected or the sub
    /// title belongs to another main title.
    pub fn select_sub_title(&mut self, sub_title: SubTitle) -> Result<FetchTicket, NavigatorError> {
        let (Some(subject), Some(main_title)) =
            (self.selection.subject(), self.selection.main_title())
        else {
            return Err(NavigatorError::NoMainTitle);
        };
        if sub_title.main_title_id != main_title.id {
            return Err(NavigatorError::ForeignSubTitle {
                sub_title_id: sub_title.id,
                main_title_id: main_title.id,
            });
        }
        debug!(sub_title_id = sub_title.id, "Selecting sub title");
        let (subject, main_title) = (subject.clone(), main_title.clone());
        let ticket = self.tokens.issue(Level::Components, sub_title.id);
        self.selection = Selection::SubTitle {
            subject,
            main_title,
            sub_title,
        };
        Ok(ticket)
    }

    /// Clear the subject and everything below it.
    pub fn clear_subject(&mut self) {
        self.reset_below(Level::Subjects);
        self.selection = Selection::None;
    }

    /// Clear the main title and everything below it.
    pub fn clear_main_title(&mut self) {
        self.reset_below(Level::MainTitles);
        self.selection = std::mem::take(&mut self.selection).truncate_to_subject();
    }

    /// Clear the sub title.
    pub fn clear_sub_title(&mut self) {
        self.tokens.invalidate(Level::Components);
        self.selection = std::mem::take(&mut self.selection).truncate_to_main_title();
    }

    /// Hand back the result of a subject list fetch.
    pub fn apply_subjects(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Subject>, ApiError>,
    ) -> Applied {
        if !self.accept(ticket, Level::Subjects) {
            return Applied::Stale;
        }
        if let Some(subjects) = self.absorb(result) {
            self.subjects = subjects;
        }
        Applied::Updated
    }

    /// Hand back the result of a main title fetch.
    pub fn apply_main_titles(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<MainTitle>, ApiError>,
    ) -> Applied {
        if !self.accept(ticket, Level::MainTitles) {
            return Applied::Stale;
        }
        if let Some(titles) = self.absorb(result) {
            self.main_titles = titles;
        }
        Applied::Updated
    }

    /// Hand back the result of a sub title fetch.
    pub fn apply_sub_titles(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<SubTitle>, ApiError>,
    ) -> Applied {
        if !self.accept(ticket, Level::SubTitles) {
            return Applied::Stale;
        }
        if let Some(titles) = self.absorb(result) {
            self.sub_titles = titles;
        }
        Applied::Updated
    }

    /// Set the search text of a level.
    pub fn set_filter(&mut self, level: Level, query: impl Into<String>) {
        let query = query.into();
        match level {
            Level::Subjects => self.filters.subjects = query,
            Level::MainTitles => self.filters.main_titles = query,
            Level::SubTitles => self.filters.sub_titles = query,
            Level::Components => {}
        }
    }

    /// Subjects matching the subject filter.
    #[must_use]
    pub fn visible_subjects(&self) -> Vec<&Subject> {
        filter_by_title(&self.subjects, &self.filters.subjects)
    }

    /// Main titles matching the main title filter.
    #[must_use]
    pub fn visible_main_titles(&self) -> Vec<&MainTitle> {
        filter_by_title(&self.main_titles, &self.filters.main_titles)
    }

    /// Sub titles matching the sub title filter.
    #[must_use]
    pub fn visible_sub_titles(&self) -> Vec<&SubTitle> {
        filter_by_title(&self.sub_titles, &self.filters.sub_titles)
    }

    /// Drop lists, filters and outstanding fetches below `level`.
    fn reset_below(&mut self, level: Level) {
        for descendant in level.descendants() {
            self.tokens.invalidate(*descendant);
            match descendant {
                Level::MainTitles => {
                    self.main_titles.clear();
                    self.filters.main_titles.clear();
                }
                Level::SubTitles => {
                    self.sub_titles.clear();
                    self.filters.sub_titles.clear();
                }
                Level::Subjects | Level::Components => {}
            }
        }
    }

    fn accept(&self, ticket: &FetchTicket, level: Level) -> bool {
        if ticket.level != level || !self.tokens.is_current(ticket) {
            warn!(?ticket, "Dropping stale response");
            return false;
        }
        true
    }

    /// Map a fetch result to the new list, recording errors.
    ///
    /// Not found is an empty list. Other errors keep the current list.
    fn absorb<T>(&mut self, result: Result<Vec<T>, ApiError>) -> Option<Vec<T>> {
        match result {
            Ok(items) => {
                self.error = None;
                Some(items)
            }
            Err(e) if e.is_not_found() => {
                self.error = None;
                Some(Vec::new())
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use folio_api::PublishStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    fn subject(id: Id, name: &str) -> Subject {
        Subject {
            id,
            name: name.to_owned(),
            description: String::new(),
            image: None,
            order: 1,
            publish_status: PublishStatus::Publish,
        }
    }

    fn main_title(id: Id, subject_id: Id, title: &str) -> MainTitle {
        MainTitle {
            id,
            subject_id,
            title: title.to_owned(),
            short_title: title.to_owned(),
            order: 1,
            publish_status: PublishStatus::Publish,
        }
    }

    fn sub_title(id: Id, main_title_id: Id, title: &str) -> SubTitle {
        SubTitle {
            id,
            main_title_id,
            title: title.to_owned(),
            short_title: title.to_owned(),
            order: 1,
            publish_status: PublishStatus::Publish,
        }
    }

    fn http_error(status: u16) -> ApiError {
        ApiError::HttpResponse {
            status,
            body: String::new(),
        }
    }

    /// Selection is a strict prefix after every call.
    fn assert_prefix(nav: &TaxonomyNavigator) {
        let selection = nav.selection();
        if selection.sub_title().is_some() {
            assert!(selection.main_title().is_some());
        }
        if selection.main_title().is_some() {
            assert!(selection.subject().is_some());
        }
    }

    fn navigator_at_sub_title() -> TaxonomyNavigator {
        let mut nav = TaxonomyNavigator::new();
        let t = nav.select_subject(subject(1, "Rust"));
        nav.apply_main_titles(&t, Ok(vec![main_title(10, 1, "Basics")]));
        let t = nav.select_main_title(main_title(10, 1, "Basics")).unwrap();
        nav.apply_sub_titles(&t, Ok(vec![sub_title(100, 10, "Install")]));
        nav.select_sub_title(sub_title(100, 10, "Install")).unwrap();
        nav
    }

    #[test]
    fn test_prefix_invariant_through_selection() {
        let mut nav = TaxonomyNavigator::new();
        assert_prefix(&nav);

        let t = nav.select_subject(subject(1, "Rust"));
        assert_prefix(&nav);
        nav.apply_main_titles(&t, Ok(vec![main_title(10, 1, "Basics")]));

        nav.select_main_title(main_title(10, 1, "Basics")).unwrap();
        assert_prefix(&nav);

        nav.select_sub_title(sub_title(100, 10, "Install")).unwrap();
        assert_prefix(&nav);
        assert_eq!(nav.selection().path_ids(), vec![1, 10, 100]);

        nav.clear_main_title();
        assert_prefix(&nav);
        assert_eq!(nav.selection().path_ids(), vec![1]);
    }

    #[test]
    fn test_select_main_title_requires_subject() {
        let mut nav = TaxonomyNavigator::new();
        assert_eq!(
            nav.select_main_title(main_title(10, 1, "Basics")),
            Err(NavigatorError::NoSubject)
        );
        assert_eq!(nav.selection(), &Selection::None);
    }

    #[test]
    fn test_select_foreign_main_title_rejected() {
        let mut nav = TaxonomyNavigator::new();
        nav.select_subject(subject(1, "Rust"));

        let err = nav.select_main_title(main_title(20, 2, "Other")).unwrap_err();

        assert_eq!(
            err,
            NavigatorError::ForeignMainTitle {
                main_title_id: 20,
                subject_id: 1,
            }
        );
        assert_eq!(nav.selection().depth(), 1);
    }

    #[test]
    fn test_select_foreign_sub_title_rejected() {
        let mut nav = navigator_at_sub_title();
        let err = nav.select_sub_title(sub_title(200, 20, "Other")).unwrap_err();
        assert!(matches!(err, NavigatorError::ForeignSubTitle { .. }));
        assert_eq!(nav.selection().depth(), 3);
    }

    #[test]
    fn test_reselect_subject_clears_descendants_before_fetch() {
        let mut nav = navigator_at_sub_title();

        nav.select_subject(subject(2, "Go"));

        assert_eq!(nav.selection(), &Selection::Subject(subject(2, "Go")));
        assert!(nav.main_titles().is_empty());
        assert!(nav.sub_titles().is_empty());
    }

    #[test]
    fn test_stale_main_titles_discarded() {
        let mut nav = TaxonomyNavigator::new();
        let ticket_a = nav.select_subject(subject(1, "Rust"));
        let ticket_b = nav.select_subject(subject(2, "Go"));

        let late = nav.apply_main_titles(&ticket_a, Ok(vec![main_title(10, 1, "Basics")]));
        assert_eq!(late, Applied::Stale);
        assert!(nav.main_titles().is_empty());

        let fresh = nav.apply_main_titles(&ticket_b, Ok(vec![main_title(20, 2, "Intro")]));
        assert_eq!(fresh, Applied::Updated);
        assert_eq!(nav.main_titles()[0].id, 20);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stale_response_logged_as_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut nav = TaxonomyNavigator::new();
            let stale = nav.select_subject(subject(1, "Rust"));
            nav.select_subject(subject(2, "Go"));
            assert_eq!(nav.apply_main_titles(&stale, Ok(Vec::new())), Applied::Stale);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Dropping stale response"));
    }

    #[test]
    fn test_stale_sub_titles_after_subject_change() {
        let mut nav = TaxonomyNavigator::new();
        nav.select_subject(subject(1, "Rust"));
        let sub_ticket = nav.select_main_title(main_title(10, 1, "Basics")).unwrap();

        nav.select_subject(subject(2, "Go"));

        let applied = nav.apply_sub_titles(&sub_ticket, Ok(vec![sub_title(100, 10, "Install")]));
        assert_eq!(applied, Applied::Stale);
        assert!(nav.sub_titles().is_empty());
    }

    #[test]
    fn test_component_ticket_stale_after_clear() {
        let mut nav = TaxonomyNavigator::new();
        nav.select_subject(subject(1, "Rust"));
        nav.select_main_title(main_title(10, 1, "Basics")).unwrap();
        let ticket = nav.select_sub_title(sub_title(100, 10, "Install")).unwrap();
        assert!(nav.is_current(&ticket));

        nav.clear_sub_title();

        assert!(!nav.is_current(&ticket));
        assert_eq!(nav.selection().depth(), 2);
    }

    #[test]
    fn test_not_found_is_empty_state() {
        let mut nav = TaxonomyNavigator::new();
        nav.select_subject(subject(1, "Rust"));
        let ticket = nav.select_main_title(main_title(10, 1, "Basics")).unwrap();

        nav.apply_sub_titles(&ticket, Err(http_error(404)));

        assert!(nav.sub_titles().is_empty());
        assert_eq!(nav.error(), None);
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut nav = TaxonomyNavigator::new();
        let ticket = nav.load_subjects();
        nav.apply_subjects(&ticket, Ok(vec![subject(1, "Rust")]));

        let ticket = nav.load_subjects();
        nav.apply_subjects(&ticket, Err(http_error(500)));

        assert_eq!(nav.subjects().len(), 1);
        assert_eq!(nav.error(), Some("HTTP error: 500 - "));

        nav.dismiss_error();
        assert_eq!(nav.error(), None);
    }

    #[test]
    fn test_ticket_for_other_level_rejected() {
        let mut nav = TaxonomyNavigator::new();
        let ticket = nav.select_subject(subject(1, "Rust"));
        assert_eq!(nav.apply_sub_titles(&ticket, Ok(Vec::new())), Applied::Stale);
    }

    #[test]
    fn test_filters_do_not_mutate_lists() {
        let mut nav = TaxonomyNavigator::new();
        let ticket = nav.load_subjects();
        nav.apply_subjects(
            &ticket,
            Ok(vec![
                subject(1, "Rust"),
                subject(2, "Go"),
                subject(3, "Trusty tools"),
                subject(4, "SQL"),
                subject(5, "Python"),
            ]),
        );

        nav.set_filter(Level::Subjects, "rUsT");

        let visible: Vec<Id> = nav.visible_subjects().iter().map(|s| s.id).collect();
        assert_eq!(visible, vec![1, 3]);
        assert_eq!(nav.subjects().len(), 5);
    }

    #[test]
    fn test_subject_change_resets_lower_filters() {
        let mut nav = TaxonomyNavigator::new();
        let t = nav.select_subject(subject(1, "Rust"));
        nav.set_filter(Level::MainTitles, "zzz");
        nav.apply_main_titles(&t, Ok(vec![main_title(10, 1, "Basics")]));
        assert!(nav.visible_main_titles().is_empty());

        let t = nav.select_subject(subject(1, "Rust"));
        nav.apply_main_titles(&t, Ok(vec![main_title(10, 1, "Basics")]));

        assert_eq!(nav.visible_main_titles().len(), 1);
    }
}
