//! Synchronous driver tying a [`ContentApi`] to the navigator and renderer.
//!
//! Runs each fetch a selection asks for and feeds the result back. Used by
//! the CLI, where requests complete one at a time.

use std::sync::Arc;

use folio_api::{ApiError, ContentApi, Id, ImageUrlResolver};
use folio_renderer::{Document, RenderOptions};
use tracing::warn;

use crate::navigator::{NavigatorError, TaxonomyNavigator};
use crate::token::{FetchTicket, Level};

/// Lookup failure while selecting by ID.
#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    /// No loaded record has this ID at this level.
    #[error("no {level} with id {id}")]
    NotFound {
        /// Level name.
        level: &'static str,
        /// Requested ID.
        id: Id,
    },
    /// The navigator rejected the selection.
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

/// Navigator plus the content source and renderer settings.
pub struct Explorer {
    api: Arc<dyn ContentApi>,
    images: ImageUrlResolver,
    options: RenderOptions,
    navigator: TaxonomyNavigator,
    document: Option<Document>,
}

impl Explorer {
    /// Create an explorer over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn ContentApi>, images: ImageUrlResolver, options: RenderOptions) -> Self {
        Self {
            api,
            images,
            options,
            navigator: TaxonomyNavigator::new(),
            document: None,
        }
    }

    /// Navigation state.
    #[must_use]
    pub fn navigator(&self) -> &TaxonomyNavigator {
        &self.navigator
    }

    /// Set the search filter for one level's list.
    pub fn set_filter(&mut self, level: Level, query: impl Into<String>) {
        self.navigator.set_filter(level, query);
    }

    /// Clear the subject selection along with the rendered document.
    pub fn clear_subject(&mut self) {
        self.document = None;
        self.navigator.clear_subject();
    }

    /// Clear the main title selection along with the rendered document.
    pub fn clear_main_title(&mut self) {
        self.document = None;
        self.navigator.clear_main_title();
    }

    /// Clear the sub title selection along with the rendered document.
    pub fn clear_sub_title(&mut self) {
        self.document = None;
        self.navigator.clear_sub_title();
    }

    /// Rendered document of the selected sub title.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Fetch the subject list.
    pub fn load_subjects(&mut self) {
        let ticket = self.navigator.load_subjects();
        let result = self.api.list_subjects();
        self.navigator.apply_subjects(&ticket, result);
    }

    /// Select a loaded subject by ID and fetch its main titles.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError::NotFound`] if the subject is not loaded.
    pub fn select_subject(&mut self, id: Id) -> Result<(), ExploreError> {
        let subject = self
            .navigator
            .subjects()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ExploreError::NotFound { level: "subject", id })?;
        self.document = None;
        let ticket = self.navigator.select_subject(subject);
        let result = self.api.list_main_titles(ticket.parent_id);
        self.navigator.apply_main_titles(&ticket, result);
        Ok(())
    }

    /// Select a loaded main title by ID and fetch its sub titles.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError`] if the main title is not loaded or rejected.
    pub fn select_main_title(&mut self, id: Id) -> Result<(), ExploreError> {
        let main_title = self
            .navigator
            .main_titles()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(ExploreError::NotFound {
                level: "main title",
                id,
            })?;
        let ticket = self.navigator.select_main_title(main_title)?;
        self.document = None;
        let result = self.api.list_sub_titles(ticket.parent_id);
        self.navigator.apply_sub_titles(&ticket, result);
        Ok(())
    }

    /// Select a loaded sub title by ID and render its components.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError`] if the sub title is not loaded or rejected.
    pub fn select_sub_title(&mut self, id: Id) -> Result<(), ExploreError> {
        let sub_title = self
            .navigator
            .sub_titles()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ExploreError::NotFound {
                level: "sub title",
                id,
            })?;
        let ticket = self.navigator.select_sub_title(sub_title)?;
        let result = self.api.page_components(ticket.parent_id);
        self.apply_components(&ticket, result);
        Ok(())
    }

    fn apply_components(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<folio_api::ComponentEntry>, ApiError>,
    ) {
        if ticket.level != Level::Components || !self.navigator.is_current(ticket) {
            return;
        }
        self.document = Some(match result {
            Ok(entries) => Document::from_entries(&entries, &self.images, self.options),
            Err(e) if e.is_not_found() => Document::default(),
            Err(e) => {
                warn!(error = %e, sub_title_id = ticket.parent_id, "Failed to load components");
                Document::failed(e.user_message())
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use folio_api::{ComponentEntry, MockContentApi, PageComponent};
    use pretty_assertions::assert_eq;

    use super::*;

    fn api() -> MockContentApi {
        MockContentApi::new()
            .with_subject(1, "Rust")
            .with_subject(2, "Go")
            .with_main_title(10, 1, "Basics")
            .with_main_title(11, 1, "Empty")
            .with_sub_title(100, 10, "Install")
            .with_components(
                100,
                vec![ComponentEntry::Single(PageComponent {
                    component_type: Some("h1".to_owned()),
                    description: Some("Install".to_owned()),
                    ..Default::default()
                })],
            )
    }

    fn explorer(api: MockContentApi) -> Explorer {
        Explorer::new(
            Arc::new(api),
            ImageUrlResolver::new("http://localhost:3000/api"),
            RenderOptions::default(),
        )
    }

    #[test]
    fn test_walk_to_document() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        explorer.select_subject(1).unwrap();
        explorer.select_main_title(10).unwrap();
        explorer.select_sub_title(100).unwrap();

        let html = explorer.document().unwrap().render_html();

        assert_eq!(html, r#"<div class="block"><h1>Install</h1></div>"#);
        assert_eq!(explorer.navigator().selection().path_ids(), vec![1, 10, 100]);
    }

    #[test]
    fn test_main_title_without_sub_titles_is_empty() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        explorer.select_subject(1).unwrap();
        explorer.select_main_title(11).unwrap();

        assert!(explorer.navigator().sub_titles().is_empty());
        assert_eq!(explorer.navigator().error(), None);
    }

    #[test]
    fn test_component_failure_renders_notice() {
        let mut explorer = explorer(api().failing("page_components", 500));
        explorer.load_subjects();
        explorer.select_subject(1).unwrap();
        explorer.select_main_title(10).unwrap();
        explorer.select_sub_title(100).unwrap();

        let document = explorer.document().unwrap();
        assert!(document.is_empty());
        assert_eq!(document.error.as_deref(), Some("page_components failed"));
    }

    #[test]
    fn test_reselecting_subject_drops_document() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        explorer.select_subject(1).unwrap();
        explorer.select_main_title(10).unwrap();
        explorer.select_sub_title(100).unwrap();

        explorer.select_subject(2).unwrap();

        assert!(explorer.document().is_none());
        assert!(explorer.navigator().main_titles().is_empty());
    }

    #[test]
    fn test_clears_drop_document() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        explorer.select_subject(1).unwrap();
        explorer.select_main_title(10).unwrap();
        explorer.select_sub_title(100).unwrap();
        assert!(explorer.document().is_some());

        explorer.clear_sub_title();
        assert!(explorer.document().is_none());
        assert_eq!(explorer.navigator().selection().path_ids(), vec![1, 10]);

        explorer.select_sub_title(100).unwrap();
        explorer.clear_main_title();
        assert!(explorer.document().is_none());
        assert_eq!(explorer.navigator().selection().path_ids(), vec![1]);

        explorer.select_main_title(10).unwrap();
        explorer.select_sub_title(100).unwrap();
        explorer.clear_subject();
        assert!(explorer.document().is_none());
        assert!(explorer.navigator().selection().path_ids().is_empty());
    }

    #[test]
    fn test_filter_through_explorer() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        explorer.set_filter(Level::Subjects, "go");

        let names: Vec<_> = explorer
            .navigator()
            .visible_subjects()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Go"]);
    }

    #[test]
    fn test_unknown_id() {
        let mut explorer = explorer(api());
        explorer.load_subjects();
        assert!(matches!(
            explorer.select_subject(9),
            Err(ExploreError::NotFound { level: "subject", id: 9 })
        ));
    }
}
