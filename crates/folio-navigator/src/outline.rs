//! Reader outline of one subject.
//!
//! Built from the subject-detail navigation tree. One main title is expanded
//! at a time and one sub title is selected, defaulting to the first sub title
//! of the first main title that has any.

use folio_api::{Id, NavMainTitle, NavSubTitle, Subject, SubjectDetail};
use serde::Serialize;

use crate::filter::matches_query;

/// Message shown for a subject with an empty navigation tree.
pub const MISSING_SUBJECT_MESSAGE: &str =
    "The subject you are looking for does not exist or has been removed.";

/// Outline construction or navigation failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// The subject has no navigation entries.
    #[error("subject {0} has no content")]
    EmptySubject(Id),
    /// The sub title is not part of this subject.
    #[error("sub title {0} is not part of this subject")]
    UnknownSubTitle(Id),
}

/// Breadcrumb trail for the selected sub title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumbs {
    /// Subject name.
    pub subject: String,
    /// Main title.
    pub main_title: String,
    /// Sub title.
    pub sub_title: String,
}

/// Neighbouring sub titles in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    /// Previous sub title.
    pub previous: Option<NavSubTitle>,
    /// Next sub title.
    pub next: Option<NavSubTitle>,
}

/// Reader navigation state for one subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubjectOutline {
    subject: Subject,
    nav: Vec<NavMainTitle>,
    expanded: Option<Id>,
    selected: Option<Id>,
    #[serde(skip)]
    filter: String,
}

impl SubjectOutline {
    /// Build the outline with the default selection applied.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::EmptySubject`] if the navigation tree is empty.
    pub fn from_detail(detail: SubjectDetail) -> Result<Self, OutlineError> {
        if detail.nav.is_empty() {
            return Err(OutlineError::EmptySubject(detail.subject.id));
        }
        let mut outline = Self {
            subject: detail.subject,
            nav: detail.nav,
            expanded: None,
            selected: None,
            filter: String::new(),
        };
        outline.apply_default_selection();
        Ok(outline)
    }

    fn apply_default_selection(&mut self) {
        if let Some(main) = self.nav.iter().find(|m| !m.sub_titles.is_empty()) {
            self.expanded = Some(main.main_subject_id);
            self.selected = main.sub_titles.first().map(|s| s.sub_subject_id);
        }
    }

    /// The subject.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Full navigation tree.
    #[must_use]
    pub fn nav(&self) -> &[NavMainTitle] {
        &self.nav
    }

    /// Expanded main title.
    #[must_use]
    pub fn expanded(&self) -> Option<Id> {
        self.expanded
    }

    /// Selected sub title.
    #[must_use]
    pub fn selected(&self) -> Option<Id> {
        self.selected
    }

    /// Whether `main_title_id` is expanded.
    #[must_use]
    pub fn is_expanded(&self, main_title_id: Id) -> bool {
        self.expanded == Some(main_title_id)
    }

    /// Expand a main title, or collapse it if it is already expanded.
    pub fn toggle_main_title(&mut self, main_title_id: Id) {
        self.expanded = if self.expanded == Some(main_title_id) {
            None
        } else {
            Some(main_title_id)
        };
    }

    /// Select a sub title and expand its main title.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::UnknownSubTitle`] if the sub title is not in
    /// this subject; the selection is unchanged.
    pub fn select_sub_title(&mut self, sub_title_id: Id) -> Result<(), OutlineError> {
        let main = self
            .find_main_of(sub_title_id)
            .ok_or(OutlineError::UnknownSubTitle(sub_title_id))?;
        self.expanded = Some(main.main_subject_id);
        self.selected = Some(sub_title_id);
        Ok(())
    }

    /// Set the search text.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
    }

    /// Main titles whose own title or any sub title matches the search text.
    ///
    /// Matching main titles keep all their sub titles.
    #[must_use]
    pub fn visible(&self) -> Vec<&NavMainTitle> {
        self.nav
            .iter()
            .filter(|main| {
                matches_query(&main.main_subject_title, &self.filter)
                    || main
                        .sub_titles
                        .iter()
                        .any(|sub| matches_query(&sub.sub_subject_title, &self.filter))
            })
            .collect()
    }

    /// Previous and next sub titles of the selection across the whole outline.
    #[must_use]
    pub fn neighbors(&self) -> Neighbors {
        let Some(selected) = self.selected else {
            return Neighbors::default();
        };
        let flat: Vec<&NavSubTitle> = self.nav.iter().flat_map(|m| &m.sub_titles).collect();
        let Some(position) = flat.iter().position(|s| s.sub_subject_id == selected) else {
            return Neighbors::default();
        };
        Neighbors {
            previous: position
                .checked_sub(1)
                .and_then(|i| flat.get(i))
                .map(|s| (*s).clone()),
            next: flat.get(position + 1).map(|s| (*s).clone()),
        }
    }

    /// Breadcrumbs of the selection.
    #[must_use]
    pub fn breadcrumbs(&self) -> Option<Breadcrumbs> {
        let selected = self.selected?;
        let main = self.find_main_of(selected)?;
        let sub = main
            .sub_titles
            .iter()
            .find(|s| s.sub_subject_id == selected)?;
        Some(Breadcrumbs {
            subject: self.subject.name.clone(),
            main_title: main.main_subject_title.clone(),
            sub_title: sub.sub_subject_title.clone(),
        })
    }

    fn find_main_of(&self, sub_title_id: Id) -> Option<&NavMainTitle> {
        self.nav.iter().find(|m| {
            m.sub_titles
                .iter()
                .any(|s| s.sub_subject_id == sub_title_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_api::PublishStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sub(id: Id, title: &str) -> NavSubTitle {
        NavSubTitle {
            sub_subject_id: id,
            sub_subject_title: title.to_owned(),
        }
    }

    fn main(id: Id, title: &str, subs: Vec<NavSubTitle>) -> NavMainTitle {
        NavMainTitle {
            main_subject_id: id,
            main_subject_title: title.to_owned(),
            sub_titles: subs,
        }
    }

    fn detail(nav: Vec<NavMainTitle>) -> SubjectDetail {
        SubjectDetail {
            subject: Subject {
                id: 1,
                name: "Rust".to_owned(),
                description: String::new(),
                image: None,
                order: 1,
                publish_status: PublishStatus::Publish,
            },
            nav,
        }
    }

    fn outline() -> SubjectOutline {
        SubjectOutline::from_detail(detail(vec![
            main(9, "Preface", vec![]),
            main(10, "Basics", vec![sub(100, "Install"), sub(101, "Hello world")]),
            main(11, "Ownership", vec![sub(110, "Borrowing")]),
        ]))
        .unwrap()
    }

    #[test]
    fn test_empty_nav_is_missing_subject() {
        assert_eq!(
            SubjectOutline::from_detail(detail(vec![])),
            Err(OutlineError::EmptySubject(1))
        );
    }

    #[test]
    fn test_default_selection_skips_empty_main_titles() {
        let outline = outline();
        assert_eq!(outline.expanded(), Some(10));
        assert_eq!(outline.selected(), Some(100));
    }

    #[test]
    fn test_no_sub_titles_means_no_selection() {
        let outline = SubjectOutline::from_detail(detail(vec![main(9, "Preface", vec![])])).unwrap();
        assert_eq!(outline.selected(), None);
        assert_eq!(outline.expanded(), None);
    }

    #[test]
    fn test_toggle() {
        let mut outline = outline();
        outline.toggle_main_title(10);
        assert_eq!(outline.expanded(), None);
        outline.toggle_main_title(11);
        assert!(outline.is_expanded(11));
    }

    #[test]
    fn test_select_sub_title_expands_parent() {
        let mut outline = outline();
        outline.select_sub_title(110).unwrap();
        assert_eq!(outline.expanded(), Some(11));
        assert_eq!(outline.selected(), Some(110));
    }

    #[test]
    fn test_select_unknown_sub_title() {
        let mut outline = outline();
        assert_eq!(
            outline.select_sub_title(999),
            Err(OutlineError::UnknownSubTitle(999))
        );
        assert_eq!(outline.selected(), Some(100));
    }

    #[test]
    fn test_filter_matches_main_or_sub_titles() {
        let mut outline = outline();
        outline.set_filter("BORROW");
        let ids: Vec<Id> = outline.visible().iter().map(|m| m.main_subject_id).collect();
        assert_eq!(ids, vec![11]);

        outline.set_filter("basics");
        let visible = outline.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].sub_titles.len(), 2);
        assert_eq!(outline.nav().len(), 3);
    }

    #[test]
    fn test_neighbors_cross_main_titles() {
        let mut outline = outline();
        outline.select_sub_title(101).unwrap();

        let neighbors = outline.neighbors();

        assert_eq!(neighbors.previous, Some(sub(100, "Install")));
        assert_eq!(neighbors.next, Some(sub(110, "Borrowing")));
    }

    #[test]
    fn test_neighbors_at_start() {
        let neighbors = outline().neighbors();
        assert_eq!(neighbors.previous, None);
        assert_eq!(neighbors.next, Some(sub(101, "Hello world")));
    }

    #[test]
    fn test_breadcrumbs() {
        assert_eq!(
            outline().breadcrumbs(),
            Some(Breadcrumbs {
                subject: "Rust".to_owned(),
                main_title: "Basics".to_owned(),
                sub_title: "Install".to_owned(),
            })
        );
    }
}
