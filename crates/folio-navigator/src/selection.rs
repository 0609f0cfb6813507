//! Hierarchical selection.
//!
//! The selection is a strict prefix of subject → main title → sub title. A
//! sub title cannot be selected without its main title and subject, so the
//! enum only has states where every ancestor is present.

use folio_api::{Id, MainTitle, SubTitle, Subject};

/// Current selection path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A subject.
    Subject(Subject),
    /// A subject and one of its main titles.
    MainTitle {
        /// Selected subject.
        subject: Subject,
        /// Selected main title.
        main_title: MainTitle,
    },
    /// A full path down to a sub title.
    SubTitle {
        /// Selected subject.
        subject: Subject,
        /// Selected main title.
        main_title: MainTitle,
        /// Selected sub title.
        sub_title: SubTitle,
    },
}

impl Selection {
    /// Selected subject.
    #[must_use]
    pub fn subject(&self) -> Option<&Subject> {
        match self {
            Self::None => None,
            Self::Subject(subject)
            | Self::MainTitle { subject, .. }
            | Self::SubTitle { subject, .. } => Some(subject),
        }
    }

    /// Selected main title.
    #[must_use]
    pub fn main_title(&self) -> Option<&MainTitle> {
        match self {
            Self::None | Self::Subject(_) => None,
            Self::MainTitle { main_title, .. } | Self::SubTitle { main_title, .. } => {
                Some(main_title)
            }
        }
    }

    /// Selected sub title.
    #[must_use]
    pub fn sub_title(&self) -> Option<&SubTitle> {
        match self {
            Self::SubTitle { sub_title, .. } => Some(sub_title),
            _ => None,
        }
    }

    /// Number of selected levels (0-3).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Subject(_) => 1,
            Self::MainTitle { .. } => 2,
            Self::SubTitle { .. } => 3,
        }
    }

    /// IDs along the path, outermost first.
    #[must_use]
    pub fn path_ids(&self) -> Vec<Id> {
        let mut ids = Vec::with_capacity(3);
        ids.extend(self.subject().map(|s| s.id));
        ids.extend(self.main_title().map(|m| m.id));
        ids.extend(self.sub_title().map(|s| s.id));
        ids
    }

    /// Keep the selection up to and including the subject.
    #[must_use]
    pub(crate) fn truncate_to_subject(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Subject(subject)
            | Self::MainTitle { subject, .. }
            | Self::SubTitle { subject, .. } => Self::Subject(subject),
        }
    }

    /// Keep the selection up to and including the main title.
    #[must_use]
    pub(crate) fn truncate_to_main_title(self) -> Self {
        match self {
            Self::SubTitle {
                subject,
                main_title,
                ..
            } => Self::MainTitle {
                subject,
                main_title,
            },
            other => other,
        }
    }
}
