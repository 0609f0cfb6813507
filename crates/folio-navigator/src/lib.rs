//! Taxonomy navigation for Folio.
//!
//! Two views over the subject → main title → sub title hierarchy:
//!
//! - [`TaxonomyNavigator`]: three-column browsing with a strict-prefix
//!   [`Selection`], per-level [`FetchTicket`]s that let late responses be
//!   dropped, and non-mutating title filters.
//! - [`SubjectOutline`]: the reader sidebar of one subject, with a default
//!   selection, a single expanded main title, search, and previous/next
//!   links.
//!
//! [`Explorer`] drives a navigator against a [`folio_api::ContentApi`] and
//! renders the selected sub title.

mod explorer;
mod filter;
mod navigator;
mod outline;
mod selection;
mod token;

pub use explorer::{ExploreError, Explorer};
pub use filter::{filter_by_title, matches_query};
pub use navigator::{Applied, NavigatorError, TaxonomyNavigator};
pub use outline::{
    Breadcrumbs, MISSING_SUBJECT_MESSAGE, Neighbors, OutlineError, SubjectOutline,
};
pub use selection::Selection;
pub use token::{FetchTicket, Level, RequestTokens};
