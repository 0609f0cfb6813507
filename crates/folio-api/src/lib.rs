//! Typed client for the Folio content API.
//!
//! The content service stores a three-level taxonomy (subjects, main titles,
//! sub titles) and the ordered page components of each sub title. This crate
//! provides:
//!
//! - Record types matching the service's JSON, decoded leniently
//! - A [`ContentApi`] trait with one method per service operation
//! - [`HttpContentApi`], a sync `ureq` implementation
//! - [`MockContentApi`] for testing (behind the `mock` feature flag)
//! - [`Session`] and [`SessionStore`] for the logged-in user's API key
//! - Admin forms with client-side validation
//!
//! # Example
//!
//! ```ignore
//! use folio_api::{ContentApi, HttpContentApi};
//!
//! let api = HttpContentApi::from_config(&config.api);
//! for subject in api.list_subjects()? {
//!     println!("{}: {}", subject.id, subject.name);
//! }
//! ```

mod assets;
mod client;
mod error;
mod forms;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod session;
mod source;
pub mod types;

pub use assets::ImageUrlResolver;
pub use client::HttpContentApi;
pub use error::ApiError;
pub use forms::{
    FormError, ImageUpload, MainTitleForm, PageComponentForm, SubTitleForm, SubjectForm,
};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentApi;
pub use session::{Session, SessionStore};
pub use source::ContentApi;
pub use types::{
    AdminComponents, CodeLanguage, ComponentEntry, ComponentKind, Credentials, Id, MainTitle,
    NavMainTitle, NavSubTitle, PageComponent, PublishStatus, RowEnvelope, RowStatus, Staff,
    SubTitle, Subject, SubjectDetail, Titled, UnknownLanguage, User,
};

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(HttpContentApi: Send, Sync);
    assert_impl_all!(MockContentApi: Send, Sync);
    assert_impl_all!(SessionStore: Send, Sync);
}
