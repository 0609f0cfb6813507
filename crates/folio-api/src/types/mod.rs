//! Content API record types.

mod auth;
mod component;
mod detail;
mod lenient;
mod taxonomy;

pub(crate) use auth::LoginResponse;
pub use auth::{Credentials, Staff, User};
pub use component::{
    CodeLanguage, ComponentEntry, ComponentKind, ComponentsResponse, PageComponent, RowEnvelope,
    RowStatus, UnknownLanguage,
};
pub use detail::{AdminComponents, NavMainTitle, NavSubTitle, SubjectDetail};
pub use taxonomy::{Id, MainTitle, PublishStatus, SubTitle, Subject, Titled};
