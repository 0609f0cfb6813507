//! CLI command implementations.

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod browse;
pub(crate) mod serve;

pub(crate) use admin::{ComponentCommand, MainTitleCommand, SubTitleCommand, SubjectCommand};
pub(crate) use auth::{LoginArgs, LogoutArgs, WhoamiArgs};
pub(crate) use browse::{MainTitlesArgs, OutlineArgs, RenderArgs, SubTitlesArgs, SubjectsArgs};
pub(crate) use serve::ServeArgs;
