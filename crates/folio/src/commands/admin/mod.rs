//! Content administration commands.
//!
//! Every mutation runs with the stored session; forms are validated before
//! anything is sent.

mod component;
mod subject;
mod title;

use clap::{Args, ValueEnum};
use folio_api::{Id, PublishStatus};

pub(crate) use component::ComponentCommand;
pub(crate) use subject::SubjectCommand;
pub(crate) use title::{MainTitleCommand, SubTitleCommand};

use crate::context::ApiArgs;

/// Reader visibility flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    /// Visible to readers.
    Publish,
    /// Hidden from readers.
    #[default]
    Onhold,
}

impl From<StatusArg> for PublishStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Publish => Self::Publish,
            StatusArg::Onhold => Self::Onhold,
        }
    }
}

/// Arguments for delete subcommands.
#[derive(Args)]
pub(crate) struct DeleteArgs {
    /// Record ID.
    id: Id,

    #[command(flatten)]
    api: ApiArgs,
}
