//! `folio main-title` and `folio sub-title` command implementations.

use clap::{Args, Subcommand};
use folio_api::{ContentApi, Id, MainTitleForm, SubTitleForm};

use super::{DeleteArgs, StatusArg};
use crate::context::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Fields shared by main and sub titles.
#[derive(Args)]
pub(crate) struct TitleFields {
    /// Full title.
    #[arg(long)]
    title: String,

    /// Abbreviated title (default: the full title).
    #[arg(long)]
    short_title: Option<String>,

    /// Display order (1-based).
    #[arg(long, default_value_t = 1)]
    order: u32,

    /// Reader visibility.
    #[arg(long, value_enum, default_value_t)]
    status: StatusArg,
}

impl TitleFields {
    fn short_title(&self) -> String {
        self.short_title.clone().unwrap_or_else(|| self.title.clone())
    }

    fn main_title_form(&self, subject_id: Id) -> MainTitleForm {
        MainTitleForm {
            subject_id,
            short_title: self.short_title(),
            title: self.title.clone(),
            order: self.order,
            publish_status: self.status.into(),
        }
    }

    fn sub_title_form(&self, main_title_id: Id) -> SubTitleForm {
        SubTitleForm {
            main_title_id,
            short_title: self.short_title(),
            title: self.title.clone(),
            order: self.order,
            publish_status: self.status.into(),
        }
    }
}

/// Main title commands.
#[derive(Subcommand)]
pub(crate) enum MainTitleCommand {
    /// Create a main title under a subject.
    Create(MainTitleArgs),
    /// Replace a main title's fields.
    Update(UpdateMainTitleArgs),
    /// Delete a main title and its sub titles.
    Delete(DeleteArgs),
}

/// Arguments for `folio main-title create`.
#[derive(Args)]
pub(crate) struct MainTitleArgs {
    /// Owning subject ID.
    #[arg(long)]
    subject_id: Id,

    #[command(flatten)]
    fields: TitleFields,

    #[command(flatten)]
    api: ApiArgs,
}

/// Arguments for `folio main-title update`.
#[derive(Args)]
pub(crate) struct UpdateMainTitleArgs {
    /// Main title ID.
    id: Id,

    #[command(flatten)]
    target: MainTitleArgs,
}

impl MainTitleCommand {
    /// Execute the main-title subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::Create(args) => {
                let api = args.api.context()?.authorized_client();
                let form = args.fields.main_title_form(args.subject_id);
                api.create_main_title(&form)?;
                output.success(&format!("Created main title \"{}\"", form.title));
            }
            Self::Update(args) => {
                let target = args.target;
                let api = target.api.context()?.authorized_client();
                let form = target.fields.main_title_form(target.subject_id);
                api.update_main_title(args.id, &form)?;
                output.success(&format!("Updated main title {}", args.id));
            }
            Self::Delete(args) => {
                let api = args.api.context()?.authorized_client();
                api.delete_main_title(args.id)?;
                output.success(&format!("Deleted main title {}", args.id));
            }
        }
        Ok(())
    }
}

/// Sub title commands.
#[derive(Subcommand)]
pub(crate) enum SubTitleCommand {
    /// Create a sub title under a main title.
    Create(SubTitleArgs),
    /// Replace a sub title's fields.
    Update(UpdateSubTitleArgs),
    /// Delete a sub title and its components.
    Delete(DeleteArgs),
}

/// Arguments for `folio sub-title create`.
#[derive(Args)]
pub(crate) struct SubTitleArgs {
    /// Owning main title ID.
    #[arg(long)]
    main_title_id: Id,

    #[command(flatten)]
    fields: TitleFields,

    #[command(flatten)]
    api: ApiArgs,
}

/// Arguments for `folio sub-title update`.
#[derive(Args)]
pub(crate) struct UpdateSubTitleArgs {
    /// Sub title ID.
    id: Id,

    #[command(flatten)]
    target: SubTitleArgs,
}

impl SubTitleCommand {
    /// Execute the sub-title subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::Create(args) => {
                let api = args.api.context()?.authorized_client();
                let form = args.fields.sub_title_form(args.main_title_id);
                api.create_sub_title(&form)?;
                output.success(&format!("Created sub title \"{}\"", form.title));
            }
            Self::Update(args) => {
                let target = args.target;
                let api = target.api.context()?.authorized_client();
                let form = target.fields.sub_title_form(target.main_title_id);
                api.update_sub_title(args.id, &form)?;
                output.success(&format!("Updated sub title {}", args.id));
            }
            Self::Delete(args) => {
                let api = args.api.context()?.authorized_client();
                api.delete_sub_title(args.id)?;
                output.success(&format!("Deleted sub title {}", args.id));
            }
        }
        Ok(())
    }
}
