//! `folio subject` command implementations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_api::{ContentApi, Id, ImageUpload, SubjectForm};

use super::DeleteArgs;
use crate::context::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Subject commands.
#[derive(Subcommand)]
pub(crate) enum SubjectCommand {
    /// Create a subject.
    Create(CreateArgs),
    /// Replace a subject's fields.
    Update(UpdateArgs),
    /// Delete a subject and everything under it.
    Delete(DeleteArgs),
}

impl SubjectCommand {
    /// Execute the subject subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::Create(args) => {
                let context = args.api.context()?;
                let form = args.fields.into_form()?;
                context.authorized_client().create_subject(&form)?;
                output.success(&format!("Created subject \"{}\"", form.name));
            }
            Self::Update(args) => {
                let context = args.api.context()?;
                let form = args.fields.into_form()?;
                context.authorized_client().update_subject(args.id, &form)?;
                output.success(&format!("Updated subject {}", args.id));
            }
            Self::Delete(args) => {
                let context = args.api.context()?;
                context.authorized_client().delete_subject(args.id)?;
                output.success(&format!("Deleted subject {}", args.id));
            }
        }
        Ok(())
    }
}

/// Editable subject fields.
#[derive(Args)]
pub(crate) struct SubjectFields {
    /// Display name.
    #[arg(long)]
    name: String,

    /// Description.
    #[arg(long)]
    description: String,

    /// Display order (1-based).
    #[arg(long, default_value_t = 1)]
    order: u32,

    /// Cover image file.
    #[arg(long)]
    image: Option<PathBuf>,
}

impl SubjectFields {
    fn into_form(self) -> Result<SubjectForm, CliError> {
        let image = self
            .image
            .as_deref()
            .map(ImageUpload::from_path)
            .transpose()?;
        Ok(SubjectForm {
            name: self.name,
            description: self.description,
            order: self.order,
            image,
        })
    }
}

/// Arguments for `folio subject create`.
#[derive(Args)]
pub(crate) struct CreateArgs {
    #[command(flatten)]
    fields: SubjectFields,

    #[command(flatten)]
    api: ApiArgs,
}

/// Arguments for `folio subject update`.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Subject ID.
    id: Id,

    #[command(flatten)]
    fields: SubjectFields,

    #[command(flatten)]
    api: ApiArgs,
}

#[cfg(test)]
mod tests {
    use folio_api::{ApiError, FormError, MockContentApi, Session, User};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(image: Option<PathBuf>) -> SubjectFields {
        SubjectFields {
            name: "Rust".to_owned(),
            description: "Systems programming".to_owned(),
            order: 2,
            image,
        }
    }

    #[test]
    fn test_into_form_reads_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let form = fields(Some(path)).into_form().unwrap();

        let image = form.image.unwrap();
        assert_eq!(image.filename, "cover.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.data.len(), 4);
    }

    #[test]
    fn test_into_form_missing_image_file() {
        let result = fields(Some(PathBuf::from("/nonexistent/cover.png"))).into_form();
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_create_requires_session() {
        let api = MockContentApi::new();
        let form = fields(None).into_form().unwrap();

        assert!(matches!(
            api.create_subject(&form),
            Err(ApiError::Unauthenticated)
        ));

        let api = api.with_session(Session::new(User::default(), "key"));
        api.create_subject(&form).unwrap();
        assert_eq!(api.list_subjects().unwrap().len(), 1);
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut fields = fields(None);
        fields.description = "  ".to_owned();
        let form = fields.into_form().unwrap();

        assert_eq!(
            form.validate(),
            Err(FormError::Missing("subject description"))
        );
    }
}
