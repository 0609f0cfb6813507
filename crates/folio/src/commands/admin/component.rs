//! `folio component` command implementations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_api::{
    ComponentEntry, ContentApi, Id, ImageUpload, PageComponent, PageComponentForm, RowStatus,
};

use super::DeleteArgs;
use crate::context::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Longest text excerpt shown by `component list`.
const EXCERPT_CHARS: usize = 48;

/// Page component commands.
#[derive(Subcommand)]
pub(crate) enum ComponentCommand {
    /// List a sub title's components as the editor sees them.
    List(ListArgs),
    /// Add a component to a sub title.
    Create(CreateArgs),
    /// Replace a component's fields.
    Update(UpdateArgs),
    /// Delete a component.
    Delete(DeleteArgs),
}

impl ComponentCommand {
    /// Execute the component subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::List(args) => {
                let api = args.api.context()?.authorized_client();
                for line in list_lines(&api, args.sub_title_id)? {
                    output.data(&line);
                }
            }
            Self::Create(args) => {
                let api = args.api.context()?.authorized_client();
                let form = args.fields.into_form()?;
                api.create_component(&form)?;
                output.success(&format!(
                    "Created {} component in sub title {}",
                    form.component_type, form.sub_title_id
                ));
            }
            Self::Update(args) => {
                let api = args.api.context()?.authorized_client();
                let form = args.fields.into_form()?;
                update(&api, args.id, &form)?;
                output.success(&format!("Updated component {}", args.id));
            }
            Self::Delete(args) => {
                let api = args.api.context()?.authorized_client();
                api.delete_component(args.id)?;
                output.success(&format!("Deleted component {}", args.id));
            }
        }
        Ok(())
    }
}

/// Editable component fields.
#[derive(Args)]
pub(crate) struct ComponentFields {
    /// Owning sub title ID.
    #[arg(long)]
    sub_title_id: Id,

    /// Component type: h1-h5, p, image, youtube, code, ol or ul.
    #[arg(long = "type")]
    component_type: String,

    /// Text content (list items one per line).
    #[arg(long, default_value = "")]
    description: String,

    /// Position within the sub title (1-based).
    #[arg(long, default_value_t = 1)]
    order: u32,

    /// Place the component in a horizontal row with its neighbours.
    #[arg(long)]
    row: bool,

    /// Extra CSS class.
    #[arg(long = "class", default_value = "")]
    special_class: String,

    /// Language of a code component.
    #[arg(long)]
    language: Option<String>,

    /// Image file of an image component.
    #[arg(long)]
    image: Option<PathBuf>,
}

impl ComponentFields {
    fn into_form(self) -> Result<PageComponentForm, CliError> {
        let image = self
            .image
            .as_deref()
            .map(ImageUpload::from_path)
            .transpose()?;
        Ok(PageComponentForm {
            sub_title_id: self.sub_title_id,
            component_type: self.component_type,
            description: self.description,
            order: self.order,
            row_status: if self.row {
                RowStatus::Row
            } else {
                RowStatus::Separate
            },
            special_class: self.special_class,
            language: self.language,
            image,
        })
    }
}

/// Arguments for `folio component list`.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Sub title ID.
    sub_title_id: Id,

    #[command(flatten)]
    api: ApiArgs,
}

/// Arguments for `folio component create`.
#[derive(Args)]
pub(crate) struct CreateArgs {
    #[command(flatten)]
    fields: ComponentFields,

    #[command(flatten)]
    api: ApiArgs,
}

/// Arguments for `folio component update`.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Component ID.
    id: Id,

    #[command(flatten)]
    fields: ComponentFields,

    #[command(flatten)]
    api: ApiArgs,
}

/// Update a component, keeping its stored image when no new one is given.
fn update(api: &dyn ContentApi, id: Id, form: &PageComponentForm) -> Result<(), CliError> {
    let has_stored_image = form.image.is_none() && stored_image(api, form.sub_title_id, id)?;
    api.update_component(id, form, has_stored_image)?;
    Ok(())
}

/// Whether component `id` of the sub title already has an image.
fn stored_image(api: &dyn ContentApi, sub_title_id: Id, id: Id) -> Result<bool, CliError> {
    let components = api.admin_page_components(sub_title_id)?;
    Ok(components
        .page_components
        .iter()
        .flat_map(cells)
        .any(|c| c.id == id && c.image.as_deref().is_some_and(|i| !i.is_empty())))
}

fn cells(entry: &ComponentEntry) -> &[PageComponent] {
    match entry {
        ComponentEntry::Row(row) => &row.col,
        ComponentEntry::Single(component) => std::slice::from_ref(component),
    }
}

/// One line per component: ID, order, type and a text excerpt.
fn list_lines(api: &dyn ContentApi, sub_title_id: Id) -> Result<Vec<String>, CliError> {
    let components = api.admin_page_components(sub_title_id)?;
    let mut lines = Vec::new();
    if let Some(sub_title) = &components.sub_subject {
        lines.push(format!("{} ({})", sub_title.title, sub_title.id));
    }
    for entry in &components.page_components {
        let row = matches!(entry, ComponentEntry::Row(_));
        for component in cells(entry) {
            lines.push(format!(
                "{:>6}  #{:<3} {:<8}{} {}",
                component.id,
                component.order,
                component.component_type.as_deref().unwrap_or("?"),
                if row { " [row]" } else { "" },
                excerpt(component)
            ));
        }
    }
    Ok(lines)
}

fn excerpt(component: &PageComponent) -> String {
    if let Some(image) = component.image.as_deref().filter(|i| !i.is_empty()) {
        return image.to_owned();
    }
    let first_line = component.text().lines().next().unwrap_or_default();
    if first_line.chars().count() > EXCERPT_CHARS {
        let cut: String = first_line.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        first_line.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use folio_api::{ApiError, FormError, MockContentApi, Session, User};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(component_type: &str) -> ComponentFields {
        ComponentFields {
            sub_title_id: 100,
            component_type: component_type.to_owned(),
            description: String::new(),
            order: 1,
            row: false,
            special_class: String::new(),
            language: None,
            image: None,
        }
    }

    fn api() -> MockContentApi {
        MockContentApi::new()
            .with_subject(1, "Rust")
            .with_main_title(10, 1, "Basics")
            .with_sub_title(100, 10, "Install")
            .with_session(Session::new(User::default(), "key"))
    }

    #[test]
    fn test_row_flag() {
        let mut fields = fields("p");
        fields.row = true;
        assert_eq!(fields.into_form().unwrap().row_status, RowStatus::Row);
    }

    #[test]
    fn test_code_requires_language() {
        let mut fields = fields("code");
        fields.description = "fn main() {}".to_owned();
        let form = fields.into_form().unwrap();

        let result = api().create_component(&form);

        assert!(matches!(
            result,
            Err(ApiError::Form(FormError::Missing("language")))
        ));
    }

    #[test]
    fn test_create_then_list() {
        let api = api();
        let mut heading = fields("h2");
        heading.description =
            "Installing rustup on every platform you might be using today".to_owned();
        api.create_component(&heading.into_form().unwrap()).unwrap();

        let lines = list_lines(&api, 100).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Install (100)");
        assert!(lines[1].contains("h2"));
        assert!(lines[1].ends_with("Installing rustup on every platform you might be..."));
    }

    #[test]
    fn test_update_image_component_keeps_stored_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");
        std::fs::write(&path, b"png").unwrap();
        let api = api();
        let mut image = fields("image");
        image.image = Some(path);
        api.create_component(&image.into_form().unwrap()).unwrap();
        let entry = api.admin_page_components(100).unwrap().page_components[0].clone();
        let ComponentEntry::Single(created) = entry else {
            panic!("expected a single component");
        };

        let mut edit = fields("image");
        edit.order = 2;
        update(&api, created.id, &edit.into_form().unwrap()).unwrap();

        assert_eq!(
            api.mutations().last().map(String::as_str),
            Some(format!("update_component {}", created.id).as_str())
        );
    }
}
