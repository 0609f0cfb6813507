//! Content browsing commands.
//!
//! `subjects`, `main-titles` and `sub-titles` walk the taxonomy through an
//! [`Explorer`], so each listing is the navigator's view after the same
//! selections a reader would make. `outline` and `render` show what the
//! reader server would serve for a subject and a sub title.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_api::{ContentApi, Id, ImageUrlResolver};
use folio_navigator::{Explorer, Level, SubjectOutline, TaxonomyNavigator};
use folio_renderer::{Document, RenderOptions};

use crate::context::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the subjects command.
#[derive(Args)]
pub(crate) struct SubjectsArgs {
    /// Only show subjects whose name contains this text.
    #[arg(short, long)]
    filter: Option<String>,

    #[command(flatten)]
    api: ApiArgs,
}

impl SubjectsArgs {
    /// Execute the subjects command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let context = self.api.context()?;
        let mut explorer = explorer(Arc::new(context.client()), context.images());
        explorer.load_subjects();
        if let Some(filter) = self.filter {
            explorer.set_filter(Level::Subjects, filter);
        }
        print_subjects(explorer.navigator(), &Output::new());
        Ok(())
    }
}

/// Arguments for the main-titles command.
#[derive(Args)]
pub(crate) struct MainTitlesArgs {
    /// Subject ID.
    subject_id: Id,

    /// Only show main titles containing this text.
    #[arg(short, long)]
    filter: Option<String>,

    #[command(flatten)]
    api: ApiArgs,
}

impl MainTitlesArgs {
    /// Execute the main-titles command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let context = self.api.context()?;
        let mut explorer = explorer(Arc::new(context.client()), context.images());
        walk(&mut explorer, &[self.subject_id])?;
        if let Some(filter) = self.filter {
            explorer.set_filter(Level::MainTitles, filter);
        }
        print_main_titles(explorer.navigator(), &Output::new());
        Ok(())
    }
}

/// Arguments for the sub-titles command.
#[derive(Args)]
pub(crate) struct SubTitlesArgs {
    /// Subject ID.
    subject_id: Id,

    /// Main title ID.
    main_title_id: Id,

    /// Only show sub titles containing this text.
    #[arg(short, long)]
    filter: Option<String>,

    #[command(flatten)]
    api: ApiArgs,
}

impl SubTitlesArgs {
    /// Execute the sub-titles command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let context = self.api.context()?;
        let mut explorer = explorer(Arc::new(context.client()), context.images());
        walk(&mut explorer, &[self.subject_id, self.main_title_id])?;
        if let Some(filter) = self.filter {
            explorer.set_filter(Level::SubTitles, filter);
        }
        print_sub_titles(explorer.navigator(), &Output::new());
        Ok(())
    }
}

fn explorer(api: Arc<dyn ContentApi>, images: ImageUrlResolver) -> Explorer {
    Explorer::new(api, images, RenderOptions::default())
}

/// Load subjects, then select each ID of `path` in turn.
///
/// Failed fetches leave a navigator error for the listing to print; an ID
/// that is not in the loaded list is an error.
fn walk(explorer: &mut Explorer, path: &[Id]) -> Result<(), CliError> {
    explorer.load_subjects();
    if let Some(&subject_id) = path.first() {
        explorer.select_subject(subject_id)?;
    }
    if let Some(&main_title_id) = path.get(1) {
        explorer.select_main_title(main_title_id)?;
    }
    Ok(())
}

fn print_subjects(navigator: &TaxonomyNavigator, output: &Output) {
    report_error(navigator, output);
    let subjects = navigator.visible_subjects();
    if subjects.is_empty() {
        output.warning("No subjects found.");
    }
    for subject in subjects {
        let status = if subject.publish_status.is_published() {
            String::new()
        } else {
            format!(" [{}]", subject.publish_status.as_str())
        };
        output.row(subject.id, &format!("{}{status}", subject.name));
    }
}

fn print_main_titles(navigator: &TaxonomyNavigator, output: &Output) {
    report_error(navigator, output);
    if let Some(subject) = navigator.selection().subject() {
        output.highlight(&subject.name);
    }
    let titles = navigator.visible_main_titles();
    if titles.is_empty() {
        output.warning("No main titles found.");
    }
    for title in titles {
        output.row(title.id, &title.title);
    }
}

fn print_sub_titles(navigator: &TaxonomyNavigator, output: &Output) {
    report_error(navigator, output);
    let selection = navigator.selection();
    if let (Some(subject), Some(main_title)) = (selection.subject(), selection.main_title()) {
        output.highlight(&format!("{} / {}", subject.name, main_title.title));
    }
    let titles = navigator.visible_sub_titles();
    if titles.is_empty() {
        output.warning("No sub titles found.");
    }
    for title in titles {
        output.row(title.id, &title.title);
    }
}

fn report_error(navigator: &TaxonomyNavigator, output: &Output) {
    if let Some(message) = navigator.error() {
        output.error(message);
    }
}

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Subject ID.
    subject_id: Id,

    /// Sub title to select instead of the default.
    #[arg(short, long)]
    sub_title: Option<Id>,

    /// Only show main titles or sub titles containing this text.
    #[arg(short, long)]
    filter: Option<String>,

    /// Print the outline as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    api: ApiArgs,
}

impl OutlineArgs {
    /// Execute the outline command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let context = self.api.context()?;
        let outline = load_outline(&context.client(), self.subject_id, self.sub_title)?;
        let output = Output::new();
        if self.json {
            let json = serde_json::to_string_pretty(&outline)?;
            output.data(&json);
        } else {
            for line in outline_lines(&outline, self.filter.as_deref().unwrap_or_default()) {
                output.data(&line);
            }
        }
        Ok(())
    }
}

fn load_outline(
    api: &dyn ContentApi,
    subject_id: Id,
    sub_title_id: Option<Id>,
) -> Result<SubjectOutline, CliError> {
    let detail = api.subject_detail(subject_id)?;
    let mut outline = SubjectOutline::from_detail(detail)?;
    if let Some(id) = sub_title_id {
        outline.select_sub_title(id)?;
    }
    Ok(outline)
}

/// Outline as indented text. `v` marks an expanded main title and `*` the
/// selected sub title.
fn outline_lines(outline: &SubjectOutline, filter: &str) -> Vec<String> {
    let mut outline = outline.clone();
    outline.set_filter(filter);

    let mut lines = vec![outline.subject().name.clone()];
    for main in outline.visible() {
        let expanded = outline.is_expanded(main.main_subject_id) || !filter.trim().is_empty();
        let marker = if expanded { "v" } else { ">" };
        lines.push(format!(
            "  {marker} {} ({})",
            main.main_subject_title, main.main_subject_id
        ));
        if !expanded {
            continue;
        }
        for sub in &main.sub_titles {
            let selected = outline.selected() == Some(sub.sub_subject_id);
            lines.push(format!(
                "    {} {} ({})",
                if selected { "*" } else { "-" },
                sub.sub_subject_title,
                sub.sub_subject_id
            ));
        }
    }
    if let Some(crumbs) = outline.breadcrumbs() {
        lines.push(String::new());
        lines.push(format!(
            "{} / {} / {}",
            crumbs.subject, crumbs.main_title, crumbs.sub_title
        ));
    }
    lines
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Sub title ID.
    sub_title_id: Id,

    /// Write the HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sort components by their order field before rendering.
    #[arg(long)]
    sort: bool,

    #[command(flatten)]
    api: ApiArgs,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let context = self.api.context()?;
        let output = Output::new();
        let document = render(
            &context.client(),
            self.sub_title_id,
            &context.images(),
            context.render_options(self.sort),
        );
        if let Some(message) = &document.error {
            output.warning(&format!("Components could not be loaded: {message}"));
        }
        let html = document.render_html();
        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!(
                    "Rendered {} blocks to {}",
                    document.block_count(),
                    path.display()
                ));
            }
            None => output.data(&html),
        }
        Ok(())
    }
}

/// Render a sub title. A 404 is an empty document; other failures become
/// the document's error notice.
fn render(
    api: &dyn ContentApi,
    sub_title_id: Id,
    images: &ImageUrlResolver,
    options: RenderOptions,
) -> Document {
    match api.page_components(sub_title_id) {
        Ok(entries) => Document::from_entries(&entries, images, options),
        Err(e) if e.is_not_found() => Document::default(),
        Err(e) => {
            tracing::warn!(error = %e, sub_title_id, "Failed to load page components");
            Document::failed(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_api::{ComponentEntry, MockContentApi, PageComponent};
    use folio_navigator::OutlineError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn paragraph(text: &str, order: u32) -> ComponentEntry {
        ComponentEntry::Single(PageComponent {
            component_type: Some("p".to_owned()),
            description: Some(text.to_owned()),
            order,
            ..Default::default()
        })
    }

    fn api() -> MockContentApi {
        MockContentApi::new()
            .with_subject(1, "Rust")
            .with_subject(2, "Go")
            .with_main_title(10, 1, "Basics")
            .with_main_title(11, 1, "Ownership")
            .with_sub_title(100, 10, "Install")
            .with_sub_title(110, 11, "Borrowing")
            .with_components(100, vec![paragraph("second", 2), paragraph("first", 1)])
    }

    fn images() -> ImageUrlResolver {
        ImageUrlResolver::new("http://localhost:3000/api")
    }

    #[test]
    fn test_walk_selects_path() {
        let mut explorer = explorer(Arc::new(api()), images());
        walk(&mut explorer, &[1, 11]).unwrap();

        let titles: Vec<&str> = explorer
            .navigator()
            .sub_titles()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Borrowing"]);
    }

    #[test]
    fn test_walk_rejects_main_title_of_other_subject() {
        let mut explorer = explorer(Arc::new(api().with_main_title(20, 2, "Goroutines")), images());
        assert!(matches!(
            walk(&mut explorer, &[1, 20]),
            Err(CliError::Explore(_))
        ));
    }

    #[test]
    fn test_outline_lines() {
        let outline = load_outline(&api(), 1, None).unwrap();

        assert_eq!(
            outline_lines(&outline, ""),
            vec![
                "Rust",
                "  v Basics (10)",
                "    * Install (100)",
                "  > Ownership (11)",
                "",
                "Rust / Basics / Install",
            ]
        );
    }

    #[test]
    fn test_outline_lines_filtered() {
        let outline = load_outline(&api(), 1, None).unwrap();
        assert_eq!(
            outline_lines(&outline, "borrow"),
            vec![
                "Rust",
                "  v Ownership (11)",
                "    - Borrowing (110)",
                "",
                "Rust / Basics / Install",
            ]
        );
    }

    #[test]
    fn test_outline_unknown_sub_title() {
        assert!(matches!(
            load_outline(&api(), 1, Some(999)),
            Err(CliError::Outline(OutlineError::UnknownSubTitle(999)))
        ));
    }

    #[test]
    fn test_render_keeps_server_order_unless_sorted() {
        let api = api();
        let unsorted = render(&api, 100, &images(), RenderOptions::default()).render_html();
        let sorted = render(&api, 100, &images(), RenderOptions { sort_by_order: true })
            .render_html();

        assert!(unsorted.find("second") < unsorted.find("first"));
        assert!(sorted.find("first") < sorted.find("second"));
    }

    #[test]
    fn test_render_unknown_sub_title_is_empty() {
        let document = render(&api(), 999, &images(), RenderOptions::default());
        assert!(document.is_empty());
        assert_eq!(document.error, None);
    }

    #[test]
    fn test_render_failure_sets_error() {
        let api = api().failing("page_components", 500);
        let document = render(&api, 100, &images(), RenderOptions::default());
        assert_eq!(document.error.as_deref(), Some("page_components failed"));
    }
}
