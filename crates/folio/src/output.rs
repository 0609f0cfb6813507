//! Terminal output for CLI commands.
//!
//! Status messages go to stderr; command results (listings, outlines,
//! rendered HTML) go to stdout so they can be piped.

use console::{Style, Term};

pub(crate) struct Output {
    status: Term,
    results: Term,
    success: Style,
    warning: Style,
    error: Style,
    highlight: Style,
    id: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            highlight: Style::new().cyan().bold(),
            id: Style::new().dim(),
        }
    }

    // Write failures (closed pipe, detached terminal) are not actionable.
    fn status_line(&self, style: Option<&Style>, msg: &str) {
        let line = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.status.write_line(&line);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(Some(&self.success), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(Some(&self.warning), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(Some(&self.error), msg);
    }

    /// Section heading, e.g. the subject name above its outline.
    pub(crate) fn highlight(&self, msg: &str) {
        self.status_line(Some(&self.highlight), msg);
    }

    /// Listing row: right-aligned dimmed ID, then the label.
    pub(crate) fn row(&self, id: u64, label: &str) {
        let id = self.id.apply_to(format!("{id:>6}"));
        let _ = self.results.write_line(&format!("{id}  {label}"));
    }

    /// Raw result text.
    pub(crate) fn data(&self, text: &str) {
        let _ = self.results.write_line(text);
    }
}
