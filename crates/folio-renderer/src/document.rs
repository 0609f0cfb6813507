//! Rendered sub title content.

use folio_api::{ComponentEntry, ImageUrlResolver};

use crate::block::Block;
use crate::html::{write_block, write_row};
use crate::util::escape_html;

/// Text shown for a sub title without components.
pub const EMPTY_MESSAGE: &str = "No content has been added to this section yet.";

/// Display unit: a standalone block or a horizontal row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayUnit {
    /// Cells of a row envelope, left to right.
    Row(Vec<Block>),
    /// Standalone block.
    Single(Block),
}

/// Rendering options.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Stable-sort entries (and row cells) by their order field.
    ///
    /// Off by default: the server's order is authoritative.
    pub sort_by_order: bool,
}

/// Partition component entries into display units, preserving order.
#[must_use]
pub fn partition(entries: &[ComponentEntry], images: &ImageUrlResolver) -> Vec<DisplayUnit> {
    entries
        .iter()
        .map(|entry| match entry {
            ComponentEntry::Row(row) => DisplayUnit::Row(
                row.col
                    .iter()
                    .map(|cell| Block::from_component(cell, images))
                    .collect(),
            ),
            ComponentEntry::Single(component) => {
                DisplayUnit::Single(Block::from_component(component, images))
            }
        })
        .collect()
}

/// The rendered content of one sub title.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Display units in render order.
    pub units: Vec<DisplayUnit>,
    /// Inline error notice when the components could not be fetched.
    pub error: Option<String>,
}

impl Document {
    /// Build a document from fetched entries.
    #[must_use]
    pub fn from_entries(
        entries: &[ComponentEntry],
        images: &ImageUrlResolver,
        options: RenderOptions,
    ) -> Self {
        let units = if options.sort_by_order {
            let mut sorted = entries.to_vec();
            sorted.sort_by_key(ComponentEntry::order);
            for entry in &mut sorted {
                if let ComponentEntry::Row(row) = entry {
                    row.col.sort_by_key(|cell| cell.order);
                }
            }
            partition(&sorted, images)
        } else {
            partition(entries, images)
        };
        Self { units, error: None }
    }

    /// Empty document carrying an error notice.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            units: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Whether there is nothing to show besides a possible notice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of blocks, counting each row cell.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.units
            .iter()
            .map(|unit| match unit {
                DisplayUnit::Row(cells) => cells.len(),
                DisplayUnit::Single(_) => 1,
            })
            .sum()
    }

    /// Render to an HTML fragment.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        if let Some(message) = &self.error {
            out.push_str(r#"<div class="notice notice-error" role="alert">"#);
            out.push_str(&escape_html(message));
            out.push_str("</div>");
            return out;
        }
        if self.units.is_empty() {
            out.push_str(r#"<p class="empty-state">"#);
            out.push_str(EMPTY_MESSAGE);
            out.push_str("</p>");
            return out;
        }
        for unit in &self.units {
            match unit {
                DisplayUnit::Row(cells) => write_row(cells, &mut out),
                DisplayUnit::Single(block) => {
                    out.push_str(r#"<div class="block">"#);
                    write_block(block, &mut out);
                    out.push_str("</div>");
                }
            }
        }
        out
    }
}
