//! Page component renderer.
//!
//! Turns the component entries of a sub title into reader HTML:
//!
//! 1. Entries are partitioned into display units: a row envelope becomes one
//!    horizontal [`DisplayUnit::Row`], every other component a standalone
//!    block.
//! 2. Each component is dispatched on its type tag into a [`Block`]. The set
//!    of blocks is closed and ends in [`Block::Fallback`], so an unknown or
//!    malformed component renders as a plain paragraph instead of failing.
//! 3. [`Document::render_html`] writes the units in order. Code blocks are
//!    highlighted on the server; see [`highlight`].
//!
//! Server order is kept unless [`RenderOptions::sort_by_order`] is set.
//!
//! # Example
//!
//! ```ignore
//! use folio_renderer::{Document, RenderOptions};
//!
//! let entries = api.page_components(sub_title_id)?;
//! let html = Document::from_entries(&entries, &images, RenderOptions::default()).render_html();
//! ```

mod block;
mod document;
pub mod highlight;
mod html;
mod util;

pub use block::{Block, embed_url, list_items};
pub use document::{DisplayUnit, Document, EMPTY_MESSAGE, RenderOptions, partition};
pub use highlight::{HighlightError, theme_css};
pub use html::{
    COPIED_LABEL, COPY_CONFIRMATION, COPY_LABEL, IMAGE_ALT, VIDEO_ALLOW, VIDEO_TITLE, write_block,
    write_row,
};
pub use util::escape_html;
