//! Page component records.
//!
//! Components arrive as a flat array in which each element is either a
//! single [`PageComponent`] or a server-assembled [`RowEnvelope`]. Decoding
//! is lenient: every field of a component has a default, and `null` or
//! wrongly typed values decode as that default, so a malformed record still
//! reaches the renderer (which degrades it to a plain paragraph) instead of
//! failing the whole page. Elements that are not records at all are skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient;
use super::taxonomy::Id;

/// Component type tag as stored by the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    /// `h1`..`h5`, carrying the level (1-5).
    Heading(u8),
    /// `p`
    Paragraph,
    /// `image`
    Image,
    /// `youtube`
    Youtube,
    /// `code`
    Code,
    /// `ol`
    OrderedList,
    /// `ul`
    UnorderedList,
    /// Any other tag, kept verbatim.
    Unknown(String),
}

impl ComponentKind {
    /// All tags the renderer understands, in the order the editor offers them.
    pub const KNOWN_TAGS: [&'static str; 11] = [
        "h1", "h2", "h3", "h4", "h5", "p", "image", "youtube", "code", "ol", "ul",
    ];

    /// Parse a stored tag. Never fails; unrecognized tags become [`ComponentKind::Unknown`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "p" => Self::Paragraph,
            "image" => Self::Image,
            "youtube" => Self::Youtube,
            "code" => Self::Code,
            "ol" => Self::OrderedList,
            "ul" => Self::UnorderedList,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Whether the tag is one of [`Self::KNOWN_TAGS`].
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Whether this type reads its content from the image reference.
    #[must_use]
    pub fn uses_image(&self) -> bool {
        matches!(self, Self::Image)
    }
}

/// Syntax highlighter language accepted for `code` components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeLanguage {
    Apache,
    Bash,
    C,
    Cpp,
    Csharp,
    Css,
    Diff,
    Dockerfile,
    Go,
    Ini,
    Java,
    Javascript,
    Json,
    Kotlin,
    Less,
    Lua,
    Makefile,
    Markdown,
    Nginx,
    Objectivec,
    Php,
    Python,
    Ruby,
    Rust,
    Scss,
    Shell,
    Sql,
    Swift,
    Typescript,
    Xml,
    Yaml,
}

impl CodeLanguage {
    /// Every supported language.
    pub const ALL: [Self; 31] = [
        Self::Apache,
        Self::Bash,
        Self::C,
        Self::Cpp,
        Self::Csharp,
        Self::Css,
        Self::Diff,
        Self::Dockerfile,
        Self::Go,
        Self::Ini,
        Self::Java,
        Self::Javascript,
        Self::Json,
        Self::Kotlin,
        Self::Less,
        Self::Lua,
        Self::Makefile,
        Self::Markdown,
        Self::Nginx,
        Self::Objectivec,
        Self::Php,
        Self::Python,
        Self::Ruby,
        Self::Rust,
        Self::Scss,
        Self::Shell,
        Self::Sql,
        Self::Swift,
        Self::Typescript,
        Self::Xml,
        Self::Yaml,
    ];

    /// Highlighter identifier (also the wire value).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apache => "apache",
            Self::Bash => "bash",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Csharp => "csharp",
            Self::Css => "css",
            Self::Diff => "diff",
            Self::Dockerfile => "dockerfile",
            Self::Go => "go",
            Self::Ini => "ini",
            Self::Java => "java",
            Self::Javascript => "javascript",
            Self::Json => "json",
            Self::Kotlin => "kotlin",
            Self::Less => "less",
            Self::Lua => "lua",
            Self::Makefile => "makefile",
            Self::Markdown => "markdown",
            Self::Nginx => "nginx",
            Self::Objectivec => "objectivec",
            Self::Php => "php",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::Scss => "scss",
            Self::Shell => "shell",
            Self::Sql => "sql",
            Self::Swift => "swift",
            Self::Typescript => "typescript",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
        }
    }

    /// Label shown above a code block.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a language identifier outside [`CodeLanguage::ALL`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported code language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for CodeLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

/// Layout hint for a component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// Part of a horizontal row.
    Row,
    /// Full-width standalone block. Unknown values decode here.
    #[default]
    #[serde(other)]
    Separate,
}

impl RowStatus {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Separate => "separate",
        }
    }
}

/// A single typed content block of a sub title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageComponent {
    /// Component ID.
    #[serde(rename = "page_component_id", default, deserialize_with = "lenient::number")]
    pub id: Id,
    /// Owning sub title.
    #[serde(rename = "sub_subject_id", default, deserialize_with = "lenient::number")]
    pub sub_title_id: Id,
    /// Raw type tag; see [`PageComponent::kind`].
    #[serde(rename = "page_component_type", default, deserialize_with = "lenient::text")]
    pub component_type: Option<String>,
    /// Text, newline-separated list items, source code or video URL.
    #[serde(rename = "page_description", default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    /// Position within the sub title.
    #[serde(rename = "page_component_order", default, deserialize_with = "lenient::number")]
    pub order: u32,
    /// Layout hint.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub row_status: RowStatus,
    /// Extra CSS class hook.
    #[serde(default, deserialize_with = "lenient::text")]
    pub special_class: Option<String>,
    /// Relative image reference for `image` components.
    #[serde(rename = "page_component_image", default, deserialize_with = "lenient::text")]
    pub image: Option<String>,
    /// Highlighter language for `code` components.
    #[serde(default, deserialize_with = "lenient::text")]
    pub language: Option<String>,
}

impl PageComponent {
    /// Parsed type tag.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        ComponentKind::from_tag(self.component_type.as_deref().unwrap_or_default())
    }

    /// Description text, empty when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// CSS class hook, empty when absent.
    #[must_use]
    pub fn class(&self) -> &str {
        self.special_class.as_deref().unwrap_or_default()
    }
}

/// Components the server groups into one horizontal row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RowEnvelope {
    /// Always [`RowStatus::Row`] on the wire.
    #[serde(default = "row_status_row")]
    pub row_status: RowStatus,
    /// Cells, left to right.
    #[serde(deserialize_with = "lenient::elements")]
    pub col: Vec<PageComponent>,
}

fn row_status_row() -> RowStatus {
    RowStatus::Row
}

/// One element of the `pageComponents` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ComponentEntry {
    /// Server-assembled row.
    Row(RowEnvelope),
    /// Standalone component.
    Single(PageComponent),
}

impl ComponentEntry {
    /// Order key for opt-in sorting. Rows sort by their first cell.
    #[must_use]
    pub fn order(&self) -> u32 {
        match self {
            Self::Row(row) => row.col.first().map_or(0, |c| c.order),
            Self::Single(component) => component.order,
        }
    }
}

/// Response of the reader components endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsResponse {
    /// Components in server order.
    #[serde(default, deserialize_with = "lenient::elements")]
    pub page_components: Vec<ComponentEntry>,
}
