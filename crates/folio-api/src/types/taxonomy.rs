//! Subject, main title and sub title records.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the content API.
pub type Id = u64;

/// Visibility of a taxonomy node in the reader view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    /// Visible to readers.
    Publish,
    /// Hidden from readers. Unknown values decode here.
    #[default]
    #[serde(other)]
    Onhold,
}

impl PublishStatus {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Onhold => "onhold",
        }
    }

    /// Whether the node is visible in the reader view.
    #[must_use]
    pub fn is_published(self) -> bool {
        self == Self::Publish
    }
}

/// Root of the taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    /// Subject ID.
    #[serde(rename = "subjectId")]
    pub id: Id,
    /// Display name.
    #[serde(rename = "subjectName", default)]
    pub name: String,
    /// Short description shown on the catalogue card.
    #[serde(rename = "subjectDescription", default)]
    pub description: String,
    /// Relative image reference.
    #[serde(rename = "subjectImage", default)]
    pub image: Option<String>,
    /// Display order.
    #[serde(rename = "subjectOrder", default)]
    pub order: u32,
    /// Reader visibility.
    #[serde(rename = "publishStatus", default)]
    pub publish_status: PublishStatus,
}

/// Second-level node, owned by a [`Subject`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MainTitle {
    /// Main title ID.
    #[serde(rename = "main_subject_id")]
    pub id: Id,
    /// Owning subject.
    #[serde(rename = "subjectId", default)]
    pub subject_id: Id,
    /// Full title.
    #[serde(rename = "main_subject_title", default)]
    pub title: String,
    /// Abbreviated title.
    #[serde(rename = "main_subject_short_title", default)]
    pub short_title: String,
    /// Display order. Positive, not necessarily unique.
    #[serde(rename = "main_subject_title_order", default)]
    pub order: u32,
    /// Reader visibility.
    #[serde(rename = "publishStatus", default)]
    pub publish_status: PublishStatus,
}

/// Third-level node, owned by a [`MainTitle`]. Page components hang off it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubTitle {
    /// Sub title ID.
    #[serde(rename = "sub_subject_id")]
    pub id: Id,
    /// Owning main title.
    #[serde(rename = "main_subject_id", default)]
    pub main_title_id: Id,
    /// Full title.
    #[serde(rename = "sub_subject_title", default)]
    pub title: String,
    /// Abbreviated title.
    #[serde(rename = "sub_subject_short_title", default)]
    pub short_title: String,
    /// Display order.
    #[serde(rename = "sub_subject_title_order", default)]
    pub order: u32,
    /// Reader visibility.
    #[serde(rename = "publishStatus", default)]
    pub publish_status: PublishStatus,
}

/// Records with a human-readable title used for list filtering.
pub trait Titled {
    /// Title text matched by list filters.
    fn title(&self) -> &str;
}

impl Titled for Subject {
    fn title(&self) -> &str {
        &self.name
    }
}

impl Titled for MainTitle {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for SubTitle {
    fn title(&self) -> &str {
        &self.title
    }
}
