//! Admin forms for creating and updating taxonomy records and components.
//!
//! Each form is validated before it is sent, with the same rules the admin
//! editors enforce: required text must be non-blank, orders must be
//! positive, and a component carries either text or an image, never both.

use std::path::Path;

use serde::Serialize;

use crate::types::{CodeLanguage, ComponentKind, Id, PublishStatus, RowStatus};

/// Form rejected before it was sent.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Required field is missing or blank.
    #[error("{0} is required")]
    Missing(&'static str),
    /// Order must be a positive integer.
    #[error("{0} must be greater than 0")]
    InvalidOrder(&'static str),
    /// Component type outside the supported set.
    #[error("unsupported component type '{0}'")]
    UnknownType(String),
    /// Language outside the supported set.
    #[error(transparent)]
    UnknownLanguage(#[from] crate::types::UnknownLanguage),
    /// Mutually exclusive fields were both set.
    #[error("{0}")]
    Conflict(&'static str),
}

/// Image file attached to a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent in the `Content-Disposition` header.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Raw bytes.
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, inferring the MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
        let content_type = content_type_for(path).to_owned();
        Ok(Self {
            filename,
            content_type,
            data,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// One part of a multipart form.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FormPart<'a> {
    Text(&'static str, String),
    File(&'static str, &'a ImageUpload),
}

fn require_text(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(())
}

fn require_order(order: u32, field: &'static str) -> Result<(), FormError> {
    if order == 0 {
        return Err(FormError::InvalidOrder(field));
    }
    Ok(())
}

/// Subject create/update form (sent as multipart).
#[derive(Clone, Debug, Default)]
pub struct SubjectForm {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Display order.
    pub order: u32,
    /// Optional cover image.
    pub image: Option<ImageUpload>,
}

impl SubjectForm {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), FormError> {
        require_text(&self.name, "subject name")?;
        require_text(&self.description, "subject description")?;
        require_order(self.order, "subject order")
    }

    pub(crate) fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts = vec![
            FormPart::Text("subjectName", self.name.clone()),
            FormPart::Text("subjectDescription", self.description.clone()),
            FormPart::Text("subjectOrder", self.order.to_string()),
        ];
        if let Some(image) = &self.image {
            parts.push(FormPart::File("image", image));
        }
        parts
    }
}

/// Main title create/update form (sent as JSON).
#[derive(Clone, Debug, Serialize)]
pub struct MainTitleForm {
    /// Owning subject.
    #[serde(rename = "subjectId")]
    pub subject_id: Id,
    /// Full title.
    #[serde(rename = "main_subject_title")]
    pub title: String,
    /// Abbreviated title.
    #[serde(rename = "main_subject_short_title")]
    pub short_title: String,
    /// Display order.
    #[serde(rename = "main_subject_title_order")]
    pub order: u32,
    /// Reader visibility.
    #[serde(rename = "publishStatus")]
    pub publish_status: PublishStatus,
}

impl MainTitleForm {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), FormError> {
        require_text(&self.title, "main title")?;
        require_text(&self.short_title, "main short title")?;
        require_order(self.order, "main title order")?;
        if self.subject_id == 0 {
            return Err(FormError::Missing("subject id"));
        }
        Ok(())
    }
}

/// Sub title create/update form (sent as JSON).
#[derive(Clone, Debug, Serialize)]
pub struct SubTitleForm {
    /// Owning main title.
    #[serde(rename = "main_subject_id")]
    pub main_title_id: Id,
    /// Full title.
    #[serde(rename = "sub_subject_title")]
    pub title: String,
    /// Abbreviated title.
    #[serde(rename = "sub_subject_short_title")]
    pub short_title: String,
    /// Display order.
    #[serde(rename = "sub_subject_title_order")]
    pub order: u32,
    /// Reader visibility.
    #[serde(rename = "publishStatus")]
    pub publish_status: PublishStatus,
}

impl SubTitleForm {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), FormError> {
        require_text(&self.title, "sub title")?;
        require_text(&self.short_title, "sub short title")?;
        require_order(self.order, "sub title order")?;
        if self.main_title_id == 0 {
            return Err(FormError::Missing("main title id"));
        }
        Ok(())
    }
}

/// Page component create/update form (sent as multipart).
#[derive(Clone, Debug, Default)]
pub struct PageComponentForm {
    /// Owning sub title.
    pub sub_title_id: Id,
    /// Type tag (`h1`, `p`, `code`, ...).
    pub component_type: String,
    /// Text content. Must be empty when an image is attached.
    pub description: String,
    /// Position within the sub title.
    pub order: u32,
    /// Layout hint.
    pub row_status: RowStatus,
    /// Extra CSS class hook.
    pub special_class: String,
    /// Highlighter language, required for `code`.
    pub language: Option<String>,
    /// Image file, required for new `image` components.
    pub image: Option<ImageUpload>,
}

impl PageComponentForm {
    /// Check the type-dependent required fields.
    ///
    /// `has_stored_image` is true when updating an `image` component that
    /// already has an image on the server, so no new upload is needed.
    pub fn validate(&self, has_stored_image: bool) -> Result<(), FormError> {
        if self.sub_title_id == 0 {
            return Err(FormError::Missing("sub title id"));
        }
        let kind = ComponentKind::from_tag(&self.component_type);
        if !kind.is_known() {
            return Err(FormError::UnknownType(self.component_type.clone()));
        }
        if self.image.is_some() && !self.description.trim().is_empty() {
            return Err(FormError::Conflict(
                "a component takes either a description or an image, not both",
            ));
        }
        if kind.uses_image() {
            if self.image.is_none() && !has_stored_image {
                return Err(FormError::Missing("image"));
            }
        } else {
            if self.image.is_some() {
                return Err(FormError::Conflict("only image components take an image"));
            }
            require_text(&self.description, "description")?;
        }
        if kind == ComponentKind::Code {
            let language = self
                .language
                .as_deref()
                .filter(|l| !l.is_empty())
                .ok_or(FormError::Missing("language"))?;
            language.parse::<CodeLanguage>()?;
        }
        Ok(())
    }

    pub(crate) fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts = vec![
            FormPart::Text("page_description", self.description.clone()),
            FormPart::Text("page_component_type", self.component_type.clone()),
            FormPart::Text("page_component_order", self.order.to_string()),
            FormPart::Text("row_status", self.row_status.as_str().to_owned()),
            FormPart::Text("special_class", self.special_class.clone()),
            FormPart::Text("sub_subject_id", self.sub_title_id.to_string()),
            FormPart::Text("language", self.language.clone().unwrap_or_default()),
        ];
        if let Some(image) = &self.image {
            parts.push(FormPart::File("page_component_image", image));
        }
        parts
    }
}
