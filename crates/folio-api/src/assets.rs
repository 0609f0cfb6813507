//! Image reference resolution.

/// Turns relative image references into absolute URLs.
///
/// References are stored relative to the API base URL of the active
/// environment. Absolute (`http://`, `https://`, protocol-relative) and
/// `data:` references are returned unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUrlResolver {
    base_url: String,
}

impl ImageUrlResolver {
    /// Resolver rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Resolver for the configured environment.
    #[must_use]
    pub fn from_config(config: &folio_config::ApiConfig) -> Self {
        Self::new(config.base_url())
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `reference`.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with("//")
            || reference.starts_with("data:")
        {
            return reference.to_owned();
        }
        if reference.starts_with('/') {
            format!("{}{reference}", self.base_url)
        } else {
            format!("{}/{reference}", self.base_url)
        }
    }
}
