//! Configuration and client setup shared by API-backed commands.

use std::path::PathBuf;

use clap::Args;
use folio_api::{HttpContentApi, ImageUrlResolver, SessionStore};
use folio_config::{CliSettings, Config, Environment};
use folio_renderer::RenderOptions;

use crate::error::CliError;

/// Arguments selecting the config file and API environment.
#[derive(Args, Debug, Default)]
pub(crate) struct ApiArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API environment: local or production (overrides config).
    #[arg(long = "env", env = "FOLIO_ENV")]
    environment: Option<Environment>,
}

impl ApiArgs {
    /// Load configuration with the environment override applied.
    pub(crate) fn context(&self) -> Result<Context, CliError> {
        let settings = CliSettings {
            environment: self.environment,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        Ok(Context::new(config))
    }
}

/// Loaded configuration plus the session store it points at.
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) store: SessionStore,
}

impl Context {
    pub(crate) fn new(config: Config) -> Self {
        let store = SessionStore::new(config.session_path());
        Self { config, store }
    }

    /// Client without credentials.
    pub(crate) fn client(&self) -> HttpContentApi {
        HttpContentApi::from_config(&self.config.api)
    }

    /// Client carrying the stored session, if any.
    pub(crate) fn authorized_client(&self) -> HttpContentApi {
        let session = self.store.load();
        if session.is_none() {
            tracing::debug!(path = %self.store.path().display(), "No stored session");
        }
        self.client().with_session(session)
    }

    pub(crate) fn images(&self) -> ImageUrlResolver {
        ImageUrlResolver::from_config(&self.config.api)
    }

    pub(crate) fn render_options(&self, sort: bool) -> RenderOptions {
        RenderOptions {
            sort_by_order: sort || self.config.reader.sort_components,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_session_store_lives_in_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.project_dir = dir.path().join(".folio");

        let context = Context::new(config);

        assert_eq!(context.store.path(), dir.path().join(".folio/session.json"));
        assert!(context.authorized_client().session().is_none());
    }

    #[test]
    fn test_render_options_merge_config() {
        let mut config = Config::default();
        config.reader.sort_components = true;
        let context = Context::new(config);

        assert!(context.render_options(false).sort_by_order);
    }
}
