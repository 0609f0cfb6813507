//! `folio serve` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use folio_api::HttpContentApi;
use folio_config::{CliSettings, Config, Environment};
use folio_server::{run_server, server_config_from_folio_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// API environment: local or production (overrides config).
    #[arg(long = "env", env = "FOLIO_ENV")]
    environment: Option<Environment>,

    /// Enable verbose output (request and API logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            environment: self.environment,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        ensure_project_dir(&config.project_dir)?;

        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content API: {} ({})",
            config.api.base_url(),
            config.api.environment
        ));
        if config.reader.sort_components {
            output.info("Component sorting: enabled");
        }

        // The reader only calls public endpoints.
        let api = Arc::new(HttpContentApi::from_config(&config.api));
        let server_config = server_config_from_folio_config(&config);
        run_server(server_config, api)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Ensure the `.folio/` project directory exists with a `.gitignore`.
pub(crate) fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)
        .map_err(|e| CliError::Server(format!("Failed to create project directory: {e}")))?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        // The directory holds the session file.
        let _ = std::fs::write(&gitignore_path, "# Automatically created by folio\n*\n");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_project_dir_writes_gitignore() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join(".folio");

        ensure_project_dir(&project_dir).unwrap();

        let gitignore = std::fs::read_to_string(project_dir.join(".gitignore")).unwrap();
        assert!(gitignore.ends_with("*\n"));
    }
}
