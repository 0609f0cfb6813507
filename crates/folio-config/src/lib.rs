//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `api.local_url`
//! - `api.production_url`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the API environment.
    pub environment: Option<Environment>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Project data directory, created next to the config file.
const PROJECT_DIRNAME: &str = ".folio";

/// Session file inside the project directory.
const SESSION_FILENAME: &str = "session.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content API configuration.
    pub api: ApiConfig,
    /// Reader server configuration.
    pub server: ServerConfig,
    /// Reader rendering options.
    pub reader: ReaderConfig,

    /// Project directory for folio data (`.folio/`, set after loading).
    #[serde(skip)]
    pub project_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Named API environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development API on localhost.
    #[default]
    Local,
    /// Hosted production API.
    Production,
}

impl Environment {
    /// Lowercase name as used in `folio.toml`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "production" | "web" => Ok(Self::Production),
            other => Err(ConfigError::Validation(format!(
                "unknown environment '{other}' (expected 'local' or 'production')"
            ))),
        }
    }
}

/// Which login endpoint the CLI authenticates against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginRole {
    /// Administrator login.
    #[default]
    Admin,
    /// Reader login.
    Reader,
}

impl FromStr for LoginRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "reader" => Ok(Self::Reader),
            other => Err(ConfigError::Validation(format!(
                "unknown login role '{other}' (expected 'admin' or 'reader')"
            ))),
        }
    }
}

/// Content API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Active environment.
    pub environment: Environment,
    /// Base URL used for [`Environment::Local`].
    pub local_url: String,
    /// Base URL used for [`Environment::Production`].
    pub production_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Default login role.
    pub login_role: LoginRole,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            local_url: "http://localhost:3000/api".to_owned(),
            production_url: "https://api.kaaryaalaya.com/api".to_owned(),
            timeout_secs: 30,
            login_role: LoginRole::Admin,
        }
    }
}

impl ApiConfig {
    /// Base URL of the active environment, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        let url = match self.environment {
            Environment::Local => &self.local_url,
            Environment::Production => &self.production_url,
        };
        url.trim_end_matches('/')
    }
}

/// Reader server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Reader rendering options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Sort page components by their `order` field before rendering.
    ///
    /// Off by default: components are rendered in the order the API returns.
    pub sort_components: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.production_url`").
        field: String,
        /// Error message (e.g., "${`FOLIO_API`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Path of the persisted session file.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.project_dir.join(SESSION_FILENAME)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(environment) = settings.environment {
            self.api.environment = environment;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            api: ApiConfig::default(),
            server: ServerConfig::default(),
            reader: ReaderConfig::default(),
            project_dir: base.join(PROJECT_DIRNAME),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.project_dir = config_dir.join(PROJECT_DIRNAME);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.api.local_url, "api.local_url")?;
        require_http_url(&self.api.local_url, "api.local_url")?;
        require_non_empty(&self.api.production_url, "api.production_url")?;
        require_http_url(&self.api.production_url, "api.production_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.api.local_url = expand::expand_env(&self.api.local_url, "api.local_url")?;
        self.api.production_url =
            expand::expand_env(&self.api.production_url, "api.production_url")?;
        Ok(())
    }
}
