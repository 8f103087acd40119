//! Client configuration.
//!
//! Layered with figment. Sources, highest priority first:
//! 1. An explicit override (the `--api-url` flag)
//! 2. `HINDSIGHT_API_URL`
//! 3. `config.toml` in the data directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Default backend API root.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Directory under the home directory used when none is given.
pub const DEFAULT_DATA_DIR_NAME: &str = ".hindsight";

const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.json";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:5000/api`. No trailing slash.
    pub api_url: String,
    /// Where `config.toml` and `session.json` live.
    pub data_dir: PathBuf,
}

/// Settings read from the layered sources.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration with defaults for everything but the data directory.
    pub fn new(api_url: &str, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the configuration from overrides, the config file and defaults.
    pub fn load(api_url: Option<String>, data_dir: Option<PathBuf>) -> ClientResult<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let settings: Settings = figment(&data_dir.join(CONFIG_FILE_NAME), api_url)
            .extract()
            .map_err(|e| ClientError::config(e.to_string()))?;
        let api_url = settings.api_url;

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ClientError::config(format!(
                "api_url must be an http(s) URL, got '{api_url}'"
            )));
        }

        tracing::debug!(
            api_url = %api_url,
            data_dir = %data_dir.display(),
            "configuration resolved"
        );
        Ok(Self::new(&api_url, data_dir))
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE_NAME)
    }

    /// `<api_url>/users`
    pub fn users_url(&self) -> String {
        format!("{}/users", self.api_url)
    }

    /// `<api_url>/decisions`
    pub fn decisions_url(&self) -> String {
        format!("{}/decisions", self.api_url)
    }
}

/// `~/.hindsight`
pub fn default_data_dir() -> ClientResult<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_DATA_DIR_NAME))
        .ok_or_else(|| ClientError::config("home directory not found; pass --data-dir"))
}

/// Provider chain: defaults, then the config file, then the environment,
/// then the explicit override.
fn figment(config_path: &Path, api_url: Option<String>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if config_path.exists() {
        figment = figment.merge(Toml::file(config_path));
    }
    figment = figment.merge(Env::prefixed("HINDSIGHT_").only(&["api_url"]));
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        figment = figment.merge(Serialized::default("api_url", url));
    }
    figment
}
