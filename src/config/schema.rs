use crate::error::{NtientError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "NTIENT_TOKEN";
/// Environment variable holding the API host
pub const HOST_ENV: &str = "NTIENT_HOST";
/// Production API host
pub const DEFAULT_HOST: &str = "https://api.ntient.ai/api";

/// Connection settings injected into [`crate::Api`]
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub token: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("token", &"***")
            .finish()
    }
}

impl Config {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
        }
    }

    /// Build config from `NTIENT_TOKEN` and `NTIENT_HOST`
    ///
    /// The host falls back to [`DEFAULT_HOST`]; the token is required.
    pub fn from_env() -> Result<Self> {
        let token = env_value(TOKEN_ENV).ok_or_else(|| {
            NtientError::Config(format!(
                "Environment variable {TOKEN_ENV} not found.\n\nTroubleshooting:\n- Export {TOKEN_ENV} with the token from the application home page\n- Or call ntient::config::init_interactive() before creating a client"
            ))
        })?;
        let host = env_value(HOST_ENV).unwrap_or_else(default_host);

        Ok(Self { host, token })
    }

    /// Load config from the user config file, with environment overrides
    ///
    /// Reads `ntient/config.toml` under the platform config directory when it
    /// exists. `NTIENT_TOKEN` and `NTIENT_HOST` take precedence over the file.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::new(DEFAULT_HOST, ""),
        };

        if let Some(token) = env_value(TOKEN_ENV) {
            config.token = token;
        }
        if let Some(host) = env_value(HOST_ENV) {
            config.host = host;
        }

        if config.token.is_empty() {
            return Err(NtientError::Config(format!(
                "No API token configured. Set {TOKEN_ENV} or add `token` to the config file"
            )));
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            NtientError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Base URL for all resources of an organization
    #[must_use]
    pub fn base_url(&self, organization: &str) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            format!("{host}/{organization}")
        } else {
            format!("https://{host}/{organization}")
        }
    }
}

/// Location of the user config file, if a config directory exists
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ntient").join("config.toml"))
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
