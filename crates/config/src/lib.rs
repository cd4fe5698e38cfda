#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for safely
//!
//! Configuration is read from a TOML file (`~/.config/safely/config.toml`
//! unless a path is given) and then handed explicitly to the network client
//! and the operations context. Nothing is read from process globals unless
//! the caller asks for it with [`Config::merge_env`].

use safely_errors::{ConfigError, Error};
use safely_types::{Credentials, ExistingOutput};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

/// API endpoint and key pair
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
}

/// Download destination and output policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub existing: ExistingOutput,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            existing: ExistingOutput::default(),
        }
    }
}

fn default_timeout() -> u64 {
    300 // 5 minutes
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl NetworkConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("safely").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error if it exists but cannot be read, and `ConfigError::ParseError`
    /// for invalid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Fill unset `[api]` fields from `SAFELY_HOST`, `SAFELY_API_KEY` and
    /// `SAFELY_API_SECRET`. Values in the file win.
    pub fn merge_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            ("SAFELY_HOST", &mut self.api.host),
            ("SAFELY_API_KEY", &mut self.api.api_key),
            ("SAFELY_API_SECRET", &mut self.api.api_secret),
        ];
        for (name, slot) in fields {
            if slot.is_none() {
                *slot = lookup(name).filter(|v| !v.is_empty());
            }
        }
    }

    /// Build credentials from the `[api]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first absent or empty
    /// field, or `ConfigError::InvalidValue` if the host is not http(s).
    pub fn credentials(&self) -> Result<Credentials, Error> {
        let host = required(self.api.host.as_deref(), "api.host")?;
        let api_key = required(self.api.api_key.as_deref(), "api.api_key")?;
        let api_secret = required(self.api.api_secret.as_deref(), "api.api_secret")?;

        if !(host.starts_with("https://") || host.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.host".to_string(),
                value: host.to_string(),
            }
            .into());
        }

        Ok(Credentials::new(host, api_key, api_secret))
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField {
            field: field.to_string(),
        }),
    }
}
