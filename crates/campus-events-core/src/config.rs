//! Configuration management for the campus events client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "CAMPUS_EVENTS_API_URL";

/// Prefix for structured environment configuration (`CAMPUS_EVENTS__API__BASE_URL`)
pub const ENV_PREFIX: &str = "CAMPUS_EVENTS";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "campus-events";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the event service, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

/// Session persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted admin session
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".campus-events-session.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slashes removed
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Configured request timeout, if any
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from an explicit file (or the default one) and the environment
    ///
    /// An explicit file must exist; the default file is optional. When any
    /// source fails the defaults are used and the error is handed back for
    /// the caller to report. `CAMPUS_EVENTS_API_URL` applies either way.
    #[must_use]
    pub fn load_or_default(file: Option<&Path>) -> (Self, Option<crate::Error>) {
        Self::settle(Self::load_layers(file), std::env::var(API_URL_ENV).ok())
    }

    fn load_layers(file: Option<&Path>) -> crate::Result<Self> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Ok(config::Config::builder()
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?)
    }

    fn settle(
        layers: crate::Result<Self>,
        api_url: Option<String>,
    ) -> (Self, Option<crate::Error>) {
        let (config, error) = match layers {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        (config.with_api_url_override(api_url), error)
    }

    /// Apply the single documented base URL override
    ///
    /// Empty values are ignored, matching an unset variable.
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }
}
