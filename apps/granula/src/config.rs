//! # Configuration
//!
//! Settings are read from an optional TOML file, then overridden by
//! environment variables:
//!
//! - `GRANULA_LOG_FORMAT`: `text` or `json`
//! - `GRANULA_CORS_ORIGINS`: comma-separated origins, or `*` for all
//! - `GRANULA_RATE_LIMIT`: requests per second (0 disables)
//! - `GRANULA_API_KEY`: enables Bearer authentication when non-empty
//!
//! ```toml
//! log_format = "json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! cors_origins = "https://dashboards.example.com"
//! rate_limit = 50
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default rate limit in requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated allowed origins, `*` for all. Localhost only when unset.
    pub cors_origins: Option<String>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Bearer token required on every endpoint but `/health`.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
            api_key: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_format: LogFormat,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration: file (if given), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Read a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse TOML configuration text.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        toml::from_str(contents).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Apply `GRANULA_*` overrides from a variable lookup.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("GRANULA_LOG_FORMAT") {
            match LogFormat::from_env_value(&value) {
                Some(format) => self.log_format = format,
                None => tracing::warn!(value = %value, "Ignoring unknown GRANULA_LOG_FORMAT"),
            }
        }
        if let Some(origins) = lookup("GRANULA_CORS_ORIGINS") {
            self.server.cors_origins = Some(origins);
        }
        if let Some(value) = lookup("GRANULA_RATE_LIMIT") {
            match value.trim().parse() {
                Ok(limit) => self.server.rate_limit = limit,
                Err(_) => tracing::warn!(value = %value, "Ignoring invalid GRANULA_RATE_LIMIT"),
            }
        }
        if let Some(key) = lookup("GRANULA_API_KEY") {
            self.server.api_key = Some(key);
        }
        self
    }

    /// The API key, if authentication is enabled.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.server.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

// =============================================================================
// TESTS
// =============================================================================
