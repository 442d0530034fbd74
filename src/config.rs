//! Configuration management for the demo server.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8080`.
//! - `TASKS_PATH` - Optional. JSON task dataset to serve instead of the bundled one.
//! - `SESSION_COOKIE` - Optional. Name of the session cookie. Defaults to `SESSION`.
//! - `SESSION_IDLE_TIMEOUT_SECS` - Optional. Idle seconds before a form session is
//!   forgotten. Defaults to `1800`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Task dataset override; `None` serves the bundled dataset
    pub tasks_path: Option<PathBuf>,

    /// Cookie carrying the session id
    pub session_cookie: String,

    /// How long an untouched form session survives
    pub session_idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            tasks_path: None,
            session_cookie: "SESSION".to_string(),
            session_idle_timeout: Duration::from_secs(1800),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` or `SESSION_IDLE_TIMEOUT_SECS`
    /// do not parse, or if `SESSION_COOKIE` is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?,
            None => defaults.port,
        };

        let tasks_path = lookup("TASKS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let session_cookie = match lookup("SESSION_COOKIE") {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "SESSION_COOKIE".to_string(),
                    "cookie name must not be empty".to_string(),
                ));
            }
            Some(name) => name.trim().to_string(),
            None => defaults.session_cookie,
        };

        let session_idle_timeout = match lookup("SESSION_IDLE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|e| {
                    ConfigError::InvalidValue(
                        "SESSION_IDLE_TIMEOUT_SECS".to_string(),
                        format!("{}", e),
                    )
                })?,
            None => defaults.session_idle_timeout,
        };

        Ok(Self {
            host,
            port,
            tasks_path,
            session_cookie,
            session_idle_timeout,
        })
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
