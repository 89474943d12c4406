//! Application configuration
//!
//! Layered the usual way: defaults, optional TOML file, `BULLETIN_*`
//! environment overrides, then validation.
//!
//! ```toml
//! api_base_url = "http://localhost:3000"
//! request_timeout_ms = 10000
//! notification_delay_ms = 5000
//! notification_message = "New post added!"
//! ```

use bulletin_core::{BulletinConfig, BulletinError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default toast lifetime.
pub const DEFAULT_NOTIFICATION_DELAY_MS: u64 = 5_000;

/// Default toast text for a created post.
pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "New post added!";

/// Configuration for the application core and its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the posts API
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout_ms: u64,
    /// How long a post-created toast stays visible
    pub notification_delay_ms: u64,
    /// Text of the post-created toast
    pub notification_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            notification_delay_ms: DEFAULT_NOTIFICATION_DELAY_MS,
            notification_message: DEFAULT_NOTIFICATION_MESSAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, optionally overlaid with `path`, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::defaults(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Toast lifetime.
    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| BulletinError::config(format!("{key}: expected milliseconds, got {value:?}: {e}")))
}

impl BulletinConfig for AppConfig {
    const ENV_PREFIX: &'static str = "BULLETIN_";
    const ENV_KEYS: &'static [&'static str] = &[
        "api_base_url",
        "request_timeout_ms",
        "notification_delay_ms",
        "notification_message",
    ];

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base_url" => self.api_base_url = value.to_string(),
            "request_timeout_ms" => self.request_timeout_ms = parse_millis(key, value)?,
            "notification_delay_ms" => self.notification_delay_ms = parse_millis(key, value)?,
            "notification_message" => self.notification_message = value.to_string(),
            _ => {
                return Err(BulletinError::config(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(BulletinError::config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(BulletinError::config("request_timeout_ms must be positive"));
        }
        if self.notification_delay_ms == 0 {
            return Err(BulletinError::config("notification_delay_ms must be positive"));
        }
        if self.notification_message.trim().is_empty() {
            return Err(BulletinError::config("notification_message must not be empty"));
        }
        Ok(())
    }
}
