//! Core trait for the Bulletin configuration system
//!
//! Configuration is layered: defaults, then an optional TOML file, then
//! environment overrides, then validation.

use crate::errors::{BulletinError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Core trait for Bulletin configuration types
pub trait BulletinConfig: Clone + Default + DeserializeOwned + Send + Sync + 'static {
    /// Prefix of environment variables that override fields (e.g. `BULLETIN_`).
    const ENV_PREFIX: &'static str;

    /// Keys that may be overridden from the environment, lowercase.
    const ENV_KEYS: &'static [&'static str];

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file and validate it.
    ///
    /// Fields missing from the file keep their defaults when the implementing
    /// type is annotated with `#[serde(default)]`.
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BulletinError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge with process environment variables carrying [`Self::ENV_PREFIX`].
    fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge with an explicit set of `(NAME, value)` pairs.
    ///
    /// `PREFIX_SOME_FIELD=value` maps to key `some_field`. Only keys listed in
    /// [`Self::ENV_KEYS`] are read; other variables, prefixed or not, are
    /// left to whoever owns them.
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(Self::ENV_PREFIX) else {
                continue;
            };
            let key = key.to_lowercase();
            if Self::ENV_KEYS.contains(&key.as_str()) {
                self.set_from_string(&key, &value)?;
            }
        }
        Ok(())
    }

    /// Set a configuration value from a string (env and CLI overrides)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()>;

    /// Validate the configuration
    fn validate(&self) -> Result<()>;
}
