//! Configuration loader
//!
//! Load a [`RunnerConfig`] from YAML and layer environment overrides on top.

use std::path::Path;

use super::RunnerConfig;

pub const ENV_BASE_URL: &str = "INVENTORY_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "INVENTORY_TIMEOUT_MS";
pub const ENV_USERNAME: &str = "INVENTORY_USERNAME";
pub const ENV_PASSWORD: &str = "INVENTORY_PASSWORD";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
            file: path.display().to_string(),
            error: e,
        })?;
        Ok(config)
    }

    /// Apply `INVENTORY_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), LoadError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.web.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.web.timeout = raw.trim().parse().map_err(|_| LoadError::InvalidValue {
                key: ENV_TIMEOUT_MS.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.credentials.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.credentials.password = password;
        }
        Ok(())
    }
}
