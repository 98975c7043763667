use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::constants::{
    tenant_base_url, DEFAULT_GROUP_NAME, DEFAULT_OUTPUT_PATH, DEFAULT_SNAPSHOT_PATH,
    DEFAULT_TIMEOUT_SECONDS, ENV_SUBDOMAIN, ENV_TOKEN,
};
use crate::error::{ExportError, Result};
use crate::pipeline::processing::mapper::SecondPhone;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repairshopr: RepairShoprConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Clone, Deserialize)]
pub struct RepairShoprConfig {
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub token: String,
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_group_name")]
    pub group_name: String,
    #[serde(default)]
    pub second_phone: SecondPhone,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_group_name() -> String {
    DEFAULT_GROUP_NAME.to_string()
}

fn default_snapshot_path() -> String {
    DEFAULT_SNAPSHOT_PATH.to_string()
}

impl Default for RepairShoprConfig {
    fn default() -> Self {
        Self {
            subdomain: String::new(),
            token: String::new(),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            group_name: default_group_name(),
            second_phone: SecondPhone::default(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

// Keep the bearer token out of logs.
impl fmt::Debug for RepairShoprConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepairShoprConfig")
            .field("subdomain", &self.subdomain)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl RepairShoprConfig {
    fn base_url_override(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// Tenant URL, or the configured override with any trailing slash removed.
    pub fn base_url(&self) -> String {
        match self.base_url_override() {
            Some(url) => url.to_string(),
            None => tenant_base_url(self.subdomain.trim()),
        }
    }
}

impl Config {
    /// Loads `path` (if it exists) and applies `RS_SUBDOMAIN`/`RS_TOKEN` from
    /// the environment. Call `validate` before talking to the API.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_inner(path.as_ref(), false)
    }

    /// Like `load`, but a missing file is an error. Used for paths given on
    /// the command line.
    pub fn load_required(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_inner(path.as_ref(), true)
    }

    fn load_inner(path: &Path, required: bool) -> Result<Self> {
        if required && !path.exists() {
            return Err(ExportError::Config(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                ExportError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml_str(&content)?
        } else {
            tracing::debug!("Config file {} not found, relying on environment", path.display());
            Config::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(subdomain) = lookup(ENV_SUBDOMAIN).filter(|v| !v.trim().is_empty()) {
            self.repairshopr.subdomain = subdomain.trim().to_string();
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.repairshopr.token = token.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let rs = &self.repairshopr;
        if rs.subdomain.trim().is_empty() && rs.base_url_override().is_none() {
            return Err(ExportError::Config(format!(
                "repairshopr.subdomain is not set (config file or {})",
                ENV_SUBDOMAIN
            )));
        }
        if rs.token.trim().is_empty() {
            return Err(ExportError::Config(format!(
                "repairshopr.token is not set (config file or {})",
                ENV_TOKEN
            )));
        }
        if rs.timeout_seconds == 0 {
            return Err(ExportError::Config(
                "repairshopr.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
