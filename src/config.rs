use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::host::SettingsProvider;
use crate::shlink::DEFAULT_TIMEOUT;
use crate::utils::paths::ensure_parent_exists;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Shlink instance, e.g. `https://s.example.com`.
    #[serde(default)]
    pub instance_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Keys accepted by `config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    InstanceUrl,
    ApiKey,
    TimeoutSecs,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigKey::InstanceUrl => "instance-url",
            ConfigKey::ApiKey => "api-key",
            ConfigKey::TimeoutSecs => "timeout-secs",
        };
        write!(f, "{s}")
    }
}

/// Per-run values from the command line that win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub instance_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Effective settings handed to the shortening workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub instance_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        ensure_parent_exists(path)?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::InstanceUrl => {
                if !value.is_empty() {
                    url::Url::parse(value)
                        .with_context(|| format!("Invalid instance URL: {value}"))?;
                }
                self.instance_url = value.to_string();
            }
            ConfigKey::ApiKey => self.api_key = value.to_string(),
            ConfigKey::TimeoutSecs => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {value}"))?;
                if secs == 0 {
                    bail!("Timeout must be at least one second");
                }
                self.timeout_secs = secs;
            }
        }
        Ok(())
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.instance_url {
            self.instance_url = url.clone();
        }
        if let Some(key) = &overrides.api_key {
            self.api_key = key.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn settings(&self) -> Settings {
        Settings {
            instance_url: self.instance_url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

/// Settings read from a TOML file on every call, so edits made between
/// triggers are picked up.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    overrides: Overrides,
}

impl ConfigFile {
    pub fn new(path: PathBuf, overrides: Overrides) -> Self {
        Self { path, overrides }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        Ok(Config::load_from(&self.path)?.apply(&self.overrides))
    }
}

impl SettingsProvider for ConfigFile {
    fn settings(&self) -> Result<Settings> {
        Ok(self.load()?.settings())
    }
}

/// Show enough of a secret to recognise it.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }

    if secret.chars().count() <= 8 {
        return "*".repeat(8);
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(8))
}
