///! CLI configuration management

use crate::logging::LogRotation;
use crate::output::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keys accepted by `quotaboard config set`
pub const CONFIG_KEYS: &[&str] = &["default_server", "default_cluster", "default_output", "log_dir", "log_rotation"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_server: String,
    pub default_cluster: String,
    pub default_output: String,
    /// Directory for rolling log files; console only when unset
    pub log_dir: Option<String>,
    pub log_rotation: LogRotation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_server: "http://localhost:8006".to_string(),
            default_cluster: "main".to_string(),
            default_output: "table".to_string(),
            log_dir: None,
            log_rotation: LogRotation::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Update one key from its string form; an empty `log_dir` clears it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_server" => self.default_server = value.to_string(),
            "default_cluster" => self.default_cluster = value.to_string(),
            "default_output" => {
                value.parse::<OutputFormat>()?;
                self.default_output = value.to_lowercase();
            }
            "log_dir" => self.log_dir = Some(value).filter(|v| !v.is_empty()).map(String::from),
            "log_rotation" => self.log_rotation = value.parse()?,
            other => anyhow::bail!("unknown config key '{}' (expected one of: {})", other, CONFIG_KEYS.join(", ")),
        }
        tracing::debug!(key, value, "config updated");
        Ok(())
    }

    /// `~/.config/quotaboard/cli.toml`
    pub fn path() -> Result<PathBuf> {
        let home = std::env::var("HOME")?;
        Ok(PathBuf::from(home).join(".config/quotaboard/cli.toml"))
    }
}
