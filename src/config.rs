use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_BULK_PER_PAGE: u32 = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_token_env() -> String {
    "CARDIONET_TOKEN".to_string()
}

fn default_per_page() -> u32 {
    10
}

fn default_bulk_per_page() -> u32 {
    MAX_BULK_PER_PAGE
}

fn default_enabled_true() -> bool {
    true
}

fn default_logging_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_logging_filter() -> String {
    "info".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_logging_retention_days() -> usize {
    14
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Environment variable holding the bearer token of the signed-in user.
    /// Empty runs every request anonymously.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_bulk_per_page")]
    pub bulk_per_page: u32,
    #[serde(default = "default_per_page")]
    pub remote_per_page: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            bulk_per_page: default_bulk_per_page(),
            remote_per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_logging_retention_days")]
    pub retention_days: usize,
    #[serde(default = "default_enabled_true")]
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_logging_dir(),
            filter: default_logging_filter(),
            rotation: default_logging_rotation(),
            retention_days: default_logging_retention_days(),
            stderr_warn_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config = Self::from_jsonc(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        if !config.logging.dir.is_absolute() {
            config.logging.dir = config_base.join(&config.logging.dir);
        }
        Ok(config)
    }

    /// Parses and validates config text without touching the filesystem.
    pub fn from_jsonc(text: &str) -> Result<Self> {
        let config_value: Value = json5::from_str(text).context("invalid jsonc")?;
        let config: Config =
            serde_json::from_value(config_value).context("failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url cannot be empty");
        }
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be at least 1");
        }
        if self.directory.per_page == 0 {
            bail!("directory.per_page must be at least 1");
        }
        if self.directory.remote_per_page == 0 {
            bail!("directory.remote_per_page must be at least 1");
        }
        if !(1..=MAX_BULK_PER_PAGE).contains(&self.directory.bulk_per_page) {
            bail!(
                "directory.bulk_per_page must be within 1..={MAX_BULK_PER_PAGE}, got {}",
                self.directory.bulk_per_page
            );
        }
        if self.logging.retention_days == 0 {
            bail!("logging.retention_days must be at least 1");
        }
        Ok(())
    }
}
