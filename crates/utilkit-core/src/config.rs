use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::db::{Backend, ConnectionConfig};

/// Retry executor parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub retry_limit: u32,
    /// Fixed delay between attempts in seconds (e.g. 0.1 = 100ms).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_limit: 3,
            delay_secs: 0.1,
        }
    }
}

/// `[database]` section: where the database helper connects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Database name; for sqlite, the database file path.
    #[serde(default)]
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            host: "localhost".to_string(),
            port: None,
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl DatabaseConfig {
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            backend: self.backend,
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/utilkit/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtilkitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl UtilkitConfig {
    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("utilkit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UtilkitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UtilkitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: UtilkitConfig = toml::from_str(&data)?;
    Ok(cfg)
}
