use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use std::time::Duration;
use crate::api::dexscreener::{API_BASE_URL, MOODENG_TOKEN_ADDRESS};
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

const ENV_BASE_URL: &str = "MOODENG_API_BASE_URL";
const ENV_TOKEN_ADDRESS: &str = "MOODENG_TOKEN_ADDRESS";
const ENV_REFRESH_SECS: &str = "MOODENG_REFRESH_SECS";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_token_address")]
    pub token_address: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enable_prometheus: bool,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

fn default_token_address() -> String {
    MOODENG_TOKEN_ADDRESS.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_interval_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_address: default_token_address(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// The file [`Config::load_or_default`] will read: `explicit` when given,
    /// else the default location if it exists, else `None` (built-in defaults).
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        }
    }

    /// Loads `path` if it exists, otherwise starts from defaults. A missing
    /// file is only tolerated for the default location.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    /// Applies `MOODENG_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(address) = lookup(ENV_TOKEN_ADDRESS) {
            self.api.token_address = address;
        }
        if let Some(secs) = lookup(ENV_REFRESH_SECS) {
            self.refresh.interval_secs = secs.trim().parse().map_err(|_| {
                Error::ConfigError(format!("{} must be a whole number of seconds, got {:?}", ENV_REFRESH_SECS, secs))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh.interval_secs == 0 {
            return Err(Error::ConfigError("refresh.interval_secs must be greater than zero".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::ConfigError("api.timeout_secs must be greater than zero".into()));
        }
        if self.api.token_address.trim().is_empty() {
            return Err(Error::ConfigError("api.token_address is empty".into()));
        }
        if !self.api.base_url.starts_with("http") {
            return Err(Error::ConfigError(format!("api.base_url is not an HTTP URL: {}", self.api.base_url)));
        }
        Ok(())
    }
}
