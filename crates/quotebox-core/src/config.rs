use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use quotebox_api::{DEFAULT_TIMEOUT_MS, NINJAS_API_BASE, QUOTABLE_API_BASE};
use quotebox_cache::DEFAULT_TTL_MS;

use crate::providers::DEFAULT_RATE_LIMIT_DELAY_MS;

pub const ENV_API_BASE_URL: &str = "QUOTEBOX_API_BASE_URL";
pub const ENV_API_KEY: &str = "QUOTEBOX_API_KEY";
pub const ENV_FALLBACK_URL: &str = "QUOTEBOX_FALLBACK_URL";

const APP_DIR: &str = "quotebox";

/// Main configuration structure
///
/// Loaded from the config file, then environment variables on top.
/// Priority: Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_file(&Self::config_path()?)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load just the file at `path`; a missing file means defaults
    pub fn load_file(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service can't run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.cache.ttl_ms <= 0 {
            return Err(crate::Error::ConfigError(format!(
                "cache.ttl_ms must be positive, got {}",
                self.cache.ttl_ms
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(crate::Error::ConfigError("api.timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay environment values. `lookup` is injectable so tests don't
    /// have to mutate the real process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_FALLBACK_URL) {
            self.api.fallback_url = url;
        }
    }

    /// Where the SQLite file with favorites/history/stats/theme lives
    pub fn database_path(&self) -> crate::Result<PathBuf> {
        let dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
                .join(APP_DIR),
        };
        Ok(dir.join("quotebox.db"))
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Primary (API Ninjas) base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API Ninjas key, sent as X-Api-Key
    /// Get one at https://api-ninjas.com/register
    #[serde(default)]
    pub api_key: Option<String>,

    /// Fallback (Quotable) base URL
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Gap between sequential requests when fetching several quotes
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,
}

fn default_base_url() -> String {
    NINJAS_API_BASE.to_string()
}

fn default_fallback_url() -> String {
    QUOTABLE_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_rate_limit_delay_ms() -> u64 {
    DEFAULT_RATE_LIMIT_DELAY_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            fallback_url: default_fallback_url(),
            timeout_ms: default_timeout_ms(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Response cache TTL in milliseconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_ms: i64,
}

fn default_cache_ttl() -> i64 {
    DEFAULT_TTL_MS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_cache_ttl(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the data directory; platform default when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}
