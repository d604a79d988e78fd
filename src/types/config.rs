//! Configuration for recache.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{CacheError, CacheResult};

/// Main configuration for recache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// LRU cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held at once.
    ///
    /// Signed so that a misconfigured value is rejected by validation
    /// instead of failing to parse.
    #[serde(default = "default_max_items")]
    pub max_items: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

fn default_max_items() -> i64 {
    1000
}

impl CacheConfig {
    /// Returns the capacity as `usize`, or `InvalidConfiguration` when below 1.
    pub fn capacity(&self) -> CacheResult<usize> {
        if self.max_items < 1 {
            return Err(CacheError::invalid_configuration(format!(
                "max_items deve ser >= 1 (recebido {})",
                self.max_items
            )));
        }
        usize::try_from(self.max_items).map_err(|_| {
            CacheError::invalid_configuration(format!(
                "max_items fora do intervalo suportado: {}",
                self.max_items
            ))
        })
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CacheResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CacheResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// Checks every setting that can be rejected.
    pub fn validate(&self) -> CacheResult<()> {
        self.cache.capacity()?;
        match self.general.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(CacheError::config(format!(
                "log_level desconhecido: '{}'",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
