//! Application configuration with layered loading.
//!
//! Configuration is assembled with figment from three sources:
//!
//! 1. Environment variables (LOTLENS_*)
//! 2. TOML config file (if LOTLENS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LOTLENS_*)
/// 2. TOML config file (if LOTLENS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum number of cached rendered results.
    ///
    /// Set via LOTLENS_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Cache entry lifetime in seconds.
    ///
    /// Set via LOTLENS_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Minimum seconds between successful pipeline runs.
    ///
    /// Set via LOTLENS_MIN_INTERVAL_SECS environment variable.
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,

    /// Number of extraction attempts before giving up.
    ///
    /// Set via LOTLENS_RETRY_ATTEMPTS environment variable.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between extraction attempts in milliseconds.
    ///
    /// Set via LOTLENS_RETRY_DELAY_MS environment variable.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Window for coalescing rapid navigation events in milliseconds.
    ///
    /// Set via LOTLENS_DEBOUNCE_MS environment variable.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Geographic code used in shopping links when none is known.
    ///
    /// Set via LOTLENS_FALLBACK_ZIP environment variable.
    #[serde(default = "default_fallback_zip")]
    pub fallback_zip: String,

    /// Path to the preferences file.
    ///
    /// Set via LOTLENS_PREFS_PATH environment variable.
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
}

fn default_cache_capacity() -> usize {
    50
}

fn default_cache_ttl_secs() -> u64 {
    1800 // 30 minutes
}

fn default_min_interval_secs() -> u64 {
    60
}

fn default_retry_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_fallback_zip() -> String {
    "10001".into()
}

fn default_prefs_path() -> PathBuf {
    PathBuf::from("./lotlens-prefs.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
            min_interval_secs: default_min_interval_secs(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            debounce_ms: default_debounce_ms(),
            fallback_zip: default_fallback_zip(),
            prefs_path: default_prefs_path(),
        }
    }
}

impl AppConfig {
    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Minimum run interval as a Duration.
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }

    /// Inter-attempt retry delay as a Duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Navigation debounce window as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LOTLENS_`
    /// 2. TOML file from `LOTLENS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LOTLENS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LOTLENS_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
