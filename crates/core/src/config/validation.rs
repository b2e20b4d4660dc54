//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_capacity` is 0
    /// - `cache_ttl_secs` is less than 60 seconds
    /// - `retry_attempts` is 0 or exceeds 10
    /// - `debounce_ms` is 10 seconds or more
    /// - `fallback_zip` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_capacity".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.cache_ttl_secs < 60 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be at least 60 seconds".into(),
            });
        }

        if self.retry_attempts == 0 || self.retry_attempts > 10 {
            return Err(ConfigError::Invalid {
                field: "retry_attempts".into(),
                reason: "must be between 1 and 10".into(),
            });
        }

        if self.debounce_ms >= 10_000 {
            return Err(ConfigError::Invalid {
                field: "debounce_ms".into(),
                reason: "must be under 10 seconds (10000ms)".into(),
            });
        }

        if self.fallback_zip.is_empty() {
            return Err(ConfigError::Invalid { field: "fallback_zip".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
