//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GROWTH_ENGINE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use growth_insight_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Digest limit: {}", config.scoring.digest_limit);
//! ```

mod benchmarks;
mod cache;
mod error;
mod logging;
mod scoring;

pub use benchmarks::BenchmarksConfig;
pub use cache::CacheConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use scoring::ScoringConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so the engine runs with no environment at all.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Scoring thresholds and axis weights
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Report cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Peer benchmark dataset
    #[serde(default)]
    pub benchmarks: BenchmarksConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GROWTH_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GROWTH_ENGINE__SCORING__CRITICAL_FLOOR=25` -> `scoring.critical_floor = 25`
    /// - `GROWTH_ENGINE__CACHE__ENABLED=false` -> `cache.enabled = false`
    /// - `GROWTH_ENGINE__SCORING__AXIS_WEIGHTS__FINANCE=2` -> `scoring.axis_weights.finance = 2`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GROWTH_ENGINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        self.cache.validate()?;
        self.benchmarks.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::GrowthAxis;
    use crate::domain::scoring::ScoringSettings;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "GROWTH_ENGINE__SCORING__CRITICAL_FLOOR",
        "GROWTH_ENGINE__SCORING__DIGEST_LIMIT",
        "GROWTH_ENGINE__SCORING__AXIS_WEIGHTS__FINANCE",
        "GROWTH_ENGINE__CACHE__ENABLED",
        "GROWTH_ENGINE__CACHE__CAPACITY",
        "GROWTH_ENGINE__BENCHMARKS__DATASET_PATH",
        "GROWTH_ENGINE__LOGGING__LEVEL",
        "GROWTH_ENGINE__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.scoring.to_settings(), ScoringSettings::default());
        assert!(config.cache.enabled);
        assert!(config.benchmarks.dataset_path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GROWTH_ENGINE__SCORING__CRITICAL_FLOOR", "25");
        env::set_var("GROWTH_ENGINE__SCORING__DIGEST_LIMIT", "5");
        env::set_var("GROWTH_ENGINE__SCORING__AXIS_WEIGHTS__FINANCE", "2");
        env::set_var("GROWTH_ENGINE__CACHE__ENABLED", "false");
        env::set_var("GROWTH_ENGINE__BENCHMARKS__DATASET_PATH", "./data/peers.yaml");
        env::set_var("GROWTH_ENGINE__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.scoring.critical_floor, 25.0);
        assert_eq!(config.scoring.digest_limit, 5);
        assert_eq!(config.scoring.to_settings().axis_weights.weight(GrowthAxis::Finance), 2.0);
        assert!(!config.cache.enabled);
        assert_eq!(
            config.benchmarks.dataset_path.as_deref(),
            Some(std::path::Path::new("./data/peers.yaml"))
        );
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let mut config = AppConfig::default();
        config.cache.capacity = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroCacheCapacity));
    }

    #[test]
    fn test_invalid_number_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GROWTH_ENGINE__CACHE__CAPACITY", "lots");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
