//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Threshold '{0}' must be between 0 and 100")]
    ThresholdOutOfRange(&'static str),

    #[error("Critical floor must not exceed the warning floor")]
    FloorsInverted,

    #[error("Completion threshold must be between 0 and 1")]
    InvalidCompletionThreshold,

    #[error("Digest limit must be at least 1")]
    ZeroDigestLimit,

    #[error("Action plan limit must be at least 1")]
    ZeroActionLimit,

    #[error("Axis weight for '{0}' must be a non-negative number")]
    InvalidAxisWeight(String),

    #[error("At least one axis must carry a positive weight")]
    AllAxisWeightsZero,

    #[error("Cache capacity must be at least 1 when the cache is enabled")]
    ZeroCacheCapacity,

    #[error("Benchmark dataset path cannot be blank")]
    BlankDatasetPath,

    #[error("Log level cannot be blank")]
    BlankLogLevel,
}
