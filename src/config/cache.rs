//! Report cache configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::cache::InMemoryReportCache;

/// Report cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Memoize reports by content hash
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum cached reports before the oldest is evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> usize {
    InMemoryReportCache::DEFAULT_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
        }
    }
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.capacity == 0 {
            return Err(ValidationError::ZeroCacheCapacity);
        }
        Ok(())
    }
}
