//! Report Cache Port - Memoization of finished evaluations.
//!
//! Entries are keyed by content hash, so a changed input simply misses;
//! there is no time-based expiry. The port is synchronous because the
//! engine it fronts is synchronous.

use std::sync::Arc;

use crate::domain::scoring::{CacheKey, ReportData};

/// Errors that can occur during cache operations
#[derive(Debug, thiserror::Error)]
pub enum ReportCacheError {
    #[error("Cache lock poisoned")]
    LockPoisoned,

    #[error("Failed to compute cache key: {0}")]
    KeyFailed(String),
}

/// Port for storing evaluated reports by content hash
pub trait ReportCache: Send + Sync {
    /// Returns the cached report for `key`, if present.
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ReportData>>, ReportCacheError>;

    /// Stores a report. May evict older entries.
    fn put(&self, key: CacheKey, report: Arc<ReportData>) -> Result<(), ReportCacheError>;

    /// Removes one entry. Returns true if it was present.
    fn invalidate(&self, key: &CacheKey) -> Result<bool, ReportCacheError>;

    /// Removes every entry.
    fn clear(&self) -> Result<(), ReportCacheError>;

    /// Number of cached reports.
    fn len(&self) -> Result<usize, ReportCacheError>;

    fn is_empty(&self) -> Result<bool, ReportCacheError> {
        Ok(self.len()? == 0)
    }
}
