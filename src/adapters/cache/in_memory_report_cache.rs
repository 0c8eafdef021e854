//! In-Memory Report Cache Adapter
//!
//! Bounded map from content hash to report. When full, the oldest entry
//! is evicted first.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::domain::scoring::{CacheKey, ReportData};
use crate::ports::{ReportCache, ReportCacheError};

#[derive(Debug, Default)]
struct Entries {
    reports: HashMap<CacheKey, Arc<ReportData>>,
    /// Insertion order, oldest first.
    order: VecDeque<CacheKey>,
}

/// In-memory FIFO cache for evaluated reports
#[derive(Debug, Clone)]
pub struct InMemoryReportCache {
    entries: Arc<RwLock<Entries>>,
    capacity: usize,
}

impl InMemoryReportCache {
    /// Default number of reports kept.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a cache holding at most `capacity` reports (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryReportCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl ReportCache for InMemoryReportCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ReportData>>, ReportCacheError> {
        let entries = self.entries.read().map_err(|_| ReportCacheError::LockPoisoned)?;
        Ok(entries.reports.get(key).cloned())
    }

    fn put(&self, key: CacheKey, report: Arc<ReportData>) -> Result<(), ReportCacheError> {
        let mut entries = self.entries.write().map_err(|_| ReportCacheError::LockPoisoned)?;

        if entries.reports.insert(key.clone(), report).is_some() {
            return Ok(());
        }
        entries.order.push_back(key);

        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.reports.remove(&oldest);
                tracing::debug!(key = %oldest, "evicted cached report");
            }
        }
        Ok(())
    }

    fn invalidate(&self, key: &CacheKey) -> Result<bool, ReportCacheError> {
        let mut entries = self.entries.write().map_err(|_| ReportCacheError::LockPoisoned)?;
        let removed = entries.reports.remove(key).is_some();
        if removed {
            entries.order.retain(|k| k != key);
        }
        Ok(removed)
    }

    fn clear(&self) -> Result<(), ReportCacheError> {
        let mut entries = self.entries.write().map_err(|_| ReportCacheError::LockPoisoned)?;
        entries.reports.clear();
        entries.order.clear();
        Ok(())
    }

    fn len(&self) -> Result<usize, ReportCacheError> {
        let entries = self.entries.read().map_err(|_| ReportCacheError::LockPoisoned)?;
        Ok(entries.reports.len())
    }
}
