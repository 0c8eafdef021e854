//! Benchmark Source Port - Supplies peer datasets to the engine.
//!
//! Implementations may read files, call remote services or hold fixtures.
//! The engine itself never performs I/O; the application layer loads a
//! dataset through this port before evaluating.

use async_trait::async_trait;

use crate::domain::scoring::PeerBenchmarkDataset;

/// Errors that can occur while loading benchmark data
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkSourceError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse benchmark dataset: {0}")]
    Parse(String),

    #[error("Benchmark source unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading peer benchmark datasets
#[async_trait]
pub trait BenchmarkSource: Send + Sync {
    /// Loads the dataset entries for a sector.
    ///
    /// # Returns
    /// `Ok(None)` when the source has no data for the sector. That is not
    /// an error: comparisons then report "benchmark unavailable".
    ///
    /// # Errors
    /// Returns `BenchmarkSourceError` if the source could not be read
    async fn load(
        &self,
        sector: &str,
    ) -> Result<Option<PeerBenchmarkDataset>, BenchmarkSourceError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
