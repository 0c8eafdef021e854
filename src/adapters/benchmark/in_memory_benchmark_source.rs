//! In-Memory Benchmark Source Adapter
//!
//! Serves a fixed dataset. Useful for tests and for datasets embedded in
//! an input bundle.

use async_trait::async_trait;

use crate::domain::scoring::PeerBenchmarkDataset;
use crate::ports::{BenchmarkSource, BenchmarkSourceError};

/// Benchmark source backed by a dataset held in memory
#[derive(Debug, Clone)]
pub struct InMemoryBenchmarkSource {
    dataset: PeerBenchmarkDataset,
}

impl InMemoryBenchmarkSource {
    pub fn new(dataset: PeerBenchmarkDataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl BenchmarkSource for InMemoryBenchmarkSource {
    async fn load(
        &self,
        sector: &str,
    ) -> Result<Option<PeerBenchmarkDataset>, BenchmarkSourceError> {
        let subset = self.dataset.for_sector(sector);
        Ok((!subset.is_empty()).then_some(subset))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
