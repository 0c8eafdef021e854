//! CachedInsightEngine - Memoizes evaluations by content hash.

use std::sync::Arc;

use crate::domain::scoring::{
    CacheKey, EvaluationInput, InsightEngine, PeerBenchmarkDataset, ReportData,
};
use crate::ports::ReportCache;

/// Result of a cached evaluation.
#[derive(Debug, Clone)]
pub struct CachedEvaluation {
    pub report: Arc<ReportData>,
    pub cache_hit: bool,
}

/// Wraps the pure engine with an optional report cache.
///
/// Cache failures never fail an evaluation; they are logged and the
/// report is computed directly.
#[derive(Clone)]
pub struct CachedInsightEngine {
    engine: InsightEngine,
    cache: Option<Arc<dyn ReportCache>>,
}

impl CachedInsightEngine {
    pub fn new(engine: InsightEngine) -> Self {
        Self { engine, cache: None }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ReportCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }

    pub fn evaluate(
        &self,
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
    ) -> CachedEvaluation {
        let Some(cache) = &self.cache else {
            return self.compute(input, benchmarks);
        };

        let key = match CacheKey::for_evaluation(input, benchmarks, self.engine.settings()) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(error = %err, "failed to hash evaluation input, bypassing cache");
                return self.compute(input, benchmarks);
            }
        };

        match cache.get(&key) {
            Ok(Some(report)) => {
                tracing::debug!(key = %key, "report cache hit");
                return CachedEvaluation {
                    report,
                    cache_hit: true,
                };
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "report cache read failed"),
        }

        let evaluation = self.compute(input, benchmarks);
        if let Err(err) = cache.put(key, Arc::clone(&evaluation.report)) {
            tracing::warn!(error = %err, "report cache write failed");
        }
        evaluation
    }

    fn compute(
        &self,
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
    ) -> CachedEvaluation {
        CachedEvaluation {
            report: Arc::new(self.engine.evaluate(input, benchmarks)),
            cache_hit: false,
        }
    }
}
