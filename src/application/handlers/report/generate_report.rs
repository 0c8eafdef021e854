//! GenerateReportHandler - Command handler for producing a growth report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::CachedInsightEngine;
use crate::domain::foundation::{DomainError, EvaluationId};
use crate::domain::scoring::{EvaluationInput, PeerBenchmarkDataset, ReportData};
use crate::ports::{BenchmarkSource, NarrativeGenerator, ReportNarrative};

/// Command to evaluate one entity.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub input: EvaluationInput,
    /// Ask the narrative generator for prose, if one is configured.
    pub narrate: bool,
}

/// A report plus the envelope describing this particular run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub evaluation_id: EvaluationId,
    pub generated_at: DateTime<Utc>,
    pub cache_hit: bool,
    pub report: Arc<ReportData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<ReportNarrative>,
}

/// Handler for generating reports.
pub struct GenerateReportHandler {
    engine: CachedInsightEngine,
    benchmark_source: Option<Arc<dyn BenchmarkSource>>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl GenerateReportHandler {
    pub fn new(engine: CachedInsightEngine) -> Self {
        Self {
            engine,
            benchmark_source: None,
            narrator: None,
        }
    }

    pub fn with_benchmark_source(mut self, source: Arc<dyn BenchmarkSource>) -> Self {
        self.benchmark_source = Some(source);
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub async fn handle(&self, cmd: GenerateReportCommand) -> Result<GeneratedReport, DomainError> {
        // 1. Validate request-level preconditions
        cmd.input.validate()?;

        let evaluation_id = EvaluationId::new();
        let sector = cmd.input.context.sector.as_str();

        // 2. Load peer benchmarks; a missing dataset only disables comparisons
        let benchmarks = self.load_benchmarks(sector).await;

        // 3. Evaluate (cached)
        let evaluation = self.engine.evaluate(&cmd.input, benchmarks.as_ref());

        tracing::info!(
            evaluation_id = %evaluation_id,
            sector,
            stage = %cmd.input.context.stage,
            cache_hit = evaluation.cache_hit,
            benchmarked = benchmarks.is_some(),
            "report generated"
        );

        // 4. Optional narrative
        let narrative = if cmd.narrate {
            self.narrate(&cmd.input, &evaluation.report).await
        } else {
            None
        };

        Ok(GeneratedReport {
            evaluation_id,
            generated_at: Utc::now(),
            cache_hit: evaluation.cache_hit,
            report: evaluation.report,
            narrative,
        })
    }

    async fn load_benchmarks(&self, sector: &str) -> Option<PeerBenchmarkDataset> {
        let source = self.benchmark_source.as_ref()?;
        match source.load(sector).await {
            Ok(dataset) => dataset,
            Err(err) => {
                tracing::warn!(
                    source = source.name(),
                    sector,
                    error = %err,
                    "benchmark source failed, continuing without benchmarks"
                );
                None
            }
        }
    }

    async fn narrate(
        &self,
        input: &EvaluationInput,
        report: &ReportData,
    ) -> Option<ReportNarrative> {
        let Some(narrator) = &self.narrator else {
            tracing::debug!("narrative requested but no generator configured");
            return None;
        };
        match narrator.narrate(&input.context, report).await {
            Ok(narrative) => Some(narrative),
            Err(err) => {
                tracing::warn!(
                    generator = narrator.name(),
                    error = %err,
                    "narrative generation failed, returning report without narrative"
                );
                None
            }
        }
    }
}
