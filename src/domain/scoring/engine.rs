//! Insight Engine - The full evaluation pipeline.
//!
//! A pure function of definitions, stage rules, responses and an optional
//! peer dataset. Nothing downstream mutates an upstream result, and there
//! is no state carried between evaluations.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::action_plan::ActionPlanGenerator;
use super::axis_aggregator::{AxisAggregator, AxisScore};
use super::benchmark::{BenchmarkComparator, BenchmarkKey, PeerBenchmarkDataset};
use super::correlation::CorrelationEngine;
use super::insight_ranker::InsightRanker;
use super::normalizer::{IncompleteReason, NormalizedResult, Normalizer};
use super::processed::ProcessedKpiData;
use super::report::{ReportData, ReportSummary};
use super::risk_detector::RiskDetector;
use super::settings::ScoringSettings;
use crate::domain::foundation::{
    GrowthAxis, GrowthStage, KpiId, Score, ScoreStatus, Trend, ValidationError, WeightLevel,
};
use crate::domain::kpi::{KpiDefinition, KpiResponse, StageRule};

/// Who is being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationContext {
    pub sector: String,
    pub stage: GrowthStage,
}

impl EvaluationContext {
    pub fn new(sector: impl Into<String>, stage: GrowthStage) -> Self {
        Self {
            sector: sector.into(),
            stage,
        }
    }
}

/// Everything one evaluation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    pub context: EvaluationContext,
    pub definitions: Vec<KpiDefinition>,
    pub rules: Vec<StageRule>,
    #[serde(default)]
    pub responses: Vec<KpiResponse>,
    /// Axis scores from a previous evaluation, for trend detection.
    #[serde(default)]
    pub previous_axis_scores: BTreeMap<GrowthAxis, Score>,
}

impl EvaluationInput {
    pub fn new(
        context: EvaluationContext,
        definitions: Vec<KpiDefinition>,
        rules: Vec<StageRule>,
        responses: Vec<KpiResponse>,
    ) -> Self {
        Self {
            context,
            definitions,
            rules,
            responses,
            previous_axis_scores: BTreeMap::new(),
        }
    }

    pub fn with_previous_scores(mut self, previous: BTreeMap<GrowthAxis, Score>) -> Self {
        self.previous_axis_scores = previous;
        self
    }

    /// Checks the request-level preconditions.
    ///
    /// Per-KPI problems are not validation errors; they surface as
    /// incomplete KPIs in the report.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.context.sector.trim().is_empty() {
            return Err(ValidationError::empty_field("sector"));
        }
        Ok(())
    }
}

/// Runs the evaluation pipeline with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    settings: ScoringSettings,
}

impl InsightEngine {
    pub fn new(settings: ScoringSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Evaluates one entity and returns the full report.
    ///
    /// Never fails: every per-record problem is isolated into an
    /// incomplete KPI, an omitted insight or an unavailable benchmark.
    pub fn evaluate(
        &self,
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
    ) -> ReportData {
        let settings = &self.settings;
        let context = &input.context;

        let processed = self.process_kpis(input, benchmarks);
        let axis_scores = self.score_axes(&processed, input, benchmarks);

        let overall_score = AxisAggregator::aggregate_overall(&axis_scores, &settings.axis_weights);
        let overall_benchmark = overall_score.map(|score| {
            BenchmarkComparator::compare_keyed(
                score,
                benchmarks,
                BenchmarkKey::overall(context.sector.clone(), context.stage),
            )
        });
        let status = overall_benchmark
            .as_ref()
            .and_then(|b| b.comparison())
            .map(|c| c.status)
            .unwrap_or_else(|| ScoreStatus::from_score(overall_score));

        let correlation_insights = CorrelationEngine::derive_insights(
            &input.responses,
            &processed,
            &settings.metric_bindings,
        );
        let risk_alerts =
            RiskDetector::detect_risks(&processed, &correlation_insights, &axis_scores, settings);
        let action_plan = ActionPlanGenerator::build_plan(
            &risk_alerts,
            &axis_scores,
            &correlation_insights,
            settings,
        );
        let highlights = InsightRanker::collect_highlights(&axis_scores, &correlation_insights);
        let digest = InsightRanker::build_summary(
            &risk_alerts,
            &highlights,
            &axis_scores,
            settings.digest_limit,
        );

        let completion_rate = AxisAggregator::completion_rate(&processed);
        let critical_kpi_count = processed
            .iter()
            .filter_map(|p| p.score())
            .filter(|s| s.value() < settings.critical_floor)
            .count();

        tracing::info!(
            sector = %context.sector,
            stage = %context.stage,
            kpis = processed.len(),
            complete = completion_rate.complete,
            overall = ?overall_score.map(|s| s.value()),
            alerts = risk_alerts.len(),
            actions = action_plan.len(),
            "evaluation complete"
        );

        ReportData {
            summary: ReportSummary {
                overall_score,
                overall_benchmark,
                critical_kpi_count,
                completion_rate,
                status,
            },
            axis_scores,
            processed_kpis: processed,
            risk_alerts,
            correlation_insights,
            action_plan,
            highlights,
            quick_highlights: digest.quick_highlights,
            critical_alerts: digest.critical_alerts,
        }
    }

    fn process_kpis(
        &self,
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
    ) -> Vec<ProcessedKpiData> {
        let context = &input.context;
        let rules = first_wins(
            input.rules.iter().filter(|r| r.stage == context.stage),
            |r| &r.kpi_id,
            "stage rule",
        );
        let responses = first_wins(input.responses.iter(), |r| &r.kpi_id, "response");

        let mut seen: BTreeSet<KpiId> = BTreeSet::new();
        input
            .definitions
            .iter()
            .filter(|kpi| {
                let first = seen.insert(kpi.id.clone());
                if !first {
                    tracing::warn!(kpi = %kpi.id, "duplicate KPI definition ignored");
                }
                first
            })
            .filter(|kpi| kpi.applies_to(context.stage))
            .map(|kpi| {
                let rule = rules.get(&kpi.id).copied();
                let result = match rule {
                    Some(rule) => Normalizer::normalize(kpi, rule, responses.get(&kpi.id).copied()),
                    None => NormalizedResult::Incomplete {
                        reason: IncompleteReason::MissingRule,
                    },
                };

                match result.incomplete_reason() {
                    Some(reason @ IncompleteReason::MalformedRule(_)) => {
                        tracing::warn!(kpi = %kpi.id, %reason, "KPI rule could not be parsed");
                    }
                    Some(reason) => tracing::debug!(kpi = %kpi.id, %reason, "KPI incomplete"),
                    None => {}
                }

                let benchmark_info =
                    benchmarks.and_then(|b| b.kpi_average(&context.sector, context.stage, &kpi.id));
                let weight = rule.map(|r| r.weight).unwrap_or(WeightLevel::X1);

                ProcessedKpiData::new(kpi.clone(), weight, result, benchmark_info)
            })
            .collect()
    }

    fn score_axes(
        &self,
        processed: &[ProcessedKpiData],
        input: &EvaluationInput,
        benchmarks: Option<&PeerBenchmarkDataset>,
    ) -> Vec<AxisScore> {
        let context = &input.context;
        AxisAggregator::aggregate_axis(processed)
            .into_iter()
            .map(|axis| {
                let trend = Trend::between(
                    input.previous_axis_scores.get(&axis.axis).copied(),
                    axis.score,
                    self.settings.trend_tolerance,
                );
                let axis = axis.with_trend(trend);
                match axis.score {
                    Some(score) => {
                        let key = BenchmarkKey::for_axis(
                            context.sector.clone(),
                            context.stage,
                            axis.axis,
                        );
                        let result = BenchmarkComparator::compare_keyed(score, benchmarks, key);
                        axis.with_benchmark(result)
                    }
                    None => axis,
                }
            })
            .collect()
    }
}

/// Indexes records by KPI id, keeping the first of any duplicates.
fn first_wins<'a, T>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&'a T) -> &'a KpiId,
    what: &str,
) -> BTreeMap<&'a KpiId, &'a T> {
    let mut index = BTreeMap::new();
    for item in items {
        let id = key(item);
        if index.contains_key(id) {
            tracing::warn!(kpi = %id, "duplicate {} ignored", what);
            continue;
        }
        index.insert(id, item);
    }
    index
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
