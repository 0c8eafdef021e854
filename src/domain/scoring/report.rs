//! Report contract handed to rendering and export layers.

use serde::{Deserialize, Serialize};

use super::action_plan::ActionItem;
use super::axis_aggregator::{AxisScore, CompletionRate};
use super::benchmark::BenchmarkResult;
use super::correlation::CorrelationInsight;
use super::insight_ranker::Highlight;
use super::processed::ProcessedKpiData;
use super::risk_detector::RiskAlert;
use crate::domain::foundation::{GrowthAxis, Score, ScoreStatus};

/// Headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// `None` when no axis could be scored.
    pub overall_score: Option<Score>,
    pub overall_benchmark: Option<BenchmarkResult>,
    #[serde(rename = "criticalKPICount")]
    pub critical_kpi_count: usize,
    pub completion_rate: CompletionRate,
    pub status: ScoreStatus,
}

/// Complete, immutable evaluation output.
///
/// Contains no presentation fields. Two evaluations of identical inputs
/// serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub summary: ReportSummary,
    pub axis_scores: Vec<AxisScore>,
    #[serde(rename = "processedKPIs")]
    pub processed_kpis: Vec<ProcessedKpiData>,
    pub risk_alerts: Vec<RiskAlert>,
    pub correlation_insights: Vec<CorrelationInsight>,
    pub action_plan: Vec<ActionItem>,
    /// Every highlight, ranked; `quick_highlights` is the digest cut.
    pub highlights: Vec<Highlight>,
    pub quick_highlights: Vec<String>,
    pub critical_alerts: Vec<String>,
}

impl ReportData {
    pub fn axis(&self, axis: GrowthAxis) -> Option<&AxisScore> {
        self.axis_scores.iter().find(|a| a.axis == axis)
    }

    /// Axes that had no scorable KPI.
    pub fn insufficient_axes(&self) -> impl Iterator<Item = &AxisScore> {
        self.axis_scores.iter().filter(|a| a.applicable_kpis > 0 && a.score.is_none())
    }
}
