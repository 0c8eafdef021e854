//! Per-KPI evaluation record.

use serde::{Deserialize, Serialize};

use super::normalizer::NormalizedResult;
use crate::domain::foundation::{GrowthAxis, KpiId, Score, ScoreStatus, WeightLevel};
use crate::domain::kpi::KpiDefinition;

/// Qualitative risk attached to a single KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl RiskLevel {
    /// High below 40, medium below 70, low otherwise.
    pub fn from_score(score: Option<Score>) -> Self {
        match score.map(|s| s.value()) {
            None => RiskLevel::Unknown,
            Some(v) if v < 40.0 => RiskLevel::High,
            Some(v) if v < 70.0 => RiskLevel::Medium,
            Some(_) => RiskLevel::Low,
        }
    }
}

/// Deterministic commentary on one KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiInsights {
    pub summary: String,
    pub interpretation: String,
    pub risk_level: RiskLevel,
}

impl KpiInsights {
    /// Describes a KPI's normalization outcome.
    pub fn describe(kpi: &KpiDefinition, result: &NormalizedResult) -> Self {
        match result {
            NormalizedResult::Scored { score } => {
                let status = ScoreStatus::from_score(Some(*score));
                let interpretation = match status {
                    ScoreStatus::Excellent => {
                        "Performing well above the level expected at this stage."
                    }
                    ScoreStatus::Good => "On track, with room to improve.",
                    ScoreStatus::Fair => "Below expectations for this stage; worth a closer look.",
                    ScoreStatus::NeedsAttention | ScoreStatus::InsufficientData => {
                        "Well below expectations; a priority for improvement."
                    }
                };
                Self {
                    summary: format!("{} scored {}/100 ({})", kpi.name, score, status),
                    interpretation: interpretation.to_string(),
                    risk_level: RiskLevel::from_score(Some(*score)),
                }
            }
            NormalizedResult::Incomplete { reason } => Self {
                summary: format!("{}: insufficient data", kpi.name),
                interpretation: format!("Not scored: {}.", reason),
                risk_level: RiskLevel::Unknown,
            },
        }
    }
}

/// Industry reference value for one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkInfo {
    pub industry_average: f64,
    pub source: String,
}

/// One KPI's full evaluation for the current stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedKpiData {
    pub kpi: KpiDefinition,
    pub weight: WeightLevel,
    pub normalized_score: NormalizedResult,
    pub insights: KpiInsights,
    pub benchmark_info: Option<BenchmarkInfo>,
}

impl ProcessedKpiData {
    /// Builds the record, deriving insights from the normalization outcome.
    pub fn new(
        kpi: KpiDefinition,
        weight: WeightLevel,
        normalized_score: NormalizedResult,
        benchmark_info: Option<BenchmarkInfo>,
    ) -> Self {
        let insights = KpiInsights::describe(&kpi, &normalized_score);
        Self {
            kpi,
            weight,
            normalized_score,
            insights,
            benchmark_info,
        }
    }

    pub fn id(&self) -> &KpiId {
        &self.kpi.id
    }

    pub fn axis(&self) -> GrowthAxis {
        self.kpi.axis
    }

    /// The normalized score, or `None` if incomplete.
    pub fn score(&self) -> Option<Score> {
        self.normalized_score.score()
    }

    pub fn is_complete(&self) -> bool {
        self.normalized_score.is_complete()
    }
}
