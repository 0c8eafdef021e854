//! Risk Detector - Threshold rules over scores, derived metrics and benchmarks.
//!
//! Every alert names the KPIs it concerns and at least one remediation;
//! alerts without either are dropped as noise.

use serde::{Deserialize, Serialize};

use super::axis_aggregator::AxisScore;
use super::correlation::CorrelationInsight;
use super::playbook;
use super::processed::ProcessedKpiData;
use super::settings::ScoringSettings;
use crate::domain::foundation::{GrowthAxis, KpiId, Priority, Severity, WeightLevel};

/// Rule that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorId {
    KpiFloor,
    DerivedMetric,
    BenchmarkGap,
    DataCompleteness,
}

/// An automatically detected warning signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub affected_kpis: Vec<KpiId>,
    pub suggested_actions: Vec<String>,
    pub detector: DetectorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<GrowthAxis>,
}

impl RiskAlert {
    fn is_actionable(&self) -> bool {
        !self.affected_kpis.is_empty() && !self.suggested_actions.is_empty()
    }
}

/// Threshold-based risk detection.
pub struct RiskDetector;

impl RiskDetector {
    /// Detects risks and returns them ordered critical, warning, info.
    ///
    /// Ties break by number of affected KPIs (descending), then title.
    pub fn detect_risks(
        processed: &[ProcessedKpiData],
        insights: &[CorrelationInsight],
        axis_scores: &[AxisScore],
        settings: &ScoringSettings,
    ) -> Vec<RiskAlert> {
        let mut alerts: Vec<RiskAlert> = Self::kpi_floor_alerts(processed, settings)
            .chain(Self::derived_metric_alerts(insights))
            .chain(Self::benchmark_gap_alerts(axis_scores, settings))
            .chain(Self::completeness_alerts(processed, axis_scores, settings))
            .filter(RiskAlert::is_actionable)
            .collect();

        alerts.sort_by(|a, b| {
            a.severity
                .rank()
                .cmp(&b.severity.rank())
                .then_with(|| b.affected_kpis.len().cmp(&a.affected_kpis.len()))
                .then_with(|| a.title.cmp(&b.title))
        });
        alerts
    }

    fn kpi_floor_alerts<'a>(
        processed: &'a [ProcessedKpiData],
        settings: &'a ScoringSettings,
    ) -> impl Iterator<Item = RiskAlert> + 'a {
        processed.iter().filter_map(move |p| {
            let score = p.score()?;
            let severity = if score.value() < settings.critical_floor {
                Severity::Critical
            } else if score.value() < settings.warning_floor && p.weight >= WeightLevel::X2 {
                Severity::Warning
            } else {
                return None;
            };

            Some(RiskAlert {
                severity,
                title: format!("{} is below the {} floor", p.kpi.name, severity),
                description: format!(
                    "{} scored {}/100 on the {} axis (weight {}).",
                    p.kpi.name,
                    score,
                    p.axis(),
                    p.weight
                ),
                affected_kpis: vec![p.id().clone()],
                suggested_actions: playbook::owned(playbook::axis_actions(p.axis())),
                detector: DetectorId::KpiFloor,
                axis: Some(p.axis()),
            })
        })
    }

    fn derived_metric_alerts(
        insights: &[CorrelationInsight],
    ) -> impl Iterator<Item = RiskAlert> + '_ {
        insights.iter().filter_map(|insight| {
            let severity = match insight.priority {
                Priority::Critical => Severity::Critical,
                Priority::High => Severity::Warning,
                Priority::Medium | Priority::Low => return None,
            };

            Some(RiskAlert {
                severity,
                title: format!("{} is unhealthy", insight.metric.name()),
                description: format!("{} (health {}/100).", insight.description, insight.score),
                affected_kpis: insight.contributing_kpis.clone(),
                suggested_actions: playbook::owned(playbook::metric_actions(insight.metric)),
                detector: DetectorId::DerivedMetric,
                axis: None,
            })
        })
    }

    fn benchmark_gap_alerts<'a>(
        axis_scores: &'a [AxisScore],
        settings: &'a ScoringSettings,
    ) -> impl Iterator<Item = RiskAlert> + 'a {
        axis_scores.iter().filter_map(move |axis| {
            let comparison = axis.benchmark.as_ref()?.comparison()?;
            if comparison.gap > -settings.severe_benchmark_gap {
                return None;
            }

            Some(RiskAlert {
                severity: Severity::Warning,
                title: format!("{} trails peers", axis.axis),
                description: format!(
                    "{} is {:.1} points below the peer average of {:.1} ({:.0}th percentile).",
                    axis.axis,
                    -comparison.gap,
                    comparison.peer_average,
                    comparison.percentile
                ),
                affected_kpis: axis.kpis.clone(),
                suggested_actions: playbook::owned(playbook::axis_actions(axis.axis)),
                detector: DetectorId::BenchmarkGap,
                axis: Some(axis.axis),
            })
        })
    }

    fn completeness_alerts<'a>(
        processed: &'a [ProcessedKpiData],
        axis_scores: &'a [AxisScore],
        settings: &'a ScoringSettings,
    ) -> impl Iterator<Item = RiskAlert> + 'a {
        axis_scores.iter().filter_map(move |axis| {
            let completion = axis.completion();
            if completion.applicable == 0 || completion.rate >= settings.low_completion_threshold {
                return None;
            }

            let missing: Vec<KpiId> = processed
                .iter()
                .filter(|p| p.axis() == axis.axis && !p.is_complete())
                .map(|p| p.id().clone())
                .collect();

            Some(RiskAlert {
                severity: Severity::Info,
                title: format!("Insufficient data for {}", axis.axis),
                description: format!(
                    "Only {} of {} applicable KPIs could be scored.",
                    completion.complete, completion.applicable
                ),
                affected_kpis: missing,
                suggested_actions: playbook::owned(playbook::completeness_actions()),
                detector: DetectorId::DataCompleteness,
                axis: Some(axis.axis),
            })
        })
    }
}

#[cfg(test)]
#[path = "risk_detector_test.rs"]
mod risk_detector_test;
