//! Insight Ranker - Executive summary digest.

use serde::{Deserialize, Serialize};

use super::axis_aggregator::AxisScore;
use super::correlation::CorrelationInsight;
use super::risk_detector::RiskAlert;
use crate::domain::foundation::{Priority, ScoreStatus, Trend};

/// A positive or notable finding worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub priority: Priority,
    pub text: String,
}

impl Highlight {
    pub fn new(priority: Priority, text: impl Into<String>) -> Self {
        Self {
            priority,
            text: text.into(),
        }
    }
}

/// Truncated lists for digest views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDigest {
    pub critical_alerts: Vec<String>,
    pub quick_highlights: Vec<String>,
}

pub struct InsightRanker;

impl InsightRanker {
    /// Collects highlights from strong axes, improving trends and healthy
    /// derived metrics, ranked by priority.
    pub fn collect_highlights(
        axes: &[AxisScore],
        insights: &[CorrelationInsight],
    ) -> Vec<Highlight> {
        let mut highlights = Vec::new();

        for axis in axes {
            let Some(score) = axis.score else { continue };
            match axis.status {
                ScoreStatus::Excellent => highlights.push(Highlight::new(
                    Priority::High,
                    format!("{} is a strength at {}/100", axis.axis, score),
                )),
                ScoreStatus::Good => highlights.push(Highlight::new(
                    Priority::Medium,
                    format!("{} is solid at {}/100", axis.axis, score),
                )),
                _ => {}
            }
            if axis.trend == Trend::Up {
                highlights.push(Highlight::new(
                    Priority::Medium,
                    format!("{} improved since the last evaluation", axis.axis),
                ));
            }
        }

        for insight in insights {
            match insight.priority {
                Priority::Low => highlights.push(Highlight::new(
                    Priority::High,
                    format!("Healthy {}: {}", insight.metric.name(), insight.description),
                )),
                Priority::Medium => highlights.push(Highlight::new(
                    Priority::Low,
                    format!("{} is acceptable: {}", insight.metric.name(), insight.description),
                )),
                Priority::Critical | Priority::High => {}
            }
        }

        Self::rank(highlights)
    }

    /// Sorts by fixed priority rank, keeping insertion order within a rank.
    pub fn rank(mut highlights: Vec<Highlight>) -> Vec<Highlight> {
        highlights.sort_by_key(|h| h.priority.rank());
        highlights
    }

    /// Builds the digest: top `limit` alert titles and highlight texts.
    ///
    /// Without any highlight, the strongest axis is surfaced instead, or
    /// an explicit insufficient-data line when nothing was scored.
    pub fn build_summary(
        risks: &[RiskAlert],
        highlights: &[Highlight],
        axes: &[AxisScore],
        limit: usize,
    ) -> SummaryDigest {
        let mut alerts: Vec<&RiskAlert> = risks.iter().collect();
        alerts.sort_by_key(|r| r.severity.as_priority().rank());
        let critical_alerts = alerts
            .into_iter()
            .take(limit)
            .map(|r| format!("[{}] {}", r.severity, r.title))
            .collect();

        let quick_highlights = if highlights.is_empty() {
            Self::fallback_highlight(axes).into_iter().take(limit).collect()
        } else {
            let mut ranked: Vec<&Highlight> = highlights.iter().collect();
            ranked.sort_by_key(|h| h.priority.rank());
            ranked.into_iter().take(limit).map(|h| h.text.clone()).collect()
        };

        SummaryDigest {
            critical_alerts,
            quick_highlights,
        }
    }

    fn fallback_highlight(axes: &[AxisScore]) -> Option<String> {
        let strongest = axes
            .iter()
            .filter_map(|a| a.score.map(|s| (a, s)))
            .max_by(|(_, x), (_, y)| x.total_cmp(y));

        Some(match strongest {
            Some((axis, score)) => format!("Strongest area: {} at {}/100", axis.axis, score),
            None => "Insufficient data to identify strengths".to_string(),
        })
    }
}
