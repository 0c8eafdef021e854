//! Action Plan Generator - Ranked, time-boxed recommendations.
//!
//! Candidates come from risk alerts, weak axes and medium-priority derived
//! metrics. Candidates targeting the same KPI set are merged, keeping the
//! highest-ranked one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::axis_aggregator::AxisScore;
use super::correlation::CorrelationInsight;
use super::playbook;
use super::risk_detector::{DetectorId, RiskAlert};
use super::settings::ScoringSettings;
use crate::domain::foundation::{GrowthAxis, KpiId, Priority, Severity};

/// Area an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Market,
    Product,
    Revenue,
    Operations,
    Finance,
    UnitEconomics,
    DataQuality,
}

impl From<GrowthAxis> for ActionCategory {
    fn from(axis: GrowthAxis) -> Self {
        match axis {
            GrowthAxis::Market => ActionCategory::Market,
            GrowthAxis::Product => ActionCategory::Product,
            GrowthAxis::Revenue => ActionCategory::Revenue,
            GrowthAxis::Operations => ActionCategory::Operations,
            GrowthAxis::Finance => ActionCategory::Finance,
        }
    }
}

/// When an action should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "short")]
    ShortTerm,
    #[serde(rename = "medium")]
    MediumTerm,
}

/// Qualitative expected impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn rank(&self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }

    fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Impact::High,
            Severity::Warning => Impact::Medium,
            Severity::Info => Impact::Low,
        }
    }

    /// Impact of closing a gap of `gap` points below target.
    fn from_gap(gap: f64) -> Self {
        if gap >= 25.0 {
            Impact::High
        } else if gap >= 10.0 {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

/// One recommended next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub priority: Priority,
    pub category: ActionCategory,
    pub title: String,
    pub description: String,
    pub timeframe: Timeframe,
    pub estimated_impact: Impact,
    pub related_kpis: Vec<KpiId>,
}

const URGENCY_KEYWORDS: [&str; 6] = ["runway", "burn", "cash", "immediately", "churn", "critical"];

/// Classifies urgency from priority and wording.
///
/// Critical actions are immediate. Urgent wording moves high-priority work
/// to immediate and medium-priority work to short term.
pub fn classify_timeframe(priority: Priority, text: &str) -> Timeframe {
    let lowered = text.to_lowercase();
    let urgent = URGENCY_KEYWORDS.iter().any(|k| lowered.contains(k));

    match (priority, urgent) {
        (Priority::Critical, _) => Timeframe::Immediate,
        (Priority::High, true) => Timeframe::Immediate,
        (Priority::High, false) => Timeframe::ShortTerm,
        (Priority::Medium, true) => Timeframe::ShortTerm,
        (Priority::Medium | Priority::Low, _) => Timeframe::MediumTerm,
    }
}

/// Action plan synthesis.
pub struct ActionPlanGenerator;

impl ActionPlanGenerator {
    /// Builds the ranked plan, at most `settings.max_actions` long.
    pub fn build_plan(
        risks: &[RiskAlert],
        axes: &[AxisScore],
        insights: &[CorrelationInsight],
        settings: &ScoringSettings,
    ) -> Vec<ActionItem> {
        let mut candidates: Vec<ActionItem> = risks
            .iter()
            .filter_map(Self::from_risk)
            .chain(axes.iter().filter_map(|a| Self::from_weak_axis(a, settings)))
            .chain(insights.iter().filter_map(Self::from_insight))
            .collect();

        candidates.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| a.estimated_impact.rank().cmp(&b.estimated_impact.rank()))
                .then_with(|| a.title.cmp(&b.title))
        });

        let mut seen: BTreeSet<BTreeSet<KpiId>> = BTreeSet::new();
        candidates
            .into_iter()
            .filter(|item| seen.insert(item.related_kpis.iter().cloned().collect()))
            .take(settings.max_actions)
            .collect()
    }

    fn item(
        priority: Priority,
        category: ActionCategory,
        title: String,
        description: String,
        estimated_impact: Impact,
        related_kpis: Vec<KpiId>,
    ) -> ActionItem {
        let timeframe = classify_timeframe(priority, &format!("{} {}", title, description));
        ActionItem {
            priority,
            category,
            title,
            description,
            timeframe,
            estimated_impact,
            related_kpis,
        }
    }

    fn from_risk(risk: &RiskAlert) -> Option<ActionItem> {
        let title = risk.suggested_actions.first()?.clone();
        let category = match (risk.detector, risk.axis) {
            (DetectorId::DataCompleteness, _) => ActionCategory::DataQuality,
            (DetectorId::DerivedMetric, _) => ActionCategory::UnitEconomics,
            (_, Some(axis)) => axis.into(),
            (_, None) => ActionCategory::UnitEconomics,
        };

        Some(Self::item(
            risk.severity.as_priority(),
            category,
            title,
            format!("{}. {}", risk.title, risk.description),
            Impact::from_severity(risk.severity),
            risk.affected_kpis.clone(),
        ))
    }

    fn from_weak_axis(axis: &AxisScore, settings: &ScoringSettings) -> Option<ActionItem> {
        let score = axis.score?;
        if score.value() >= settings.weak_axis_threshold || axis.kpis.is_empty() {
            return None;
        }
        let priority = if score.value() < settings.critical_floor {
            Priority::High
        } else {
            Priority::Medium
        };
        let plays = playbook::axis_actions(axis.axis);

        Some(Self::item(
            priority,
            axis.axis.into(),
            format!("Strengthen {}", axis.axis),
            format!(
                "{} scores {}/100, {:.1} points under target. {}.",
                axis.axis,
                score,
                settings.weak_axis_threshold - score.value(),
                plays.join(". ")
            ),
            Impact::from_gap(settings.weak_axis_threshold - score.value()),
            axis.kpis.clone(),
        ))
    }

    fn from_insight(insight: &CorrelationInsight) -> Option<ActionItem> {
        if insight.priority != Priority::Medium || insight.contributing_kpis.is_empty() {
            return None;
        }
        let title = playbook::metric_actions(insight.metric).first()?.to_string();

        Some(Self::item(
            Priority::Medium,
            ActionCategory::UnitEconomics,
            title,
            format!("{} could improve: {}.", insight.metric.name(), insight.description),
            Impact::Medium,
            insight.contributing_kpis.clone(),
        ))
    }
}
