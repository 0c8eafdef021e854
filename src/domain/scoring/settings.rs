//! Scoring settings - explicit thresholds passed into the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::correlation::MetricBindings;
use crate::domain::foundation::GrowthAxis;

/// Relative weight of each axis in the overall composite score.
///
/// Axes without an explicit entry weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisWeights(BTreeMap<GrowthAxis, f64>);

impl AxisWeights {
    /// Equal weights for every axis.
    pub fn equal() -> Self {
        Self::default()
    }

    /// Sets the weight of one axis.
    pub fn with(mut self, axis: GrowthAxis, weight: f64) -> Self {
        self.0.insert(axis, weight);
        self
    }

    /// Returns the weight of an axis.
    pub fn weight(&self, axis: GrowthAxis) -> f64 {
        self.0.get(&axis).copied().unwrap_or(1.0)
    }

    /// Iterates explicit overrides.
    pub fn iter(&self) -> impl Iterator<Item = (&GrowthAxis, &f64)> {
        self.0.iter()
    }
}

/// Thresholds and limits used across the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSettings {
    /// KPI scores below this raise a critical alert.
    pub critical_floor: f64,
    /// KPI scores below this raise a warning for x2/x3-weighted KPIs.
    pub warning_floor: f64,
    /// Axis benchmark gap at or below `-severe_benchmark_gap` raises a warning.
    pub severe_benchmark_gap: f64,
    /// Axes scoring below this get an improvement action.
    pub weak_axis_threshold: f64,
    /// Axis completion ratio below this raises a data-completeness alert.
    pub low_completion_threshold: f64,
    /// Entries kept in the executive digest lists.
    pub digest_limit: usize,
    /// Upper bound on action plan length.
    pub max_actions: usize,
    /// Score delta treated as a stable trend.
    pub trend_tolerance: f64,
    pub axis_weights: AxisWeights,
    pub metric_bindings: MetricBindings,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            critical_floor: 30.0,
            warning_floor: 50.0,
            severe_benchmark_gap: 20.0,
            weak_axis_threshold: 50.0,
            low_completion_threshold: 0.5,
            digest_limit: 3,
            max_actions: 10,
            trend_tolerance: 2.0,
            axis_weights: AxisWeights::equal(),
            metric_bindings: MetricBindings::default(),
        }
    }
}
