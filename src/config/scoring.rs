//! Scoring thresholds configuration

use serde::Deserialize;
use std::collections::BTreeMap;

use super::error::ValidationError;
use crate::domain::foundation::GrowthAxis;
use crate::domain::scoring::{AxisWeights, ScoringSettings};

/// Tunable thresholds for the evaluation pipeline.
///
/// Every field falls back to the engine default, so an empty environment
/// yields `ScoringSettings::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub critical_floor: f64,
    pub warning_floor: f64,
    pub severe_benchmark_gap: f64,
    pub weak_axis_threshold: f64,
    pub low_completion_threshold: f64,
    pub digest_limit: usize,
    pub max_actions: usize,
    pub trend_tolerance: f64,

    /// Per-axis weight overrides for the overall score
    pub axis_weights: BTreeMap<GrowthAxis, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let settings = ScoringSettings::default();
        Self {
            critical_floor: settings.critical_floor,
            warning_floor: settings.warning_floor,
            severe_benchmark_gap: settings.severe_benchmark_gap,
            weak_axis_threshold: settings.weak_axis_threshold,
            low_completion_threshold: settings.low_completion_threshold,
            digest_limit: settings.digest_limit,
            max_actions: settings.max_actions,
            trend_tolerance: settings.trend_tolerance,
            axis_weights: BTreeMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Builds the engine settings from this configuration.
    pub fn to_settings(&self) -> ScoringSettings {
        let axis_weights = self
            .axis_weights
            .iter()
            .fold(AxisWeights::equal(), |weights, (axis, weight)| weights.with(*axis, *weight));

        ScoringSettings {
            critical_floor: self.critical_floor,
            warning_floor: self.warning_floor,
            severe_benchmark_gap: self.severe_benchmark_gap,
            weak_axis_threshold: self.weak_axis_threshold,
            low_completion_threshold: self.low_completion_threshold,
            digest_limit: self.digest_limit,
            max_actions: self.max_actions,
            trend_tolerance: self.trend_tolerance,
            axis_weights,
            ..ScoringSettings::default()
        }
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let thresholds = [
            ("critical_floor", self.critical_floor),
            ("warning_floor", self.warning_floor),
            ("severe_benchmark_gap", self.severe_benchmark_gap),
            ("weak_axis_threshold", self.weak_axis_threshold),
            ("trend_tolerance", self.trend_tolerance),
        ];
        for (name, value) in thresholds {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::ThresholdOutOfRange(name));
            }
        }
        if self.critical_floor > self.warning_floor {
            return Err(ValidationError::FloorsInverted);
        }
        if !(0.0..=1.0).contains(&self.low_completion_threshold) {
            return Err(ValidationError::InvalidCompletionThreshold);
        }
        if self.digest_limit == 0 {
            return Err(ValidationError::ZeroDigestLimit);
        }
        if self.max_actions == 0 {
            return Err(ValidationError::ZeroActionLimit);
        }
        if let Some((axis, _)) = self
            .axis_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ValidationError::InvalidAxisWeight(axis.key().to_string()));
        }
        let weights = self.to_settings().axis_weights;
        if GrowthAxis::ALL.iter().all(|axis| weights.weight(*axis) == 0.0) {
            return Err(ValidationError::AllAxisWeightsZero);
        }
        Ok(())
    }
}
