//! Status buckets and trend direction for scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Score;

/// Qualitative bucket for a score or a benchmark percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
    InsufficientData,
}

impl ScoreStatus {
    /// Buckets a 0-100 percentile: excellent ≥75, good 50-74, fair 25-49,
    /// needs attention below 25.
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile >= 75.0 {
            ScoreStatus::Excellent
        } else if percentile >= 50.0 {
            ScoreStatus::Good
        } else if percentile >= 25.0 {
            ScoreStatus::Fair
        } else {
            ScoreStatus::NeedsAttention
        }
    }

    /// Buckets an absolute score using the percentile cut points.
    ///
    /// `None` means there was nothing to score.
    pub fn from_score(score: Option<Score>) -> Self {
        match score {
            Some(score) => Self::from_percentile(score.value()),
            None => ScoreStatus::InsufficientData,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreStatus::Excellent => "excellent",
            ScoreStatus::Good => "good",
            ScoreStatus::Fair => "fair",
            ScoreStatus::NeedsAttention => "needs attention",
            ScoreStatus::InsufficientData => "insufficient data",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direction of an axis score compared with a previous evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
    Unknown,
}

impl Trend {
    /// Compares a current score against a previous one.
    ///
    /// Differences within `tolerance` points are stable.
    pub fn between(previous: Option<Score>, current: Option<Score>, tolerance: f64) -> Self {
        match (previous, current) {
            (Some(previous), Some(current)) => {
                let delta = current.value() - previous.value();
                if delta > tolerance {
                    Trend::Up
                } else if delta < -tolerance {
                    Trend::Down
                } else {
                    Trend::Stable
                }
            }
            _ => Trend::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f64) -> Score {
        Score::try_new(v).unwrap()
    }

    #[test]
    fn percentile_buckets_match_cut_points() {
        assert_eq!(ScoreStatus::from_percentile(100.0), ScoreStatus::Excellent);
        assert_eq!(ScoreStatus::from_percentile(75.0), ScoreStatus::Excellent);
        assert_eq!(ScoreStatus::from_percentile(74.9), ScoreStatus::Good);
        assert_eq!(ScoreStatus::from_percentile(50.0), ScoreStatus::Good);
        assert_eq!(ScoreStatus::from_percentile(49.0), ScoreStatus::Fair);
        assert_eq!(ScoreStatus::from_percentile(25.0), ScoreStatus::Fair);
        assert_eq!(ScoreStatus::from_percentile(24.9), ScoreStatus::NeedsAttention);
    }

    #[test]
    fn missing_score_is_insufficient_data() {
        assert_eq!(ScoreStatus::from_score(None), ScoreStatus::InsufficientData);
        assert_eq!(ScoreStatus::from_score(Some(score(80.0))), ScoreStatus::Excellent);
    }

    #[test]
    fn trend_respects_tolerance() {
        assert_eq!(Trend::between(Some(score(50.0)), Some(score(51.5)), 2.0), Trend::Stable);
        assert_eq!(Trend::between(Some(score(50.0)), Some(score(55.0)), 2.0), Trend::Up);
        assert_eq!(Trend::between(Some(score(50.0)), Some(score(40.0)), 2.0), Trend::Down);
    }

    #[test]
    fn trend_without_history_is_unknown() {
        assert_eq!(Trend::between(None, Some(score(50.0)), 2.0), Trend::Unknown);
        assert_eq!(Trend::between(Some(score(50.0)), None, 2.0), Trend::Unknown);
    }
}
