//! Growth stage and stage-dependent weight level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A company's growth phase. Determines which KPIs apply and their weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    Growth,
}

impl GrowthStage {
    /// All stages from earliest to latest.
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::PreSeed,
        GrowthStage::Seed,
        GrowthStage::SeriesA,
        GrowthStage::SeriesB,
        GrowthStage::Growth,
    ];

    /// Returns the snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            GrowthStage::PreSeed => "pre_seed",
            GrowthStage::Seed => "seed",
            GrowthStage::SeriesA => "series_a",
            GrowthStage::SeriesB => "series_b",
            GrowthStage::Growth => "growth",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for GrowthStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        GrowthStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.key() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format("stage", format!("unknown stage '{}'", s))
            })
    }
}

/// Importance multiplier applied to a KPI's normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightLevel {
    X1,
    X2,
    X3,
}

impl WeightLevel {
    /// Returns the multiplier (1, 2 or 3).
    pub fn multiplier(&self) -> u8 {
        match self {
            WeightLevel::X1 => 1,
            WeightLevel::X2 => 2,
            WeightLevel::X3 => 3,
        }
    }
}

impl fmt::Display for WeightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.multiplier())
    }
}

impl FromStr for WeightLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x1" | "1" => Ok(WeightLevel::X1),
            "x2" | "2" => Ok(WeightLevel::X2),
            "x3" | "3" => Ok(WeightLevel::X3),
            _ => Err(ValidationError::invalid_format(
                "weight",
                format!("expected x1, x2 or x3, got '{}'", s),
            )),
        }
    }
}
