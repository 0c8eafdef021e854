//! Stage rules - per-stage weight and scoring ruleset for a KPI.
//!
//! Rule text is a `;`-separated list of `key=number` entries:
//!
//! - numeric / percentage / calculation: `min=0;max=40` (value at `min`
//!   scores 0, value at `max` scores 100; `min > max` for lower-is-better)
//! - rubric: ordered `level=score` pairs, e.g. `none=0;basic=50;advanced=100`
//! - single / multi select: `option=points` pairs plus an optional
//!   `@max=15` directive declaring the raw-point maximum

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::InputType;
use crate::domain::foundation::{GrowthStage, KpiId, Score, WeightLevel};

const MAX_DIRECTIVE: &str = "@max";

/// Errors raised while parsing rule text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleParseError {
    #[error("Rule text is empty")]
    Empty,

    #[error("Entry '{0}' is not of the form key=value")]
    MalformedEntry(String),

    #[error("Value for '{key}' is not a finite number: '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("Missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("Duplicate key '{0}'")]
    DuplicateKey(String),

    #[error("Unexpected key '{0}' for this input type")]
    UnexpectedKey(String),

    #[error("Threshold bounds must differ (both are {0})")]
    DegenerateBounds(f64),

    #[error("Level '{label}' score {score} is outside 0-100")]
    LevelOutOfRange { label: String, score: f64 },

    #[error("Unknown directive '{0}'")]
    UnknownDirective(String),

    #[error("Declared maximum must be positive, got {0}")]
    InvalidMaximum(f64),
}

/// Weight and ruleset for one KPI at one growth stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRule {
    pub kpi_id: KpiId,
    pub stage: GrowthStage,
    pub weight: WeightLevel,
    pub rule_text: String,
}

impl StageRule {
    /// Creates a new stage rule.
    pub fn new(
        kpi_id: KpiId,
        stage: GrowthStage,
        weight: WeightLevel,
        rule_text: impl Into<String>,
    ) -> Self {
        Self {
            kpi_id,
            stage,
            weight,
            rule_text: rule_text.into(),
        }
    }

    /// Parses this rule's text for the given input type.
    pub fn ruleset(&self, input_type: InputType) -> Result<Ruleset, RuleParseError> {
        Ruleset::parse(input_type, &self.rule_text)
    }
}

/// Linear interpolation bounds: `low` scores 0 points, `high` scores 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    /// Interpolates `raw` between the bounds, clamped to [0,100].
    ///
    /// Returns `None` for non-finite input.
    pub fn interpolate(&self, raw: f64) -> Option<Score> {
        let span = self.high - self.low;
        if span == 0.0 || !raw.is_finite() {
            return None;
        }
        // Clamp before scaling so huge finite answers cannot overflow to infinity.
        let fraction = ((raw - self.low) / span).clamp(0.0, 1.0);
        Score::clamped(fraction * 100.0)
    }
}

/// One discrete rubric level with its fixed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricLevel {
    pub label: String,
    pub score: Score,
}

/// One selectable option and its point value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub points: f64,
}

/// Options for select-type KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionTable {
    pub options: Vec<SelectOption>,
    /// Raw-point maximum used for scaling, when declared.
    pub declared_max: Option<f64>,
}

impl OptionTable {
    /// Finds an option by label (case-insensitive, trimmed).
    pub fn find(&self, label: &str) -> Option<&SelectOption> {
        let wanted = label.trim();
        self.options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(wanted))
    }

    /// The maximum used to scale multi-select sums: the declared maximum,
    /// or the sum of all positive option points.
    pub fn scale_max(&self) -> f64 {
        self.declared_max.unwrap_or_else(|| {
            self.options
                .iter()
                .map(|o| o.points)
                .filter(|p| *p > 0.0)
                .sum()
        })
    }
}

/// Parsed, typed form of a stage rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ruleset {
    Thresholds(Thresholds),
    Rubric { levels: Vec<RubricLevel> },
    Options(OptionTable),
}

impl Ruleset {
    /// Parses rule text into the ruleset shape the input type requires.
    pub fn parse(input_type: InputType, text: &str) -> Result<Ruleset, RuleParseError> {
        let entries = parse_entries(text)?;

        match input_type {
            InputType::Numeric | InputType::Percentage | InputType::Calculation => {
                parse_thresholds(&entries).map(Ruleset::Thresholds)
            }
            InputType::Rubric => parse_rubric(&entries),
            InputType::SingleSelect | InputType::MultiSelect => {
                parse_options(&entries).map(Ruleset::Options)
            }
        }
    }

    /// Finds a rubric level by label (case-insensitive, trimmed).
    pub fn rubric_level(&self, label: &str) -> Option<&RubricLevel> {
        match self {
            Ruleset::Rubric { levels } => {
                let wanted = label.trim();
                levels.iter().find(|l| l.label.eq_ignore_ascii_case(wanted))
            }
            _ => None,
        }
    }
}

fn parse_entries(text: &str) -> Result<Vec<(String, f64)>, RuleParseError> {
    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();

    for raw in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| RuleParseError::MalformedEntry(raw.to_string()))?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(RuleParseError::MalformedEntry(raw.to_string()));
        }

        let number: f64 = value
            .parse()
            .ok()
            .filter(|n: &f64| n.is_finite())
            .ok_or_else(|| RuleParseError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
            })?;

        if !seen.insert(key.to_ascii_lowercase()) {
            return Err(RuleParseError::DuplicateKey(key.to_string()));
        }
        entries.push((key.to_string(), number));
    }

    if entries.is_empty() {
        return Err(RuleParseError::Empty);
    }
    Ok(entries)
}

fn parse_thresholds(entries: &[(String, f64)]) -> Result<Thresholds, RuleParseError> {
    let mut low = None;
    let mut high = None;

    for (key, value) in entries {
        match key.to_ascii_lowercase().as_str() {
            "min" => low = Some(*value),
            "max" => high = Some(*value),
            _ => return Err(RuleParseError::UnexpectedKey(key.clone())),
        }
    }

    let low = low.ok_or(RuleParseError::MissingKey("min"))?;
    let high = high.ok_or(RuleParseError::MissingKey("max"))?;
    if low == high {
        return Err(RuleParseError::DegenerateBounds(low));
    }
    Ok(Thresholds { low, high })
}

fn parse_rubric(entries: &[(String, f64)]) -> Result<Ruleset, RuleParseError> {
    let mut levels = Vec::with_capacity(entries.len());

    for (label, value) in entries {
        if label.starts_with('@') {
            return Err(RuleParseError::UnknownDirective(label.clone()));
        }
        let score = Score::try_new(*value).map_err(|_| RuleParseError::LevelOutOfRange {
            label: label.clone(),
            score: *value,
        })?;
        levels.push(RubricLevel {
            label: label.clone(),
            score,
        });
    }

    Ok(Ruleset::Rubric { levels })
}

fn parse_options(entries: &[(String, f64)]) -> Result<OptionTable, RuleParseError> {
    let mut options = Vec::with_capacity(entries.len());
    let mut declared_max = None;

    for (label, value) in entries {
        if label.eq_ignore_ascii_case(MAX_DIRECTIVE) {
            if *value <= 0.0 {
                return Err(RuleParseError::InvalidMaximum(*value));
            }
            declared_max = Some(*value);
        } else if label.starts_with('@') {
            return Err(RuleParseError::UnknownDirective(label.clone()));
        } else {
            options.push(SelectOption {
                label: label.clone(),
                points: *value,
            });
        }
    }

    if options.is_empty() {
        return Err(RuleParseError::Empty);
    }
    Ok(OptionTable {
        options,
        declared_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_thresholds() {
        let ruleset = Ruleset::parse(InputType::Numeric, "min=0; max=40").unwrap();
        assert_eq!(ruleset, Ruleset::Thresholds(Thresholds { low: 0.0, high: 40.0 }));
    }

    #[test]
    fn thresholds_accept_inverted_bounds() {
        let ruleset = Ruleset::parse(InputType::Percentage, "max=2;min=10").unwrap();
        match ruleset {
            Ruleset::Thresholds(t) => {
                assert_eq!(t.interpolate(10.0).unwrap().value(), 0.0);
                assert_eq!(t.interpolate(2.0).unwrap().value(), 100.0);
                assert_eq!(t.interpolate(6.0).unwrap().value(), 50.0);
            }
            other => panic!("Expected thresholds, got {:?}", other),
        }
    }

    #[test]
    fn threshold_keys_are_case_insensitive() {
        let ruleset = Ruleset::parse(InputType::Numeric, "MIN=0;Max=10").unwrap();
        assert_eq!(ruleset, Ruleset::Thresholds(Thresholds { low: 0.0, high: 10.0 }));
    }

    #[test]
    fn interpolation_clamps_huge_finite_values() {
        let t = Thresholds { low: 0.0, high: 40.0 };
        assert_eq!(t.interpolate(f64::MAX).unwrap().value(), 100.0);
        assert_eq!(t.interpolate(f64::MIN).unwrap().value(), 0.0);
        assert!(t.interpolate(f64::INFINITY).is_none());
    }

    #[test]
    fn thresholds_reject_degenerate_bounds() {
        assert_eq!(
            Ruleset::parse(InputType::Numeric, "min=5;max=5"),
            Err(RuleParseError::DegenerateBounds(5.0))
        );
    }

    #[test]
    fn thresholds_require_both_keys() {
        assert_eq!(
            Ruleset::parse(InputType::Numeric, "min=5"),
            Err(RuleParseError::MissingKey("max"))
        );
    }

    #[test]
    fn thresholds_reject_unexpected_keys() {
        assert_eq!(
            Ruleset::parse(InputType::Numeric, "min=0;max=10;target=5"),
            Err(RuleParseError::UnexpectedKey("target".to_string()))
        );
    }

    #[test]
    fn parses_rubric_levels_in_order() {
        let ruleset =
            Ruleset::parse(InputType::Rubric, "none=0;basic=50;established=75;advanced=100")
                .unwrap();

        match &ruleset {
            Ruleset::Rubric { levels } => {
                let labels: Vec<_> = levels.iter().map(|l| l.label.as_str()).collect();
                assert_eq!(labels, vec!["none", "basic", "established", "advanced"]);
            }
            other => panic!("Expected rubric, got {:?}", other),
        }
        assert_eq!(ruleset.rubric_level("Established").unwrap().score.value(), 75.0);
        assert!(ruleset.rubric_level("expert").is_none());
    }

    #[test]
    fn rubric_rejects_scores_outside_range() {
        assert!(matches!(
            Ruleset::parse(InputType::Rubric, "low=0;high=120"),
            Err(RuleParseError::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn parses_options_with_declared_max() {
        let ruleset =
            Ruleset::parse(InputType::MultiSelect, "seo=5;ads=5;referrals=5;events=3;@max=15")
                .unwrap();

        match ruleset {
            Ruleset::Options(table) => {
                assert_eq!(table.options.len(), 4);
                assert_eq!(table.declared_max, Some(15.0));
                assert_eq!(table.scale_max(), 15.0);
                assert_eq!(table.find(" ADS ").unwrap().points, 5.0);
            }
            other => panic!("Expected options, got {:?}", other),
        }
    }

    #[test]
    fn option_scale_max_defaults_to_positive_sum() {
        let table = parse_options(&[
            ("a".to_string(), 4.0),
            ("b".to_string(), 6.0),
            ("penalty".to_string(), -2.0),
        ])
        .unwrap();
        assert_eq!(table.scale_max(), 10.0);
    }

    #[test]
    fn options_reject_unknown_directive() {
        assert_eq!(
            Ruleset::parse(InputType::SingleSelect, "yes=100;@min=0"),
            Err(RuleParseError::UnknownDirective("@min".to_string()))
        );
    }

    #[test]
    fn options_reject_non_positive_max() {
        assert_eq!(
            Ruleset::parse(InputType::MultiSelect, "a=1;@max=0"),
            Err(RuleParseError::InvalidMaximum(0.0))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(Ruleset::parse(InputType::Numeric, "  ;  "), Err(RuleParseError::Empty));
        assert_eq!(
            Ruleset::parse(InputType::Numeric, "min:0"),
            Err(RuleParseError::MalformedEntry("min:0".to_string()))
        );
        assert!(matches!(
            Ruleset::parse(InputType::Numeric, "min=abc;max=3"),
            Err(RuleParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Ruleset::parse(InputType::Numeric, "min=inf;max=3"),
            Err(RuleParseError::InvalidNumber { .. })
        ));
        assert_eq!(
            Ruleset::parse(InputType::Numeric, "min=0;MIN=3"),
            Err(RuleParseError::DuplicateKey("MIN".to_string()))
        );
    }

    #[test]
    fn stage_rule_parses_own_text() {
        let rule = StageRule::new(
            KpiId::try_new("churn").unwrap(),
            GrowthStage::Seed,
            WeightLevel::X2,
            "min=10;max=2",
        );
        assert!(matches!(
            rule.ruleset(InputType::Percentage),
            Ok(Ruleset::Thresholds(_))
        ));
        assert!(rule.ruleset(InputType::Rubric).is_ok());
    }
}
