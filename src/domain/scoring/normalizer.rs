//! Normalizer - Converts one raw KPI response into a 0-100 score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::formula::{Formula, FormulaError};
use crate::domain::foundation::Score;
use crate::domain::kpi::{
    InputType, KpiDefinition, KpiResponse, OptionTable, ResponseValue, Ruleset, StageRule,
    Thresholds,
};

/// Why a KPI could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum IncompleteReason {
    Unanswered,
    MissingRule,
    MalformedRule(String),
    ShapeMismatch { expected: String, actual: String },
    UnknownLevel(String),
    UnknownOption(String),
    MissingFormula,
    InvalidFormula(String),
    UnresolvedVariable(String),
    DivisionByZero,
    NonFinite,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::Unanswered => write!(f, "no response provided"),
            IncompleteReason::MissingRule => write!(f, "no scoring rule for this stage"),
            IncompleteReason::MalformedRule(e) => write!(f, "malformed scoring rule: {}", e),
            IncompleteReason::ShapeMismatch { expected, actual } => {
                write!(f, "expected a {} response, got {}", expected, actual)
            }
            IncompleteReason::UnknownLevel(l) => write!(f, "unknown rubric level '{}'", l),
            IncompleteReason::UnknownOption(o) => write!(f, "unknown option '{}'", o),
            IncompleteReason::MissingFormula => write!(f, "calculation KPI has no formula"),
            IncompleteReason::InvalidFormula(e) => write!(f, "invalid formula: {}", e),
            IncompleteReason::UnresolvedVariable(v) => write!(f, "unresolved variable '{}'", v),
            IncompleteReason::DivisionByZero => write!(f, "division by zero"),
            IncompleteReason::NonFinite => write!(f, "value is not a finite number"),
        }
    }
}

/// Outcome of normalizing a single KPI.
///
/// An incomplete KPI is never coerced to a zero score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NormalizedResult {
    Scored { score: Score },
    Incomplete { reason: IncompleteReason },
}

impl NormalizedResult {
    fn incomplete(reason: IncompleteReason) -> Self {
        NormalizedResult::Incomplete { reason }
    }

    /// Returns the score if the KPI was scored.
    pub fn score(&self) -> Option<Score> {
        match self {
            NormalizedResult::Scored { score } => Some(*score),
            NormalizedResult::Incomplete { .. } => None,
        }
    }

    /// Returns true if the KPI was scored.
    pub fn is_complete(&self) -> bool {
        matches!(self, NormalizedResult::Scored { .. })
    }

    /// Returns the reason if the KPI is incomplete.
    pub fn incomplete_reason(&self) -> Option<&IncompleteReason> {
        match self {
            NormalizedResult::Scored { .. } => None,
            NormalizedResult::Incomplete { reason } => Some(reason),
        }
    }
}

impl From<Result<Score, IncompleteReason>> for NormalizedResult {
    fn from(result: Result<Score, IncompleteReason>) -> Self {
        match result {
            Ok(score) => NormalizedResult::Scored { score },
            Err(reason) => NormalizedResult::incomplete(reason),
        }
    }
}

/// Stateless KPI normalization.
pub struct Normalizer;

impl Normalizer {
    /// Normalizes one KPI response against its stage rule.
    ///
    /// # Edge Cases
    /// - Malformed rule text: `Incomplete(MalformedRule)`, checked before the response
    /// - Missing response: `Incomplete(Unanswered)`
    /// - Out-of-range numeric values clamp to [0,100]
    /// - Calculation placeholders resolve only from this KPI's own fields
    pub fn normalize(
        kpi: &KpiDefinition,
        rule: &StageRule,
        response: Option<&KpiResponse>,
    ) -> NormalizedResult {
        let ruleset = match rule.ruleset(kpi.input_type) {
            Ok(ruleset) => ruleset,
            Err(e) => {
                return NormalizedResult::incomplete(IncompleteReason::MalformedRule(e.to_string()))
            }
        };

        let Some(response) = response else {
            return NormalizedResult::incomplete(IncompleteReason::Unanswered);
        };

        Self::score_value(kpi, &ruleset, &response.value).into()
    }

    fn score_value(
        kpi: &KpiDefinition,
        ruleset: &Ruleset,
        value: &ResponseValue,
    ) -> Result<Score, IncompleteReason> {
        match (kpi.input_type, ruleset, value) {
            (
                InputType::Numeric | InputType::Percentage,
                Ruleset::Thresholds(t),
                ResponseValue::Number(raw),
            ) => Self::interpolate(t, *raw),
            (InputType::Rubric, Ruleset::Rubric { .. }, ResponseValue::Choice(label)) => ruleset
                .rubric_level(label)
                .map(|level| level.score)
                .ok_or_else(|| IncompleteReason::UnknownLevel(label.clone())),
            (InputType::SingleSelect, Ruleset::Options(table), ResponseValue::Choice(label)) => {
                Self::single_select(table, label)
            }
            (InputType::MultiSelect, Ruleset::Options(table), ResponseValue::Choices(labels)) => {
                Self::multi_select(table, labels)
            }
            (InputType::Calculation, Ruleset::Thresholds(t), ResponseValue::Fields(fields)) => {
                let raw = Self::calculate(kpi, |name| fields.get(name).copied())?;
                Self::interpolate(t, raw)
            }
            (input_type, _, value) => Err(IncompleteReason::ShapeMismatch {
                expected: Self::expected_shape(input_type).to_string(),
                actual: value.shape().to_string(),
            }),
        }
    }

    /// The response shape each input type requires.
    pub fn expected_shape(input_type: InputType) -> &'static str {
        match input_type {
            InputType::Numeric | InputType::Percentage => "number",
            InputType::Rubric | InputType::SingleSelect => "choice",
            InputType::MultiSelect => "choices",
            InputType::Calculation => "fields",
        }
    }

    fn interpolate(thresholds: &Thresholds, raw: f64) -> Result<Score, IncompleteReason> {
        thresholds.interpolate(raw).ok_or(IncompleteReason::NonFinite)
    }

    fn single_select(table: &OptionTable, label: &str) -> Result<Score, IncompleteReason> {
        let option = table
            .find(label)
            .ok_or_else(|| IncompleteReason::UnknownOption(label.to_string()))?;

        let scaled = match table.declared_max {
            Some(max) => option.points / max * 100.0,
            None => option.points,
        };
        Score::clamped(scaled).ok_or(IncompleteReason::NonFinite)
    }

    fn multi_select(table: &OptionTable, labels: &[String]) -> Result<Score, IncompleteReason> {
        let max = table.scale_max();
        if max <= 0.0 {
            return Err(IncompleteReason::MalformedRule(
                "options carry no positive points to scale against".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        let mut total = 0.0;
        for label in labels {
            let option = table
                .find(label)
                .ok_or_else(|| IncompleteReason::UnknownOption(label.clone()))?;
            if seen.insert(option.label.as_str()) {
                total += option.points;
            }
        }

        Score::clamped(total / max * 100.0).ok_or(IncompleteReason::NonFinite)
    }

    fn calculate<F>(kpi: &KpiDefinition, resolve: F) -> Result<f64, IncompleteReason>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let template = kpi.formula.as_deref().ok_or(IncompleteReason::MissingFormula)?;
        let formula =
            Formula::parse(template).map_err(|e| IncompleteReason::InvalidFormula(e.to_string()))?;

        formula.evaluate(resolve).map_err(|e| match e {
            FormulaError::UnresolvedVariable(name) => IncompleteReason::UnresolvedVariable(name),
            FormulaError::DivisionByZero => IncompleteReason::DivisionByZero,
            FormulaError::NonFinite => IncompleteReason::NonFinite,
            other => IncompleteReason::InvalidFormula(other.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "normalizer_test.rs"]
mod normalizer_test;
