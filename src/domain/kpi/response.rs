//! Raw diagnostic answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::KpiId;

/// The raw value of an answer, shaped by the KPI's input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseValue {
    /// numeric and percentage KPIs
    Number(f64),
    /// rubric and single-select KPIs
    Choice(String),
    /// multi-select KPIs
    Choices(Vec<String>),
    /// calculation KPIs: named operands for the formula
    Fields(BTreeMap<String, f64>),
}

impl ResponseValue {
    /// Short name of the value shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            ResponseValue::Number(_) => "number",
            ResponseValue::Choice(_) => "choice",
            ResponseValue::Choices(_) => "choices",
            ResponseValue::Fields(_) => "fields",
        }
    }

    /// Reads a raw number: the value itself, or a named field.
    pub fn raw_number(&self, field: Option<&str>) -> Option<f64> {
        match (self, field) {
            (ResponseValue::Number(v), None) => Some(*v),
            (ResponseValue::Fields(fields), Some(name)) => fields.get(name).copied(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }
}

/// An answer to one KPI for the evaluated entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub kpi_id: KpiId,
    pub value: ResponseValue,
}

impl KpiResponse {
    /// Creates a response with any value shape.
    pub fn new(kpi_id: KpiId, value: ResponseValue) -> Self {
        Self { kpi_id, value }
    }

    /// Creates a numeric response.
    pub fn number(kpi_id: KpiId, value: f64) -> Self {
        Self::new(kpi_id, ResponseValue::Number(value))
    }

    /// Creates a single-choice response.
    pub fn choice(kpi_id: KpiId, choice: impl Into<String>) -> Self {
        Self::new(kpi_id, ResponseValue::Choice(choice.into()))
    }

    /// Creates a multi-choice response.
    pub fn choices<S: Into<String>>(kpi_id: KpiId, choices: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            kpi_id,
            ResponseValue::Choices(choices.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a calculation response from named fields.
    pub fn fields<S: Into<String>>(
        kpi_id: KpiId,
        fields: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        Self::new(
            kpi_id,
            ResponseValue::Fields(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        )
    }
}
