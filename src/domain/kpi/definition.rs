//! KPI definitions - what is measured, on which axis, and how it is answered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::{GrowthAxis, GrowthStage, KpiId};

/// How a KPI's raw answer is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Numeric,
    Percentage,
    Rubric,
    MultiSelect,
    SingleSelect,
    Calculation,
}

impl InputType {
    /// Returns the snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            InputType::Numeric => "numeric",
            InputType::Percentage => "percentage",
            InputType::Rubric => "rubric",
            InputType::MultiSelect => "multi_select",
            InputType::SingleSelect => "single_select",
            InputType::Calculation => "calculation",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A single diagnostic KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDefinition {
    pub id: KpiId,
    pub name: String,
    pub axis: GrowthAxis,
    pub input_type: InputType,
    /// Template with `{field}` placeholders; only used by calculation KPIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default)]
    pub applicable_stages: BTreeSet<GrowthStage>,
}

impl KpiDefinition {
    /// Creates a definition that applies to every stage.
    pub fn new(
        id: KpiId,
        name: impl Into<String>,
        axis: GrowthAxis,
        input_type: InputType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            axis,
            input_type,
            formula: None,
            applicable_stages: GrowthStage::ALL.iter().copied().collect(),
        }
    }

    /// Sets the calculation formula template.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Restricts the definition to the given stages.
    pub fn for_stages(mut self, stages: impl IntoIterator<Item = GrowthStage>) -> Self {
        self.applicable_stages = stages.into_iter().collect();
        self
    }

    /// Returns true if this KPI is evaluated at `stage`. An empty stage
    /// set applies everywhere.
    pub fn applies_to(&self, stage: GrowthStage) -> bool {
        self.applicable_stages.is_empty() || self.applicable_stages.contains(&stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> KpiId {
        KpiId::try_new(s).unwrap()
    }

    #[test]
    fn new_definition_applies_to_all_stages() {
        let kpi = KpiDefinition::new(id("mrr"), "MRR", GrowthAxis::Revenue, InputType::Numeric);
        assert!(GrowthStage::ALL.iter().all(|s| kpi.applies_to(*s)));
        assert!(kpi.formula.is_none());
    }

    #[test]
    fn for_stages_restricts_applicability() {
        let kpi = KpiDefinition::new(id("nrr"), "NRR", GrowthAxis::Revenue, InputType::Percentage)
            .for_stages([GrowthStage::SeriesA, GrowthStage::SeriesB]);

        assert!(kpi.applies_to(GrowthStage::SeriesA));
        assert!(!kpi.applies_to(GrowthStage::Seed));
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "burn_rate",
            "name": "Burn rate",
            "axis": "finance",
            "inputType": "calculation",
            "formula": "{expenses} - {revenue}",
            "applicableStages": ["seed", "series_a"]
        }"#;

        let kpi: KpiDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(kpi.id.as_str(), "burn_rate");
        assert_eq!(kpi.input_type, InputType::Calculation);
        assert_eq!(kpi.formula.as_deref(), Some("{expenses} - {revenue}"));
        assert_eq!(kpi.applicable_stages.len(), 2);
    }
}
