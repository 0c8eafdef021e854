//! Correlation Engine - Derived financial-health metrics from raw answers.
//!
//! Each metric combines raw values from several KPIs, maps the ratio onto
//! a 0-100 health score through a fixed curve, and derives a priority from
//! that score. A metric whose inputs are missing or invalid is omitted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::curve::ScoringCurve;
use super::processed::ProcessedKpiData;
use crate::domain::foundation::{KpiId, Priority, Score};
use crate::domain::kpi::KpiResponse;

/// Raw financial figures the derived metrics are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialInput {
    TotalRevenue,
    TotalUsers,
    NetBurn,
    NetNewArr,
    Cac,
    GrossMargin,
    Ltv,
}

impl FinancialInput {
    pub const ALL: [FinancialInput; 7] = [
        FinancialInput::TotalRevenue,
        FinancialInput::TotalUsers,
        FinancialInput::NetBurn,
        FinancialInput::NetNewArr,
        FinancialInput::Cac,
        FinancialInput::GrossMargin,
        FinancialInput::Ltv,
    ];

    /// Default KPI id bound to this input.
    pub fn default_kpi_id(&self) -> &'static str {
        match self {
            FinancialInput::TotalRevenue => "total_revenue",
            FinancialInput::TotalUsers => "total_users",
            FinancialInput::NetBurn => "net_burn",
            FinancialInput::NetNewArr => "net_new_arr",
            FinancialInput::Cac => "cac",
            FinancialInput::GrossMargin => "gross_margin",
            FinancialInput::Ltv => "ltv",
        }
    }
}

/// Where a financial input is read from: a KPI's numeric answer, or one
/// named field of a `fields` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBinding {
    pub kpi_id: KpiId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl MetricBinding {
    pub fn kpi(kpi_id: KpiId) -> Self {
        Self { kpi_id, field: None }
    }

    pub fn field(kpi_id: KpiId, field: impl Into<String>) -> Self {
        Self {
            kpi_id,
            field: Some(field.into()),
        }
    }
}

/// Binding of every financial input to its source KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricBindings(BTreeMap<FinancialInput, MetricBinding>);

impl Default for MetricBindings {
    fn default() -> Self {
        let bindings = FinancialInput::ALL
            .iter()
            .filter_map(|input| {
                KpiId::try_new(input.default_kpi_id())
                    .ok()
                    .map(|id| (*input, MetricBinding::kpi(id)))
            })
            .collect();
        Self(bindings)
    }
}

impl MetricBindings {
    /// Rebinds one input.
    pub fn with(mut self, input: FinancialInput, binding: MetricBinding) -> Self {
        self.0.insert(input, binding);
        self
    }

    pub fn get(&self, input: FinancialInput) -> Option<&MetricBinding> {
        self.0.get(&input)
    }
}

/// Derived metric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedMetric {
    Arpu,
    BurnMultiple,
    CacPayback,
    LtvToCac,
    GrowthEfficiency,
}

const ARPU_CURVE: ScoringCurve =
    ScoringCurve::new(&[(0.0, 0.0), (10.0, 25.0), (50.0, 50.0), (200.0, 75.0), (1000.0, 100.0)]);
const BURN_MULTIPLE_CURVE: ScoringCurve = ScoringCurve::new(&[
    (0.0, 100.0),
    (1.0, 90.0),
    (1.5, 75.0),
    (2.0, 60.0),
    (3.0, 35.0),
    (5.0, 0.0),
]);
const CAC_PAYBACK_CURVE: ScoringCurve = ScoringCurve::new(&[
    (0.0, 100.0),
    (6.0, 100.0),
    (12.0, 75.0),
    (18.0, 50.0),
    (24.0, 25.0),
    (36.0, 0.0),
]);
const LTV_TO_CAC_CURVE: ScoringCurve =
    ScoringCurve::new(&[(0.0, 0.0), (1.0, 10.0), (3.0, 75.0), (5.0, 100.0)]);
const GROWTH_EFFICIENCY_CURVE: ScoringCurve =
    ScoringCurve::new(&[(0.0, 0.0), (0.5, 40.0), (1.0, 70.0), (2.0, 100.0)]);

impl DerivedMetric {
    pub const ALL: [DerivedMetric; 5] = [
        DerivedMetric::Arpu,
        DerivedMetric::BurnMultiple,
        DerivedMetric::CacPayback,
        DerivedMetric::LtvToCac,
        DerivedMetric::GrowthEfficiency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DerivedMetric::Arpu => "ARPU",
            DerivedMetric::BurnMultiple => "Burn Multiple",
            DerivedMetric::CacPayback => "CAC Payback Period",
            DerivedMetric::LtvToCac => "LTV/CAC Ratio",
            DerivedMetric::GrowthEfficiency => "Growth Efficiency",
        }
    }

    /// Health curve for the raw ratio.
    pub fn curve(&self) -> ScoringCurve {
        match self {
            DerivedMetric::Arpu => ARPU_CURVE,
            DerivedMetric::BurnMultiple => BURN_MULTIPLE_CURVE,
            DerivedMetric::CacPayback => CAC_PAYBACK_CURVE,
            DerivedMetric::LtvToCac => LTV_TO_CAC_CURVE,
            DerivedMetric::GrowthEfficiency => GROWTH_EFFICIENCY_CURVE,
        }
    }

    fn describe(&self, raw: f64) -> String {
        match self {
            DerivedMetric::Arpu => format!("Average revenue per user is {:.2}", raw),
            DerivedMetric::BurnMultiple => {
                format!("Burning {:.2} for every unit of net new ARR", raw)
            }
            DerivedMetric::CacPayback => {
                format!("Customer acquisition cost pays back in {:.1} months", raw)
            }
            DerivedMetric::LtvToCac => format!("Lifetime value is {:.2}x acquisition cost", raw),
            DerivedMetric::GrowthEfficiency => {
                format!("Each unit of net burn yields {:.2} of net new ARR", raw)
            }
        }
    }
}

/// A derived metric with its health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationInsight {
    pub metric: DerivedMetric,
    pub description: String,
    pub raw_value: f64,
    pub score: Score,
    pub priority: Priority,
    pub contributing_kpis: Vec<KpiId>,
}

/// Raw financial values read for one evaluation.
struct FinancialValues<'a> {
    values: BTreeMap<FinancialInput, (f64, &'a KpiId)>,
}

impl<'a> FinancialValues<'a> {
    fn read(
        responses: &'a [KpiResponse],
        processed: &[ProcessedKpiData],
        bindings: &'a MetricBindings,
    ) -> Self {
        let mut values = BTreeMap::new();
        for input in FinancialInput::ALL {
            let Some(binding) = bindings.get(input) else {
                continue;
            };
            if !processed.iter().any(|p| p.id() == &binding.kpi_id) {
                continue;
            }
            let raw = responses
                .iter()
                .find(|r| r.kpi_id == binding.kpi_id)
                .and_then(|r| r.value.raw_number(binding.field.as_deref()));
            if let Some(raw) = raw {
                values.insert(input, (raw, &binding.kpi_id));
            }
        }
        Self { values }
    }

    fn get(&self, input: FinancialInput) -> Option<f64> {
        self.values.get(&input).map(|(v, _)| *v)
    }

    fn kpis(&self, inputs: &[FinancialInput]) -> Vec<KpiId> {
        let mut seen = BTreeSet::new();
        inputs
            .iter()
            .filter_map(|i| self.values.get(i).map(|(_, id)| *id))
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    fn arpu(&self) -> Option<f64> {
        let revenue = self.get(FinancialInput::TotalRevenue)?;
        let users = self.get(FinancialInput::TotalUsers)?;
        (users > 0.0 && revenue >= 0.0).then(|| revenue / users)
    }

    /// Gross margin as a fraction in (0, 1]; percentages are accepted.
    fn gross_margin(&self) -> Option<f64> {
        let raw = self.get(FinancialInput::GrossMargin)?;
        let margin = if raw > 1.0 { raw / 100.0 } else { raw };
        (margin > 0.0 && margin <= 1.0).then_some(margin)
    }
}

/// Derived metric computation.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Derives every computable metric from raw responses.
    ///
    /// Only KPIs present in `processed` (applicable at the evaluated stage)
    /// contribute. Each metric is computed independently.
    pub fn derive_insights(
        responses: &[KpiResponse],
        processed: &[ProcessedKpiData],
        bindings: &MetricBindings,
    ) -> Vec<CorrelationInsight> {
        let values = FinancialValues::read(responses, processed, bindings);

        DerivedMetric::ALL
            .iter()
            .filter_map(|metric| {
                let insight = Self::derive(*metric, &values);
                if insight.is_none() {
                    tracing::debug!(metric = ?metric, "derived metric omitted");
                }
                insight
            })
            .collect()
    }

    fn derive(metric: DerivedMetric, values: &FinancialValues<'_>) -> Option<CorrelationInsight> {
        use FinancialInput::*;

        let (raw, inputs): (f64, &[FinancialInput]) = match metric {
            DerivedMetric::Arpu => (values.arpu()?, &[TotalRevenue, TotalUsers][..]),
            DerivedMetric::BurnMultiple => {
                let burn = values.get(NetBurn)?;
                let arr = values.get(NetNewArr)?;
                if arr <= 0.0 || burn < 0.0 {
                    return None;
                }
                (burn / arr, &[NetBurn, NetNewArr][..])
            }
            DerivedMetric::CacPayback => {
                let cac = values.get(Cac)?;
                if cac <= 0.0 {
                    return None;
                }
                let denominator = values.arpu()? * values.gross_margin()?;
                if denominator <= 0.0 {
                    return None;
                }
                (cac / denominator, &[Cac, TotalRevenue, TotalUsers, GrossMargin][..])
            }
            DerivedMetric::LtvToCac => {
                let ltv = values.get(Ltv)?;
                let cac = values.get(Cac)?;
                if cac <= 0.0 || ltv < 0.0 {
                    return None;
                }
                (ltv / cac, &[Ltv, Cac][..])
            }
            DerivedMetric::GrowthEfficiency => {
                let arr = values.get(NetNewArr)?;
                let burn = values.get(NetBurn)?;
                if burn <= 0.0 {
                    return None;
                }
                (arr / burn, &[NetNewArr, NetBurn][..])
            }
        };

        if !raw.is_finite() {
            return None;
        }
        let score = metric.curve().score(raw)?;

        Some(CorrelationInsight {
            metric,
            description: metric.describe(raw),
            raw_value: raw,
            score,
            priority: Priority::from_health(score),
            contributing_kpis: values.kpis(inputs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{GrowthAxis, WeightLevel};
    use crate::domain::kpi::{InputType, KpiDefinition};
    use crate::domain::scoring::normalizer::{IncompleteReason, NormalizedResult};

    fn id(s: &str) -> KpiId {
        KpiId::try_new(s).unwrap()
    }

    fn processed(ids: &[&str]) -> Vec<ProcessedKpiData> {
        ids.iter()
            .map(|s| {
                ProcessedKpiData::new(
                    KpiDefinition::new(id(s), *s, GrowthAxis::Finance, InputType::Numeric),
                    WeightLevel::X1,
                    NormalizedResult::Incomplete {
                        reason: IncompleteReason::MissingRule,
                    },
                    None,
                )
            })
            .collect()
    }

    fn all_ids() -> Vec<&'static str> {
        FinancialInput::ALL.iter().map(|i| i.default_kpi_id()).collect()
    }

    fn responses(values: &[(&str, f64)]) -> Vec<KpiResponse> {
        values.iter().map(|(k, v)| KpiResponse::number(id(k), *v)).collect()
    }

    fn healthy() -> Vec<KpiResponse> {
        responses(&[
            ("total_revenue", 100_000.0),
            ("total_users", 1_000.0),
            ("net_burn", 50_000.0),
            ("net_new_arr", 100_000.0),
            ("cac", 600.0),
            ("gross_margin", 75.0),
            ("ltv", 3_000.0),
        ])
    }

    fn derive_all(input: &[KpiResponse]) -> Vec<CorrelationInsight> {
        let bindings = MetricBindings::default();
        CorrelationEngine::derive_insights(input, &processed(&all_ids()), &bindings)
    }

    fn metric(
        insights: &[CorrelationInsight],
        metric: DerivedMetric,
    ) -> Option<&CorrelationInsight> {
        insights.iter().find(|i| i.metric == metric)
    }

    #[test]
    fn derives_every_metric_from_complete_inputs() {
        let insights = derive_all(&healthy());
        assert_eq!(insights.len(), 5);

        let arpu = metric(&insights, DerivedMetric::Arpu).unwrap();
        assert_eq!(arpu.raw_value, 100.0);
        assert_eq!(arpu.contributing_kpis, vec![id("total_revenue"), id("total_users")]);

        let burn = metric(&insights, DerivedMetric::BurnMultiple).unwrap();
        assert_eq!(burn.raw_value, 0.5);
        assert_eq!(burn.score.value(), 95.0);
        assert_eq!(burn.priority, Priority::Low);

        // 600 / (100 * 0.75) = 8 months
        let payback = metric(&insights, DerivedMetric::CacPayback).unwrap();
        assert!((payback.raw_value - 8.0).abs() < 1e-9);

        let ltv_cac = metric(&insights, DerivedMetric::LtvToCac).unwrap();
        assert_eq!(ltv_cac.raw_value, 5.0);
        assert_eq!(ltv_cac.score.value(), 100.0);

        let efficiency = metric(&insights, DerivedMetric::GrowthEfficiency).unwrap();
        assert_eq!(efficiency.raw_value, 2.0);
    }

    #[test]
    fn zero_cac_omits_payback_and_ltv_ratio_only() {
        let mut input = healthy();
        input.retain(|r| r.kpi_id.as_str() != "cac");
        input.push(KpiResponse::number(id("cac"), 0.0));

        let insights = derive_all(&input);

        assert!(metric(&insights, DerivedMetric::CacPayback).is_none());
        assert!(metric(&insights, DerivedMetric::LtvToCac).is_none());
        assert!(metric(&insights, DerivedMetric::Arpu).is_some());
        assert!(metric(&insights, DerivedMetric::BurnMultiple).is_some());
        assert!(metric(&insights, DerivedMetric::GrowthEfficiency).is_some());
        assert!(insights.iter().all(|i| i.raw_value.is_finite()));
    }

    #[test]
    fn zero_users_omits_arpu_and_payback() {
        let input = responses(&[
            ("total_revenue", 5_000.0),
            ("total_users", 0.0),
            ("cac", 100.0),
            ("gross_margin", 0.8),
        ]);
        let insights = derive_all(&input);
        assert!(insights.is_empty());
    }

    #[test]
    fn negative_net_new_arr_omits_burn_multiple() {
        let input = responses(&[("net_burn", 10_000.0), ("net_new_arr", -2_000.0)]);
        let insights = derive_all(&input);
        assert!(metric(&insights, DerivedMetric::BurnMultiple).is_none());
        let efficiency = metric(&insights, DerivedMetric::GrowthEfficiency).unwrap();
        assert_eq!(efficiency.score.value(), 0.0);
        assert_eq!(efficiency.priority, Priority::Critical);
    }

    #[test]
    fn zero_burn_is_a_perfect_burn_multiple() {
        let input = responses(&[("net_burn", 0.0), ("net_new_arr", 20_000.0)]);
        let insights = derive_all(&input);
        assert_eq!(metric(&insights, DerivedMetric::BurnMultiple).unwrap().score.value(), 100.0);
        assert!(metric(&insights, DerivedMetric::GrowthEfficiency).is_none());
    }

    #[test]
    fn gross_margin_out_of_range_omits_payback() {
        let input = responses(&[
            ("total_revenue", 1_000.0),
            ("total_users", 10.0),
            ("cac", 100.0),
            ("gross_margin", 250.0),
        ]);
        let insights = derive_all(&input);
        assert!(metric(&insights, DerivedMetric::CacPayback).is_none());
        assert!(metric(&insights, DerivedMetric::Arpu).is_some());
    }

    #[test]
    fn kpis_not_applicable_at_stage_are_ignored() {
        let insights = CorrelationEngine::derive_insights(
            &healthy(),
            &processed(&["total_revenue", "total_users"]),
            &MetricBindings::default(),
        );
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].metric, DerivedMetric::Arpu);
    }

    #[test]
    fn bindings_can_read_fields_of_a_calculation_answer() {
        let unit = id("unit_economics");
        let bindings = MetricBindings::default()
            .with(FinancialInput::TotalRevenue, MetricBinding::field(unit.clone(), "revenue"))
            .with(FinancialInput::TotalUsers, MetricBinding::field(unit.clone(), "users"));
        let input = vec![KpiResponse::fields(unit, [("revenue", 2_000.0), ("users", 40.0)])];

        let insights =
            CorrelationEngine::derive_insights(&input, &processed(&["unit_economics"]), &bindings);

        let arpu = metric(&insights, DerivedMetric::Arpu).unwrap();
        assert_eq!(arpu.raw_value, 50.0);
        assert_eq!(arpu.score.value(), 50.0);
        assert_eq!(arpu.contributing_kpis, vec![id("unit_economics")]);
    }
}
