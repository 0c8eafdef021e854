//! Axis Aggregator - Weighted roll-up of KPI scores per growth axis.

use serde::{Deserialize, Serialize};

use super::benchmark::BenchmarkResult;
use super::processed::ProcessedKpiData;
use super::settings::AxisWeights;
use crate::domain::foundation::{GrowthAxis, KpiId, Score, ScoreStatus, Trend};

/// Aggregated score for one growth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScore {
    pub axis: GrowthAxis,
    /// `None` when the axis has no complete KPI (insufficient data).
    pub score: Option<Score>,
    pub trend: Trend,
    pub status: ScoreStatus,
    pub complete_kpis: usize,
    pub applicable_kpis: usize,
    /// KPIs grouped under this axis, in input order.
    pub kpis: Vec<KpiId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkResult>,
}

impl AxisScore {
    /// Attaches a benchmark result; an available comparison decides the status.
    pub fn with_benchmark(mut self, benchmark: BenchmarkResult) -> Self {
        if let Some(comparison) = benchmark.comparison() {
            self.status = comparison.status;
        }
        self.benchmark = Some(benchmark);
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    /// Completion of this axis's applicable KPIs.
    pub fn completion(&self) -> CompletionRate {
        CompletionRate::new(self.complete_kpis, self.applicable_kpis)
    }
}

/// Share of applicable KPIs that could be scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRate {
    pub complete: usize,
    pub applicable: usize,
    /// 0.0-1.0; 0.0 when nothing is applicable.
    pub rate: f64,
}

impl CompletionRate {
    pub fn new(complete: usize, applicable: usize) -> Self {
        let rate = if applicable == 0 {
            0.0
        } else {
            complete as f64 / applicable as f64
        };
        Self {
            complete,
            applicable,
            rate,
        }
    }
}

/// Weighted aggregation of KPI and axis scores.
pub struct AxisAggregator;

impl AxisAggregator {
    /// Aggregates processed KPIs into one score per axis, in canonical
    /// axis order.
    ///
    /// Incomplete KPIs count toward `applicable_kpis` only; they never pull
    /// the average toward zero.
    pub fn aggregate_axis(processed: &[ProcessedKpiData]) -> Vec<AxisScore> {
        GrowthAxis::ALL
            .iter()
            .map(|axis| {
                let members: Vec<&ProcessedKpiData> =
                    processed.iter().filter(|p| p.axis() == *axis).collect();
                let score = Self::weighted_mean(
                    members
                        .iter()
                        .filter_map(|p| p.score().map(|s| (s, p.weight.multiplier() as f64))),
                );

                AxisScore {
                    axis: *axis,
                    score,
                    trend: Trend::Unknown,
                    status: ScoreStatus::from_score(score),
                    complete_kpis: members.iter().filter(|p| p.is_complete()).count(),
                    applicable_kpis: members.len(),
                    kpis: members.iter().map(|p| p.id().clone()).collect(),
                    benchmark: None,
                }
            })
            .collect()
    }

    /// Σ(score × weight) / Σ(weight); `None` when nothing carries weight.
    pub fn weighted_mean(entries: impl IntoIterator<Item = (Score, f64)>) -> Option<Score> {
        let (weighted, total) = entries
            .into_iter()
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .fold((0.0, 0.0), |(sum, total), (score, w)| {
                (sum + score.value() * w, total + w)
            });

        if total > 0.0 {
            Score::clamped(weighted / total)
        } else {
            None
        }
    }

    /// Weighted mean of the defined axis scores.
    pub fn aggregate_overall(axes: &[AxisScore], weights: &AxisWeights) -> Option<Score> {
        Self::weighted_mean(
            axes.iter()
                .filter_map(|a| a.score.map(|s| (s, weights.weight(a.axis)))),
        )
    }

    /// Completion over all applicable KPIs.
    pub fn completion_rate(processed: &[ProcessedKpiData]) -> CompletionRate {
        CompletionRate::new(
            processed.iter().filter(|p| p.is_complete()).count(),
            processed.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{GrowthStage, WeightLevel};
    use crate::domain::kpi::{InputType, KpiDefinition};
    use crate::domain::scoring::benchmark::{BenchmarkComparison, BenchmarkKey};
    use crate::domain::scoring::normalizer::{IncompleteReason, NormalizedResult};

    fn kpi(
        id: &str,
        axis: GrowthAxis,
        weight: WeightLevel,
        score: Option<f64>,
    ) -> ProcessedKpiData {
        let result = match score {
            Some(v) => NormalizedResult::Scored {
                score: Score::try_new(v).unwrap(),
            },
            None => NormalizedResult::Incomplete {
                reason: IncompleteReason::Unanswered,
            },
        };
        ProcessedKpiData::new(
            KpiDefinition::new(KpiId::try_new(id).unwrap(), id, axis, InputType::Numeric),
            weight,
            result,
            None,
        )
    }

    fn axis<'a>(scores: &'a [AxisScore], axis: GrowthAxis) -> &'a AxisScore {
        scores.iter().find(|a| a.axis == axis).unwrap()
    }

    #[test]
    fn weighted_mean_matches_hand_computation() {
        let processed = vec![
            kpi("a", GrowthAxis::Product, WeightLevel::X1, Some(40.0)),
            kpi("b", GrowthAxis::Product, WeightLevel::X2, Some(60.0)),
            kpi("c", GrowthAxis::Product, WeightLevel::X3, Some(90.0)),
        ];
        let axes = AxisAggregator::aggregate_axis(&processed);
        let product = axis(&axes, GrowthAxis::Product);
        assert!((product.score.unwrap().value() - 430.0 / 6.0).abs() < 1e-9);
        assert_eq!(product.complete_kpis, 3);
    }

    #[test]
    fn emits_every_axis_in_canonical_order() {
        let axes = AxisAggregator::aggregate_axis(&[]);
        let order: Vec<GrowthAxis> = axes.iter().map(|a| a.axis).collect();
        assert_eq!(order, GrowthAxis::ALL.to_vec());
        assert!(axes.iter().all(|a| a.score.is_none()));
        assert!(axes.iter().all(|a| a.status == ScoreStatus::InsufficientData));
    }

    #[test]
    fn incomplete_kpi_lowers_completion_not_average() {
        let processed = vec![
            kpi("a", GrowthAxis::Market, WeightLevel::X1, Some(80.0)),
            kpi("b", GrowthAxis::Market, WeightLevel::X3, None),
        ];
        let axes = AxisAggregator::aggregate_axis(&processed);
        let market = axis(&axes, GrowthAxis::Market);

        assert_eq!(market.score.unwrap().value(), 80.0);
        assert_eq!(market.completion().rate, 0.5);
        assert_eq!(AxisAggregator::completion_rate(&processed).rate, 0.5);
    }

    #[test]
    fn axis_without_complete_kpis_has_no_score() {
        let processed = vec![kpi("a", GrowthAxis::Finance, WeightLevel::X2, None)];
        let axes = AxisAggregator::aggregate_axis(&processed);
        let finance = axis(&axes, GrowthAxis::Finance);
        assert!(finance.score.is_none());
        assert_eq!(finance.applicable_kpis, 1);
        assert_eq!(finance.status, ScoreStatus::InsufficientData);
    }

    #[test]
    fn overall_skips_undefined_axes() {
        let processed = vec![
            kpi("a", GrowthAxis::Market, WeightLevel::X1, Some(80.0)),
            kpi("b", GrowthAxis::Finance, WeightLevel::X1, Some(40.0)),
        ];
        let axes = AxisAggregator::aggregate_axis(&processed);
        let overall = AxisAggregator::aggregate_overall(&axes, &AxisWeights::equal()).unwrap();
        assert_eq!(overall.value(), 60.0);

        let finance_heavy = AxisWeights::equal().with(GrowthAxis::Finance, 3.0);
        let weighted = AxisAggregator::aggregate_overall(&axes, &finance_heavy).unwrap();
        assert_eq!(weighted.value(), 50.0);
    }

    #[test]
    fn overall_without_data_is_none() {
        let axes = AxisAggregator::aggregate_axis(&[]);
        assert!(AxisAggregator::aggregate_overall(&axes, &AxisWeights::equal()).is_none());
        assert_eq!(AxisAggregator::completion_rate(&[]).rate, 0.0);
    }

    #[test]
    fn zero_weighted_axis_is_ignored() {
        let processed = vec![
            kpi("a", GrowthAxis::Market, WeightLevel::X1, Some(80.0)),
            kpi("b", GrowthAxis::Finance, WeightLevel::X1, Some(40.0)),
        ];
        let axes = AxisAggregator::aggregate_axis(&processed);
        let no_finance = AxisWeights::equal().with(GrowthAxis::Finance, 0.0);
        let overall = AxisAggregator::aggregate_overall(&axes, &no_finance).unwrap();
        assert_eq!(overall.value(), 80.0);
    }

    #[test]
    fn available_benchmark_sets_status() {
        let processed = vec![kpi("a", GrowthAxis::Revenue, WeightLevel::X1, Some(90.0))];
        let revenue = AxisAggregator::aggregate_axis(&processed)
            .into_iter()
            .find(|a| a.axis == GrowthAxis::Revenue)
            .unwrap();

        let comparison = BenchmarkComparison {
            percentile: 30.0,
            status: ScoreStatus::Fair,
            gap: 5.0,
            peer_average: 85.0,
            peer_count: 10,
        };
        let benchmarked = revenue.clone().with_benchmark(BenchmarkResult::Available(comparison));
        assert_eq!(benchmarked.status, ScoreStatus::Fair);

        let unavailable = revenue.with_benchmark(BenchmarkResult::Unavailable {
            key: BenchmarkKey::for_axis("SaaS", GrowthStage::Seed, GrowthAxis::Revenue),
        });
        assert_eq!(unavailable.status, ScoreStatus::Excellent);
    }
}
