//! Benchmark Comparator - Positions scores within peer distributions.

use serde::{Deserialize, Serialize};

use super::processed::BenchmarkInfo;
use crate::domain::foundation::{GrowthAxis, GrowthStage, KpiId, Score, ScoreStatus};

/// Lookup key for a peer distribution. `axis: None` addresses the
/// overall-score distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkKey {
    pub sector: String,
    pub stage: GrowthStage,
    pub axis: Option<GrowthAxis>,
}

impl BenchmarkKey {
    pub fn overall(sector: impl Into<String>, stage: GrowthStage) -> Self {
        Self {
            sector: sector.into(),
            stage,
            axis: None,
        }
    }

    pub fn for_axis(sector: impl Into<String>, stage: GrowthStage, axis: GrowthAxis) -> Self {
        Self {
            sector: sector.into(),
            stage,
            axis: Some(axis),
        }
    }
}

fn same_sector(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Peer score distribution for one (sector, stage, axis) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerDistribution {
    pub sector: String,
    pub stage: GrowthStage,
    #[serde(default)]
    pub axis: Option<GrowthAxis>,
    pub scores: Vec<f64>,
    /// Published average; the mean of `scores` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

impl PeerDistribution {
    fn matches(&self, key: &BenchmarkKey) -> bool {
        same_sector(&self.sector, &key.sector) && self.stage == key.stage && self.axis == key.axis
    }

    fn finite_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied().filter(|s| s.is_finite())
    }

    /// The distribution average, or `None` when there are no usable scores.
    pub fn average(&self) -> Option<f64> {
        if let Some(avg) = self.average.filter(|a| a.is_finite()) {
            return Some(avg);
        }
        let (sum, count) = self
            .finite_scores()
            .fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// Industry reference value for a single KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiAverage {
    pub sector: String,
    pub stage: GrowthStage,
    pub kpi_id: KpiId,
    pub industry_average: f64,
}

/// A versioned set of peer distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerBenchmarkDataset {
    pub source: String,
    pub version: String,
    #[serde(default)]
    pub distributions: Vec<PeerDistribution>,
    #[serde(default)]
    pub kpi_averages: Vec<KpiAverage>,
}

impl PeerBenchmarkDataset {
    /// Finds the distribution for an exact key.
    pub fn lookup(&self, key: &BenchmarkKey) -> Option<&PeerDistribution> {
        self.distributions.iter().find(|d| d.matches(key))
    }

    /// Finds the industry average for one KPI.
    pub fn kpi_average(
        &self,
        sector: &str,
        stage: GrowthStage,
        kpi_id: &KpiId,
    ) -> Option<BenchmarkInfo> {
        self.kpi_averages
            .iter()
            .find(|a| same_sector(&a.sector, sector) && a.stage == stage && &a.kpi_id == kpi_id)
            .filter(|a| a.industry_average.is_finite())
            .map(|a| BenchmarkInfo {
                industry_average: a.industry_average,
                source: self.source.clone(),
            })
    }

    /// Returns a copy restricted to one sector.
    pub fn for_sector(&self, sector: &str) -> Self {
        Self {
            source: self.source.clone(),
            version: self.version.clone(),
            distributions: self
                .distributions
                .iter()
                .filter(|d| same_sector(&d.sector, sector))
                .cloned()
                .collect(),
            kpi_averages: self
                .kpi_averages
                .iter()
                .filter(|a| same_sector(&a.sector, sector))
                .cloned()
                .collect(),
        }
    }

    /// True if nothing in the dataset is usable.
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty() && self.kpi_averages.is_empty()
    }
}

/// Where a score sits within its peer distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    /// Share of peers scoring at or below the score, 0-100.
    pub percentile: f64,
    pub status: ScoreStatus,
    /// Score minus peer average.
    pub gap: f64,
    pub peer_average: f64,
    pub peer_count: usize,
}

/// Result of a keyed benchmark comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "availability", rename_all = "snake_case")]
pub enum BenchmarkResult {
    Available(BenchmarkComparison),
    Unavailable { key: BenchmarkKey },
}

impl BenchmarkResult {
    pub fn comparison(&self) -> Option<&BenchmarkComparison> {
        match self {
            BenchmarkResult::Available(c) => Some(c),
            BenchmarkResult::Unavailable { .. } => None,
        }
    }

    pub fn gap(&self) -> Option<f64> {
        self.comparison().map(|c| c.gap)
    }
}

/// Benchmark comparison functions.
pub struct BenchmarkComparator;

impl BenchmarkComparator {
    /// Compares a score against a peer distribution.
    ///
    /// # Edge Cases
    /// - No finite peer scores: `None` (never a fabricated percentile)
    /// - Non-finite peer scores are ignored
    pub fn compare(score: Score, distribution: &PeerDistribution) -> Option<BenchmarkComparison> {
        let peers: Vec<f64> = distribution.finite_scores().collect();
        if peers.is_empty() {
            return None;
        }
        let average = distribution.average()?;

        let at_or_below = peers.iter().filter(|p| **p <= score.value()).count();
        let percentile = at_or_below as f64 / peers.len() as f64 * 100.0;

        Some(BenchmarkComparison {
            percentile,
            status: ScoreStatus::from_percentile(percentile),
            gap: score.value() - average,
            peer_average: average,
            peer_count: peers.len(),
        })
    }

    /// Looks up the distribution for `key` and compares.
    ///
    /// A missing dataset, an unmatched key, or an empty distribution all
    /// yield `Unavailable`.
    pub fn compare_keyed(
        score: Score,
        dataset: Option<&PeerBenchmarkDataset>,
        key: BenchmarkKey,
    ) -> BenchmarkResult {
        dataset
            .and_then(|d| d.lookup(&key))
            .and_then(|distribution| Self::compare(score, distribution))
            .map(BenchmarkResult::Available)
            .unwrap_or(BenchmarkResult::Unavailable { key })
    }
}
