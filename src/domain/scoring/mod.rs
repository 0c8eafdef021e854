//! Scoring Module - KPI normalization, aggregation and insight generation.
//!
//! # Pipeline
//!
//! 1. `Normalizer` - raw response to a 0-100 score, or an incomplete marker
//! 2. `AxisAggregator` - weighted axis scores and the overall composite
//! 3. `BenchmarkComparator` - percentile, status bucket and gap vs. peers
//! 4. `CorrelationEngine` - derived financial metrics from raw values
//! 5. `RiskDetector` - threshold alerts, severity-ordered
//! 6. `ActionPlanGenerator` - ranked, time-boxed recommendations
//! 7. `InsightRanker` - executive digest
//!
//! `InsightEngine` runs the whole pipeline. Every component is a pure
//! function over immutable inputs.

mod action_plan;
mod axis_aggregator;
mod benchmark;
mod content_hash;
mod correlation;
mod curve;
mod engine;
mod formula;
mod insight_ranker;
mod normalizer;
mod playbook;
mod processed;
mod report;
mod risk_detector;
mod settings;

pub use action_plan::{
    classify_timeframe, ActionCategory, ActionItem, ActionPlanGenerator, Impact, Timeframe,
};
pub use axis_aggregator::{AxisAggregator, AxisScore, CompletionRate};
pub use benchmark::{
    BenchmarkComparator, BenchmarkComparison, BenchmarkKey, BenchmarkResult, KpiAverage,
    PeerBenchmarkDataset, PeerDistribution,
};
pub use content_hash::{CacheKey, ContentHash};
pub use correlation::{
    CorrelationEngine, CorrelationInsight, DerivedMetric, FinancialInput, MetricBinding,
    MetricBindings,
};
pub use curve::ScoringCurve;
pub use engine::{EvaluationContext, EvaluationInput, InsightEngine};
pub use formula::{Formula, FormulaError};
pub use insight_ranker::{Highlight, InsightRanker, SummaryDigest};
pub use normalizer::{IncompleteReason, NormalizedResult, Normalizer};
pub use processed::{BenchmarkInfo, KpiInsights, ProcessedKpiData, RiskLevel};
pub use report::{ReportData, ReportSummary};
pub use risk_detector::{DetectorId, RiskAlert, RiskDetector};
pub use settings::{AxisWeights, ScoringSettings};
