//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engine and the outside world. Adapters implement these ports.
//!
//! - `BenchmarkSource` - Supplies peer benchmark datasets (async)
//! - `NarrativeGenerator` - Embellishes finished reports with prose (async)
//! - `ReportCache` - Memoizes reports by content hash (sync)

mod benchmark_source;
mod narrative_generator;
mod report_cache;

pub use benchmark_source::{BenchmarkSource, BenchmarkSourceError};
pub use narrative_generator::{
    NarrativeError, NarrativeGenerator, NarrativeSection, ReportNarrative,
};
pub use report_cache::{ReportCache, ReportCacheError};
