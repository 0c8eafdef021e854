//! Cache Adapters
//!
//! Implementations of the ReportCache port.

mod in_memory_report_cache;

pub use in_memory_report_cache::InMemoryReportCache;
