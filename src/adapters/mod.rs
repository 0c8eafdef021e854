//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to external systems:
//! - `benchmark` - Peer dataset sources (file, in-memory)
//! - `cache` - Report cache implementations
//! - `narrative` - Narrative generators

pub mod benchmark;
pub mod cache;
pub mod narrative;

pub use benchmark::{FileBenchmarkSource, InMemoryBenchmarkSource};
pub use cache::InMemoryReportCache;
pub use narrative::{FallbackNarrator, TemplateNarrator};
