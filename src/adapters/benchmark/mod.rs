//! Benchmark Adapters
//!
//! Implementations of the BenchmarkSource port.
//!
//! ## Available Adapters
//!
//! - **FileBenchmarkSource** - Reads a JSON or YAML dataset from disk
//! - **InMemoryBenchmarkSource** - Serves a fixed dataset (testing, bundled data)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::benchmark::{FileBenchmarkSource, InMemoryBenchmarkSource};
//!
//! let source = FileBenchmarkSource::new("./data/benchmarks.yaml");
//! let dataset = source.load("SaaS").await?;
//! ```

mod file_benchmark_source;
mod in_memory_benchmark_source;

pub use file_benchmark_source::FileBenchmarkSource;
pub use in_memory_benchmark_source::InMemoryBenchmarkSource;
