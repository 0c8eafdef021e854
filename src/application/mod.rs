//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The engine itself stays synchronous; collaborators are awaited here.

mod cached_engine;
pub mod handlers;

pub use cached_engine::{CachedEvaluation, CachedInsightEngine};
pub use handlers::report::{GenerateReportCommand, GenerateReportHandler, GeneratedReport};
