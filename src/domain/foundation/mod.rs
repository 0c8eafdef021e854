//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the growth insight domain.

mod axis;
mod errors;
mod ids;
mod priority;
mod score;
mod stage;
mod status;

pub use axis::GrowthAxis;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EvaluationId, KpiId};
pub use priority::{Priority, Severity};
pub use score::Score;
pub use stage::{GrowthStage, WeightLevel};
pub use status::{ScoreStatus, Trend};
