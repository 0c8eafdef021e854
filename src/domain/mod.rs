//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `kpi` - KPI definitions, stage rules and responses
//! - `scoring` - The evaluation pipeline, from normalization to the executive digest

pub mod foundation;
pub mod kpi;
pub mod scoring;
