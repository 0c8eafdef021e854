//! KPI Module - Typed inputs supplied by external loaders.
//!
//! Definitions, stage rules and responses arrive already converted from
//! their storage format; this module only models and parses them.

mod definition;
mod response;
mod rule;

pub use definition::{InputType, KpiDefinition};
pub use response::{KpiResponse, ResponseValue};
pub use rule::{
    OptionTable, RubricLevel, RuleParseError, Ruleset, SelectOption, StageRule, Thresholds,
};
