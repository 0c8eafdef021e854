//! Priority and severity levels shared by risks, insights and actions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Score;

/// Priority level for insights, highlights and actions.
///
/// Variant order is the ranking order: `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed ranking: critical 0, high 1, medium 2, low 3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Returns the display label for this priority.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Maps a 0-100 health score onto a priority bucket.
    ///
    /// Lower health means more urgent attention.
    pub fn from_health(score: Score) -> Priority {
        match score.value() {
            v if v <= 30.0 => Priority::Critical,
            v if v <= 50.0 => Priority::High,
            v if v <= 70.0 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Severity of a risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Fixed ranking: critical 0, warning 1, info 2.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    /// The priority an alert of this severity carries in rankings.
    pub fn as_priority(&self) -> Priority {
        match self {
            Severity::Critical => Priority::Critical,
            Severity::Warning => Priority::High,
            Severity::Info => Priority::Medium,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", s)
    }
}
