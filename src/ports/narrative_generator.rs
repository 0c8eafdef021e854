//! Narrative Generator Port - Prose embellishment of a finished report.
//!
//! A generator reads the report and writes text around it. It receives a
//! shared reference, so it cannot alter any numeric result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::scoring::{EvaluationContext, ReportData};

/// Errors that can occur during narrative generation
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("Narrative generator unavailable: {0}")]
    Unavailable(String),

    #[error("Narrative generation failed: {0}")]
    Failed(String),
}

impl NarrativeError {
    /// Returns true if a different generator might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NarrativeError::Unavailable(_))
    }
}

/// One titled block of narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSection {
    pub title: String,
    pub body: String,
}

/// Prose accompanying a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNarrative {
    pub headline: String,
    pub sections: Vec<NarrativeSection>,
    /// Which generator wrote this.
    pub generator: String,
}

/// Port for turning a report into prose
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Writes a narrative for a finished report.
    ///
    /// # Errors
    /// Returns `NarrativeError` if no narrative could be produced
    async fn narrate(
        &self,
        context: &EvaluationContext,
        report: &ReportData,
    ) -> Result<ReportNarrative, NarrativeError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
