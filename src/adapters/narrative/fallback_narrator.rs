//! Fallback Narrator - Wrapper that falls back to a second generator.
//!
//! When the primary generator reports itself unavailable, the fallback
//! (typically the deterministic `TemplateNarrator`) is tried instead.
//!
//! # Example
//!
//! ```ignore
//! let narrator = FallbackNarrator::new(remote_narrator)
//!     .with_fallback(TemplateNarrator::new());
//! ```

use async_trait::async_trait;

use crate::domain::scoring::{EvaluationContext, ReportData};
use crate::ports::{NarrativeError, NarrativeGenerator, ReportNarrative};

/// Narrative generator with an optional fallback
pub struct FallbackNarrator<P: NarrativeGenerator, F: NarrativeGenerator> {
    primary: P,
    fallback: Option<F>,
}

impl<P: NarrativeGenerator, F: NarrativeGenerator> FallbackNarrator<P, F> {
    /// Creates a narrator with only a primary generator.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback generator.
    pub fn with_fallback(mut self, fallback: F) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait]
impl<P: NarrativeGenerator, F: NarrativeGenerator> NarrativeGenerator for FallbackNarrator<P, F> {
    async fn narrate(
        &self,
        context: &EvaluationContext,
        report: &ReportData,
    ) -> Result<ReportNarrative, NarrativeError> {
        match self.primary.narrate(context, report).await {
            Ok(narrative) => Ok(narrative),
            Err(err) if err.is_retryable() => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %err,
                        "narrative generator unavailable, using fallback"
                    );
                    fallback.narrate(context, report).await
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
