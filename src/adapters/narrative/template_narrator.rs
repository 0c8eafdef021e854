//! Template Narrator - Deterministic prose from report figures.

use async_trait::async_trait;

use crate::domain::scoring::{EvaluationContext, ReportData};
use crate::ports::{NarrativeError, NarrativeGenerator, NarrativeSection, ReportNarrative};

/// Fills fixed sentence templates with report figures
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    fn headline(context: &EvaluationContext, report: &ReportData) -> String {
        match report.summary.overall_score {
            Some(score) => format!(
                "{} {} company scoring {}/100 ({})",
                context.sector, context.stage, score, report.summary.status
            ),
            None => format!(
                "{} {} company: insufficient data for an overall score",
                context.sector, context.stage
            ),
        }
    }

    fn axes_section(report: &ReportData) -> NarrativeSection {
        let lines: Vec<String> = report
            .axis_scores
            .iter()
            .filter(|a| a.applicable_kpis > 0)
            .map(|a| match a.score {
                Some(score) => format!("{}: {}/100, {}.", a.axis, score, a.status),
                None => format!("{}: insufficient data.", a.axis),
            })
            .collect();

        NarrativeSection {
            title: "Growth axes".to_string(),
            body: lines.join(" "),
        }
    }

    fn risks_section(report: &ReportData) -> Option<NarrativeSection> {
        if report.critical_alerts.is_empty() {
            return None;
        }
        Some(NarrativeSection {
            title: "Key risks".to_string(),
            body: report.critical_alerts.join(" "),
        })
    }

    fn actions_section(report: &ReportData) -> Option<NarrativeSection> {
        let first = report.action_plan.first()?;
        Some(NarrativeSection {
            title: "Next steps".to_string(),
            body: format!(
                "{} recommended actions; start with: {}.",
                report.action_plan.len(),
                first.title
            ),
        })
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    async fn narrate(
        &self,
        context: &EvaluationContext,
        report: &ReportData,
    ) -> Result<ReportNarrative, NarrativeError> {
        let mut sections = vec![Self::axes_section(report)];
        if !report.quick_highlights.is_empty() {
            sections.push(NarrativeSection {
                title: "Highlights".to_string(),
                body: report.quick_highlights.join(" "),
            });
        }
        sections.extend(Self::risks_section(report));
        sections.extend(Self::actions_section(report));

        Ok(ReportNarrative {
            headline: Self::headline(context, report),
            sections,
            generator: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "template"
    }
}
