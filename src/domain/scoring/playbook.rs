//! Static remediation playbook used by risk alerts and action items.

use super::correlation::DerivedMetric;
use crate::domain::foundation::GrowthAxis;

/// Suggested actions for a weak axis.
pub fn axis_actions(axis: GrowthAxis) -> &'static [&'static str] {
    match axis {
        GrowthAxis::Market => &[
            "Run structured customer discovery interviews with recent churned and won accounts",
            "Sharpen the ideal customer profile and re-target acquisition channels",
        ],
        GrowthAxis::Product => &[
            "Instrument activation and retention funnels to find drop-off points",
            "Prioritise the roadmap around the top customer pain points",
        ],
        GrowthAxis::Revenue => &[
            "Review pricing and packaging against willingness-to-pay data",
            "Tighten the sales pipeline with stage-exit criteria",
        ],
        GrowthAxis::Operations => &[
            "Document core processes and assign clear owners",
            "Close critical hiring gaps before the next growth push",
        ],
        GrowthAxis::Finance => &[
            "Rebuild the 18-month cash plan and extend runway",
            "Set a monthly burn budget and review variances",
        ],
    }
}

/// Suggested actions for an unhealthy derived metric.
pub fn metric_actions(metric: DerivedMetric) -> &'static [&'static str] {
    match metric {
        DerivedMetric::Arpu => &[
            "Introduce higher-value tiers or usage-based upsells",
            "Reduce discounting on new contracts",
        ],
        DerivedMetric::BurnMultiple => &[
            "Cut spend that does not contribute to net new ARR",
            "Reforecast runway against the current burn",
        ],
        DerivedMetric::CacPayback => &[
            "Shift acquisition budget toward channels with faster payback",
            "Improve gross margin through pricing or delivery costs",
        ],
        DerivedMetric::LtvToCac => &[
            "Invest in retention to extend customer lifetime",
            "Lower acquisition cost by pruning underperforming channels",
        ],
        DerivedMetric::GrowthEfficiency => &[
            "Focus spend on the most capital-efficient growth levers",
            "Set efficiency targets for every new budget line",
        ],
    }
}

/// Suggested actions for missing diagnostic data.
pub fn completeness_actions() -> &'static [&'static str] {
    &["Complete the missing diagnostic answers so the axis can be scored"]
}

/// Converts a static action list into owned strings.
pub fn owned(actions: &[&str]) -> Vec<String> {
    actions.iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_axis_and_metric_has_actions() {
        assert!(GrowthAxis::ALL.iter().all(|a| !axis_actions(*a).is_empty()));
        assert!(DerivedMetric::ALL.iter().all(|m| !metric_actions(*m).is_empty()));
        assert!(!completeness_actions().is_empty());
    }
}
