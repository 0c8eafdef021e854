#[cfg(test)]
mod tests {
    use crate::domain::foundation::{GrowthAxis, GrowthStage, KpiId, WeightLevel};
    use crate::domain::kpi::{InputType, KpiDefinition, KpiResponse, StageRule};
    use crate::domain::scoring::normalizer::{IncompleteReason, NormalizedResult, Normalizer};

    fn id(s: &str) -> KpiId {
        KpiId::try_new(s).unwrap()
    }

    fn kpi(input_type: InputType) -> KpiDefinition {
        KpiDefinition::new(id("kpi"), "Test KPI", GrowthAxis::Revenue, input_type)
    }

    fn rule(text: &str) -> StageRule {
        StageRule::new(id("kpi"), GrowthStage::Seed, WeightLevel::X1, text)
    }

    fn normalize(kpi: &KpiDefinition, rule_text: &str, response: &KpiResponse) -> NormalizedResult {
        Normalizer::normalize(kpi, &rule(rule_text), Some(response))
    }

    fn score_of(result: NormalizedResult) -> f64 {
        result.score().expect("expected a scored KPI").value()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Numeric / percentage
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn numeric_interpolates_between_bounds() {
        let response = KpiResponse::number(id("kpi"), 25.0);
        let result = normalize(&kpi(InputType::Numeric), "min=0;max=100", &response);
        assert_eq!(score_of(result), 25.0);
    }

    #[test]
    fn numeric_clamps_out_of_range_values() {
        let k = kpi(InputType::Numeric);
        let r = rule("min=10;max=20");

        let below = KpiResponse::number(id("kpi"), -500.0);
        let above = KpiResponse::number(id("kpi"), 9_000.0);
        assert_eq!(score_of(Normalizer::normalize(&k, &r, Some(&below))), 0.0);
        assert_eq!(score_of(Normalizer::normalize(&k, &r, Some(&above))), 100.0);
    }

    #[test]
    fn numeric_clamps_extreme_finite_values() {
        let k = kpi(InputType::Numeric);
        let r = rule("min=0;max=40");

        let huge = KpiResponse::number(id("kpi"), 1e308);
        let tiny = KpiResponse::number(id("kpi"), -1e308);
        assert_eq!(score_of(Normalizer::normalize(&k, &r, Some(&huge))), 100.0);
        assert_eq!(score_of(Normalizer::normalize(&k, &r, Some(&tiny))), 0.0);
    }

    #[test]
    fn numeric_infinity_is_incomplete() {
        let response = KpiResponse::number(id("kpi"), f64::INFINITY);
        let result = normalize(&kpi(InputType::Numeric), "min=0;max=1", &response);
        assert_eq!(result.incomplete_reason(), Some(&IncompleteReason::NonFinite));
    }

    #[test]
    fn percentage_lower_is_better() {
        // churn: 10% scores 0, 2% scores 100
        let response = KpiResponse::number(id("kpi"), 4.0);
        let result = normalize(&kpi(InputType::Percentage), "min=10;max=2", &response);
        assert!((score_of(result) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_nan_is_incomplete() {
        let response = KpiResponse::number(id("kpi"), f64::NAN);
        let result = normalize(&kpi(InputType::Numeric), "min=0;max=1", &response);
        assert_eq!(result.incomplete_reason(), Some(&IncompleteReason::NonFinite));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rubric
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn rubric_returns_level_score_unchanged() {
        let response = KpiResponse::choice(id("kpi"), "Established");
        let result = Normalizer::normalize(
            &kpi(InputType::Rubric),
            &rule("none=0;basic=50;established=75;advanced=100"),
            Some(&response),
        );
        assert_eq!(score_of(result), 75.0);
    }

    #[test]
    fn rubric_unknown_level_is_incomplete() {
        let response = KpiResponse::choice(id("kpi"), "legendary");
        let result = normalize(&kpi(InputType::Rubric), "none=0;basic=50", &response);
        assert_eq!(
            result.incomplete_reason(),
            Some(&IncompleteReason::UnknownLevel("legendary".to_string()))
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Select types
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn multi_select_scales_against_declared_max() {
        let response = KpiResponse::choices(id("kpi"), ["seo", "referrals"]);
        let result = Normalizer::normalize(
            &kpi(InputType::MultiSelect),
            &rule("seo=5;ads=5;referrals=4;events=3;@max=15"),
            Some(&response),
        );
        assert!((score_of(result) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn multi_select_caps_at_100() {
        let response = KpiResponse::choices(id("kpi"), ["a", "b", "c"]);
        let result = normalize(&kpi(InputType::MultiSelect), "a=10;b=10;c=10;@max=15", &response);
        assert_eq!(score_of(result), 100.0);
    }

    #[test]
    fn multi_select_counts_duplicates_once() {
        let response = KpiResponse::choices(id("kpi"), ["a", "A", "a"]);
        let result = normalize(&kpi(InputType::MultiSelect), "a=5;b=5", &response);
        assert_eq!(score_of(result), 50.0);
    }

    #[test]
    fn multi_select_empty_selection_scores_zero() {
        let response = KpiResponse::choices(id("kpi"), Vec::<String>::new());
        let result = normalize(&kpi(InputType::MultiSelect), "a=5;b=5", &response);
        assert_eq!(score_of(result), 0.0);
    }

    #[test]
    fn multi_select_unknown_option_is_incomplete() {
        let response = KpiResponse::choices(id("kpi"), ["a", "tiktok"]);
        let result = normalize(&kpi(InputType::MultiSelect), "a=5;b=5", &response);
        assert_eq!(
            result.incomplete_reason(),
            Some(&IncompleteReason::UnknownOption("tiktok".to_string()))
        );
    }

    #[test]
    fn multi_select_without_positive_points_is_malformed() {
        let response = KpiResponse::choices(id("kpi"), ["a"]);
        let result = normalize(&kpi(InputType::MultiSelect), "a=0;b=-1", &response);
        assert!(matches!(
            result.incomplete_reason(),
            Some(IncompleteReason::MalformedRule(_))
        ));
    }

    #[test]
    fn single_select_returns_points_directly() {
        let response = KpiResponse::choice(id("kpi"), "monthly");
        let result = Normalizer::normalize(
            &kpi(InputType::SingleSelect),
            &rule("never=0;quarterly=40;monthly=80;weekly=100"),
            Some(&response),
        );
        assert_eq!(score_of(result), 80.0);
    }

    #[test]
    fn single_select_scales_raw_points() {
        let response = KpiResponse::choice(id("kpi"), "b");
        let result = normalize(&kpi(InputType::SingleSelect), "a=1;b=3;c=4;@max=4", &response);
        assert_eq!(score_of(result), 75.0);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Calculation
    // ─────────────────────────────────────────────────────────────────────

    fn gross_margin_kpi() -> KpiDefinition {
        kpi(InputType::Calculation).with_formula("({revenue} - {cogs}) / {revenue} * 100")
    }

    #[test]
    fn calculation_evaluates_formula_then_interpolates() {
        let response = KpiResponse::fields(id("kpi"), [("revenue", 100.0), ("cogs", 40.0)]);
        let result = normalize(&gross_margin_kpi(), "min=20;max=80", &response);
        // margin 60% → (60 - 20) / 60 * 100
        assert!((score_of(result) - 66.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn calculation_unresolved_variable_is_incomplete_not_zero() {
        let response = KpiResponse::fields(id("kpi"), [("revenue", 100.0)]);
        let result = normalize(&gross_margin_kpi(), "min=20;max=80", &response);
        assert_eq!(
            result.incomplete_reason(),
            Some(&IncompleteReason::UnresolvedVariable("cogs".to_string()))
        );
        assert!(result.score().is_none());
    }

    #[test]
    fn calculation_division_by_zero_is_incomplete() {
        let response = KpiResponse::fields(id("kpi"), [("revenue", 0.0), ("cogs", 0.0)]);
        let result = normalize(&gross_margin_kpi(), "min=20;max=80", &response);
        assert_eq!(result.incomplete_reason(), Some(&IncompleteReason::DivisionByZero));
    }

    #[test]
    fn calculation_without_formula_is_incomplete() {
        let response = KpiResponse::fields(id("kpi"), [("a", 1.0)]);
        let result = normalize(&kpi(InputType::Calculation), "min=0;max=1", &response);
        assert_eq!(result.incomplete_reason(), Some(&IncompleteReason::MissingFormula));
    }

    #[test]
    fn calculation_with_bad_formula_is_incomplete() {
        let k = kpi(InputType::Calculation).with_formula("{a} ** 2");
        let response = KpiResponse::fields(id("kpi"), [("a", 1.0)]);
        let result = Normalizer::normalize(&k, &rule("min=0;max=1"), Some(&response));
        assert!(matches!(
            result.incomplete_reason(),
            Some(IncompleteReason::InvalidFormula(_))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Failure isolation
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn missing_response_is_unanswered() {
        let result = Normalizer::normalize(&kpi(InputType::Numeric), &rule("min=0;max=10"), None);
        assert_eq!(result.incomplete_reason(), Some(&IncompleteReason::Unanswered));
        assert!(!result.is_complete());
    }

    #[test]
    fn malformed_rule_is_incomplete() {
        let response = KpiResponse::number(id("kpi"), 5.0);
        let result = normalize(&kpi(InputType::Numeric), "lower=0;upper=10", &response);
        assert!(matches!(
            result.incomplete_reason(),
            Some(IncompleteReason::MalformedRule(_))
        ));
    }

    #[test]
    fn shape_mismatch_is_incomplete() {
        let response = KpiResponse::choice(id("kpi"), "lots");
        let result = normalize(&kpi(InputType::Numeric), "min=0;max=10", &response);
        assert_eq!(
            result.incomplete_reason(),
            Some(&IncompleteReason::ShapeMismatch {
                expected: "number".to_string(),
                actual: "choice".to_string(),
            })
        );
    }

    #[test]
    fn incomplete_serializes_with_reason() {
        let result = Normalizer::normalize(&kpi(InputType::Numeric), &rule("min=0;max=10"), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "incomplete");
        assert_eq!(json["reason"]["reason"], "unanswered");
    }
}
