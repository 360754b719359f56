// crates/docgate-core/tests/proptest_matcher.rs
// ============================================================================
// Module: Matcher Property-Based Tests
// Description: Property tests for condition matching invariants.
// Purpose: Detect panics and broken orderings across wide input ranges.
// ============================================================================

//! Property-based tests for matcher and aggregation invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use docgate_core::ConditionOperator;
use docgate_core::ConditionValue;
use docgate_core::PageQuality;
use docgate_core::QualityClassification;
use docgate_core::QualityMetrics;
use docgate_core::aggregate_quality;
use docgate_core::match_condition;
use proptest::prelude::*;

/// Renders a finite f64 in plain decimal form the field model accepts.
fn decimal(value: f64) -> String {
    format!("{value:.6}")
}

/// Builds a page with only `overall_quality` populated.
fn page(score: f64) -> PageQuality {
    PageQuality {
        page: 1,
        quality_metrics: QualityMetrics {
            overall_quality: score,
            ..QualityMetrics::default()
        },
    }
}

proptest! {
    #[test]
    fn equality_is_reflexive_for_numbers(value in -1.0e9_f64 .. 1.0e9_f64) {
        let raw = decimal(value);
        let outcome = match_condition(
            Some(&raw),
            ConditionOperator::Equal,
            &ConditionValue::Scalar(raw.clone()),
        );
        prop_assert!(outcome.satisfied);
    }

    #[test]
    fn ordering_agrees_with_f64_comparison(
        a in -1.0e9_f64 .. 1.0e9_f64,
        b in -1.0e9_f64 .. 1.0e9_f64,
    ) {
        let raw_a = decimal(a);
        let raw_b = decimal(b);
        let gt = match_condition(
            Some(&raw_a),
            ConditionOperator::GreaterThan,
            &ConditionValue::Scalar(raw_b.clone()),
        );
        let le = match_condition(
            Some(&raw_a),
            ConditionOperator::LessOrEqual,
            &ConditionValue::Scalar(raw_b),
        );
        prop_assert_ne!(gt.satisfied, le.satisfied);
    }

    #[test]
    fn range_membership_is_reflexive(value in -1.0e9_f64 .. 1.0e9_f64) {
        let raw = decimal(value);
        let outcome = match_condition(
            Some(&raw),
            ConditionOperator::InRange,
            &ConditionValue::Pair([raw.clone(), raw.clone()]),
        );
        prop_assert!(outcome.satisfied);
    }

    #[test]
    fn matcher_never_panics_on_arbitrary_strings(
        field in ".*",
        expected in ".*",
        operator_index in 0_usize .. 9,
    ) {
        let operators = [
            ConditionOperator::Equal,
            ConditionOperator::NotEqual,
            ConditionOperator::GreaterThan,
            ConditionOperator::LessThan,
            ConditionOperator::GreaterOrEqual,
            ConditionOperator::LessOrEqual,
            ConditionOperator::Contains,
            ConditionOperator::NotContain,
            ConditionOperator::InRange,
        ];
        let _ = match_condition(
            Some(&field),
            operators[operator_index],
            &ConditionValue::Scalar(expected),
        );
    }

    #[test]
    fn quality_mean_stays_within_page_bounds(
        scores in prop::collection::vec(0.0_f64 .. 100.0_f64, 1 .. 16),
    ) {
        let pages: Vec<PageQuality> = scores.iter().copied().map(page).collect();
        let report = aggregate_quality(&pages);
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(report.overall_quality >= min - 1e-9);
        prop_assert!(report.overall_quality <= max + 1e-9);
        prop_assert_ne!(report.classification, QualityClassification::NoData);
    }
}
