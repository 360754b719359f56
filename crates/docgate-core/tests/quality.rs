// crates/docgate-core/tests/quality.rs
// ============================================================================
// Module: Quality Aggregation Tests
// Description: Mean computation and classification thresholds.
// Purpose: Pin inclusive boundaries and the zero-page sentinel.
// Dependencies: docgate-core
// ============================================================================

//! Quality aggregator behavior across thresholds and empty input.

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
    clippy::float_cmp,
    reason = "Test-only assertions and helpers are permitted."
)]

use docgate_core::PageQuality;
use docgate_core::QualityClassification;
use docgate_core::QualityMetrics;
use docgate_core::aggregate_quality;
use docgate_core::runtime::classify_quality;

/// Builds a page with only `overall_quality` populated.
fn page(page: u32, overall_quality: f64) -> PageQuality {
    PageQuality {
        page,
        quality_metrics: QualityMetrics {
            overall_quality,
            ..QualityMetrics::default()
        },
    }
}

#[test]
fn mean_of_scored_pages_classifies_good() {
    let pages = [page(1, 90.0), page(2, 85.0), page(3, 95.0)];
    let report = aggregate_quality(&pages);
    assert_eq!(report.overall_quality, 90.0);
    assert_eq!(report.classification, QualityClassification::Good);
}

#[test]
fn thresholds_are_inclusive_lower_bounds() {
    assert_eq!(classify_quality(80.0), QualityClassification::Good);
    assert_eq!(classify_quality(79.999), QualityClassification::Fair);
    assert_eq!(classify_quality(60.0), QualityClassification::Fair);
    assert_eq!(classify_quality(59.999), QualityClassification::Poor);
    assert_eq!(classify_quality(0.0), QualityClassification::Poor);
}

#[test]
fn single_page_mean_is_the_page_score() {
    let report = aggregate_quality(&[page(1, 61.0)]);
    assert_eq!(report.overall_quality, 61.0);
    assert_eq!(report.classification, QualityClassification::Fair);
}

#[test]
fn zero_pages_classify_as_no_data_not_poor() {
    let report = aggregate_quality(&[]);
    assert_eq!(report.overall_quality, 0.0);
    assert_eq!(report.classification, QualityClassification::NoData);
}
