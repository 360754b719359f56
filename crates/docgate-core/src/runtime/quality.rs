// docgate-core/src/runtime/quality.rs
// ============================================================================
// Module: Docgate Quality Aggregator
// Description: Reduces per-page quality metrics to a document classification.
// Purpose: Provide the deterministic quality verdict shown alongside rules.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The quality aggregator folds per-page `overall_quality` scores into a
//! single document-level mean and classifies it. Thresholds are inclusive on
//! the lower bound: 80 is Good, 60 is Fair, 59 is Poor. A document with zero
//! scored pages classifies as [`QualityClassification::NoData`], which is
//! deliberately distinct from a low score.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::PageQuality;
use crate::core::QualityClassification;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Minimum mean quality classified as Good.
const GOOD_THRESHOLD: f64 = 80.0;
/// Minimum mean quality classified as Fair.
const FAIR_THRESHOLD: f64 = 60.0;

// ============================================================================
// SECTION: Quality Reports
// ============================================================================

/// Document-level quality aggregation result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Arithmetic mean of per-page `overall_quality`, 0 when no pages.
    pub overall_quality: f64,
    /// Classification derived from the mean.
    pub classification: QualityClassification,
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Aggregates per-page quality metrics into a document-level report.
#[must_use]
pub fn aggregate_quality(pages: &[PageQuality]) -> QualityReport {
    if pages.is_empty() {
        return QualityReport {
            overall_quality: 0.0,
            classification: QualityClassification::NoData,
        };
    }
    #[allow(
        clippy::cast_precision_loss,
        reason = "Page counts are far below the f64 integer precision limit."
    )]
    let mean = pages.iter().map(|page| page.quality_metrics.overall_quality).sum::<f64>()
        / pages.len() as f64;
    QualityReport {
        overall_quality: mean,
        classification: classify_quality(mean),
    }
}

/// Classifies a mean quality score; lower bounds are inclusive.
#[must_use]
pub fn classify_quality(mean: f64) -> QualityClassification {
    if mean >= GOOD_THRESHOLD {
        QualityClassification::Good
    } else if mean >= FAIR_THRESHOLD {
        QualityClassification::Fair
    } else {
        QualityClassification::Poor
    }
}
