// docgate-core/src/runtime/compliance.rs
// ============================================================================
// Module: Docgate Compliance Aggregator
// Description: Folds rule outcomes into the overall compliance verdict.
// Purpose: Provide the explicit, named decision policy for document status.
// Dependencies: crate::core, crate::runtime::quality
// ============================================================================

//! ## Overview
//! The compliance aggregator buckets rule outcomes, derives the raw counts
//! used by the presentation layer, and applies the decision policy: any
//! failed outcome makes the document non-compliant; warnings alone never do.
//! A template with no bound rules is a distinct neutral state, not a pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ComplianceStatus;
use crate::core::OutcomeBucket;
use crate::core::RuleCounts;
use crate::core::RuleOutcome;
use crate::core::ValidationResult;
use crate::runtime::quality::QualityReport;

// ============================================================================
// SECTION: Compliance Summary
// ============================================================================

/// Compliance verdict plus the raw counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceSummary {
    /// Overall compliance verdict.
    pub status: ComplianceStatus,
    /// Raw outcome counts.
    pub counts: RuleCounts,
}

// ============================================================================
// SECTION: Decision Policy
// ============================================================================

/// The named compliance decision policy.
///
/// Any failed outcome makes the document non-compliant. Zero outcomes map
/// to the neutral no-rules state. Otherwise the document is compliant
/// regardless of warning count.
#[must_use]
pub const fn compliance_status(counts: &RuleCounts) -> ComplianceStatus {
    if counts.failed > 0 {
        ComplianceStatus::NonCompliant
    } else if counts.total == 0 {
        ComplianceStatus::NoRulesConfigured
    } else {
        ComplianceStatus::Compliant
    }
}

/// Summarizes rule outcomes into the compliance verdict and counts.
#[must_use]
pub fn summarize(outcomes: &[RuleOutcome]) -> ComplianceSummary {
    let mut counts = RuleCounts::default();
    for outcome in outcomes {
        match outcome.bucket {
            OutcomeBucket::Passed => counts.passed += 1,
            OutcomeBucket::Warning => counts.warning += 1,
            OutcomeBucket::Failed => counts.failed += 1,
        }
        counts.total += 1;
    }
    ComplianceSummary {
        status: compliance_status(&counts),
        counts,
    }
}

// ============================================================================
// SECTION: Result Assembly
// ============================================================================

/// Assembles the final validation result from outcomes and quality.
///
/// Outcomes are partitioned by bucket without re-sorting, so listing order
/// inside each bucket preserves the template's rule order.
#[must_use]
pub fn build_validation_result(
    outcomes: Vec<RuleOutcome>,
    quality: &QualityReport,
) -> ValidationResult {
    let summary = summarize(&outcomes);
    let mut passed_rules = Vec::with_capacity(summary.counts.passed);
    let mut warning_rules = Vec::with_capacity(summary.counts.warning);
    let mut failed_rules = Vec::with_capacity(summary.counts.failed);
    for outcome in outcomes {
        match outcome.bucket {
            OutcomeBucket::Passed => passed_rules.push(outcome),
            OutcomeBucket::Warning => warning_rules.push(outcome),
            OutcomeBucket::Failed => failed_rules.push(outcome),
        }
    }
    ValidationResult {
        passed_rules,
        warning_rules,
        failed_rules,
        overall_status: summary.status,
        quality_classification: quality.classification,
    }
}
