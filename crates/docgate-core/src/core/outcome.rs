// docgate-core/src/core/outcome.rs
// ============================================================================
// Module: Docgate Validation Outcomes
// Description: Per-rule outcomes and the aggregate validation result.
// Purpose: Provide the stable result shape consumed by the presentation layer.
// Dependencies: crate::core::{rule, time}, serde
// ============================================================================

//! ## Overview
//! Evaluation buckets each rule outcome into passed/warning/failed and folds
//! the buckets, together with the quality classification, into a single
//! [`ValidationResult`]. Results are created once per evaluation run and
//! never mutated; re-evaluation produces a new result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::rule::RuleType;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Outcome Buckets
// ============================================================================

/// Bucket assigned to a single rule outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeBucket {
    /// Conditions held.
    Passed,
    /// Conditions did not hold; the rule's action severity is warning.
    Warning,
    /// Conditions did not hold; the rule's action severity is fail.
    Failed,
}

/// Outcome of evaluating one rule against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Name of the evaluated rule.
    pub rule_name: String,
    /// Category of the evaluated rule.
    pub rule_type: RuleType,
    /// Outcome message, annotated with matcher diagnostics where relevant.
    pub message: String,
    /// Evaluation timestamp supplied by the caller.
    pub timestamp: Timestamp,
    /// Bucket the outcome landed in.
    pub bucket: OutcomeBucket,
}

// ============================================================================
// SECTION: Quality Classification
// ============================================================================

/// Document-level quality classification derived from the page mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityClassification {
    /// Mean quality of at least 80.
    Good,
    /// Mean quality in `[60, 80)`.
    Fair,
    /// Mean quality below 60.
    Poor,
    /// No pages were scored; distinct from a low score so the UI can render
    /// "no data" rather than "0% quality".
    NoData,
}

// ============================================================================
// SECTION: Compliance Status
// ============================================================================

/// Overall compliance verdict for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// No failed outcomes.
    Compliant,
    /// At least one failed outcome.
    NonCompliant,
    /// The template binds no rules; neutral, neither pass nor failure.
    NoRulesConfigured,
}

/// Raw outcome counts exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuleCounts {
    /// Number of passed outcomes.
    pub passed: usize,
    /// Number of warning outcomes.
    pub warning: usize,
    /// Number of failed outcomes.
    pub failed: usize,
    /// Total number of outcomes.
    pub total: usize,
}

// ============================================================================
// SECTION: Validation Results
// ============================================================================

/// Aggregate validation result for one document evaluation run.
///
/// # Invariants
/// - Created once per run and never mutated; re-evaluation produces a new
///   result.
/// - Listing order inside each bucket preserves the template's rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Outcomes whose conditions held.
    pub passed_rules: Vec<RuleOutcome>,
    /// Violated outcomes with warning severity.
    pub warning_rules: Vec<RuleOutcome>,
    /// Violated outcomes with fail severity.
    pub failed_rules: Vec<RuleOutcome>,
    /// Overall compliance verdict.
    pub overall_status: ComplianceStatus,
    /// Document-level quality classification.
    pub quality_classification: QualityClassification,
}

impl ValidationResult {
    /// Returns the outcome counts used by the presentation layer.
    #[must_use]
    pub fn counts(&self) -> RuleCounts {
        let passed = self.passed_rules.len();
        let warning = self.warning_rules.len();
        let failed = self.failed_rules.len();
        RuleCounts {
            passed,
            warning,
            failed,
            total: passed + warning + failed,
        }
    }
}
