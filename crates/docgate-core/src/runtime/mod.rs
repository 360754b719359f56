// docgate-core/src/runtime/mod.rs
// ============================================================================
// Module: Docgate Runtime
// Description: Condition matching, rule evaluation, and aggregation.
// Purpose: Provide the deterministic evaluation pipeline over core types.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime turns catalog rules and extracted documents into validation
//! results. Matching and evaluation are pure functions of their inputs plus
//! a caller-supplied timestamp; aggregation folds per-rule outcomes and page
//! quality metrics into the persisted result shape.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compliance;
pub mod evaluator;
pub mod matcher;
pub mod quality;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compliance::ComplianceSummary;
pub use compliance::build_validation_result;
pub use compliance::compliance_status;
pub use compliance::summarize;
pub use evaluator::evaluate_rules;
pub use evaluator::evaluate_template;
pub use matcher::MatchOutcome;
pub use matcher::match_condition;
pub use quality::QualityReport;
pub use quality::aggregate_quality;
pub use quality::classify_quality;
pub use store::InMemoryCatalogStore;
pub use store::SharedCatalogStore;
