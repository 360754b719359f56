// docgate-core/src/lib.rs
// ============================================================================
// Module: Docgate Core Library
// Description: Public API surface for the Docgate validation engine.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Docgate core provides deterministic document validation: typed field
//! coercion, condition matching, rule evaluation, and quality/compliance
//! aggregation. It is backend-agnostic and performs no I/O; rules, templates,
//! and extracted documents arrive as in-memory values through explicit
//! interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CatalogStore;
pub use interfaces::RuleStore;
pub use interfaces::StoreError;
pub use interfaces::TemplateStore;
pub use interfaces::ValidationResultStore;
pub use runtime::InMemoryCatalogStore;
pub use runtime::MatchOutcome;
pub use runtime::QualityReport;
pub use runtime::SharedCatalogStore;
pub use runtime::aggregate_quality;
pub use runtime::build_validation_result;
pub use runtime::compliance_status;
pub use runtime::evaluate_rules;
pub use runtime::evaluate_template;
pub use runtime::match_condition;
pub use runtime::summarize;
