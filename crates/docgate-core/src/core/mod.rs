// docgate-core/src/core/mod.rs
// ============================================================================
// Module: Docgate Core Types
// Description: Canonical Docgate rule, template, document, and result types.
// Purpose: Provide stable, serializable types for validation inputs and outputs.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Docgate core types define the rule and template catalog, the extracted
//! document shape produced by the upstream pipeline, and the validation
//! result consumed by the presentation layer. These types are the canonical
//! source of truth for any derived API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod document;
pub mod field;
pub mod identifiers;
pub mod outcome;
pub mod quality;
pub mod rule;
pub mod template;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::ExtractedDocument;
pub use document::PageQuality;
pub use field::FieldKind;
pub use field::FieldValue;
pub use field::TypedField;
pub use field::Uncoercible;
pub use field::coerce_field;
pub use field::infer_kind;
pub use identifiers::DocumentId;
pub use identifiers::RuleId;
pub use identifiers::TemplateId;
pub use outcome::ComplianceStatus;
pub use outcome::OutcomeBucket;
pub use outcome::QualityClassification;
pub use outcome::RuleCounts;
pub use outcome::RuleOutcome;
pub use outcome::ValidationResult;
pub use quality::QualityMetrics;
pub use rule::ActionSeverity;
pub use rule::Condition;
pub use rule::ConditionOperator;
pub use rule::ConditionValue;
pub use rule::Rule;
pub use rule::RuleAction;
pub use rule::RuleError;
pub use rule::RuleType;
pub use template::Template;
pub use template::TemplateError;
pub use time::Timestamp;
