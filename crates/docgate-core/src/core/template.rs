// docgate-core/src/core/template.rs
// ============================================================================
// Module: Docgate Template Model
// Description: Extraction template binding a field schema to catalog rules.
// Purpose: Define canonical templates and their save-time invariants.
// Dependencies: crate::core::{identifiers, rule, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! A template binds an extraction prompt and field schema to the set of rules
//! checked against documents extracted with it. The prompt is opaque to the
//! engine. Dangling rule references are rejected when a template is saved;
//! evaluation skips missing rules defensively instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::RuleId;
use crate::core::identifiers::TemplateId;
use crate::core::rule::Rule;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Templates
// ============================================================================

/// Canonical extraction template.
///
/// # Invariants
/// - Every id in `rule_ids` must reference an existing rule at save time.
/// - `rule_ids` order determines outcome listing order, never evaluation
///   dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier.
    pub id: TemplateId,
    /// Template name.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extraction instruction passed to the upstream pipeline; opaque here.
    pub prompt: String,
    /// Field schema mapping field name to an expected value or description.
    #[serde(rename = "field")]
    pub field_schema: BTreeMap<String, String>,
    /// Rules bound to this template.
    #[serde(default)]
    pub rule_ids: Vec<RuleId>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl Template {
    /// Validates the template's save-time invariants against the rule catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed or references
    /// a rule that does not exist.
    pub fn validate_against(&self, rules: &[Rule]) -> Result<(), TemplateError> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        for rule_id in &self.rule_ids {
            if !rules.iter().any(|rule| &rule.id == rule_id) {
                return Err(TemplateError::DanglingRule(rule_id.clone()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template configuration errors surfaced at save time.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template name is empty.
    #[error("template name must not be empty")]
    EmptyName,
    /// Template references a rule that does not exist.
    #[error("template references unknown rule: {0}")]
    DanglingRule(RuleId),
}
