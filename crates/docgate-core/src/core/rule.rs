// docgate-core/src/core/rule.rs
// ============================================================================
// Module: Docgate Rule Model
// Description: Rule, condition, and action definitions with validation helpers.
// Purpose: Define canonical catalog rules and their save-time invariants.
// Dependencies: crate::core::{field, identifiers, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! Rules pair an ordered condition list (AND semantics, length one today)
//! with an action applied when the conditions do not hold. Rules are
//! validated at save time so that evaluation never sees malformed range
//! bounds or missing operators; evaluation-time surprises degrade into
//! diagnostics rather than errors.
//!
//! The serialized form matches the persisted catalog shape: conditions
//! appear under the `condition` key, each condition's operator under its
//! own `condition` key, and the action severity under `action.action`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::field::parse_date;
use crate::core::field::parse_number;
use crate::core::identifiers::RuleId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Rule Types
// ============================================================================

/// Category of a catalog rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleType {
    /// Field must be present and non-empty in the extracted data.
    #[serde(rename = "Mandatory Fields")]
    MandatoryField,
    /// Field value must match a format or comparison predicate.
    #[serde(rename = "Format Validation")]
    FormatValidation,
    /// Cross-field or business-level predicate.
    #[serde(rename = "Business Logics")]
    BusinessLogic,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::MandatoryField => "Mandatory Fields",
            Self::FormatValidation => "Format Validation",
            Self::BusinessLogic => "Business Logics",
        };
        f.write_str(rendered)
    }
}

// ============================================================================
// SECTION: Condition Operators
// ============================================================================

/// Operator applied to an extracted field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOperator {
    /// Value equality comparison.
    #[serde(rename = "Equal")]
    Equal,
    /// Value inequality comparison.
    #[serde(rename = "Not Equal")]
    NotEqual,
    /// Ordered greater-than comparison.
    #[serde(rename = "Greater Than")]
    GreaterThan,
    /// Ordered less-than comparison.
    #[serde(rename = "Less Than")]
    LessThan,
    /// Ordered greater-than-or-equal comparison.
    #[serde(rename = "Greater Than or Equal")]
    GreaterOrEqual,
    /// Ordered less-than-or-equal comparison.
    #[serde(rename = "Less Than or Equal")]
    LessOrEqual,
    /// Case-insensitive substring comparison.
    #[serde(rename = "Contains")]
    Contains,
    /// Negated case-insensitive substring comparison.
    #[serde(rename = "Not Contain")]
    NotContain,
    /// Inclusive membership in an ordered `[lower, upper]` range.
    #[serde(rename = "In Range")]
    InRange,
}

impl ConditionOperator {
    /// Returns true when the operator requires ordered (number/date) operands.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(
            self,
            Self::GreaterThan
                | Self::LessThan
                | Self::GreaterOrEqual
                | Self::LessOrEqual
                | Self::InRange
        )
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::Equal => "Equal",
            Self::NotEqual => "Not Equal",
            Self::GreaterThan => "Greater Than",
            Self::LessThan => "Less Than",
            Self::GreaterOrEqual => "Greater Than or Equal",
            Self::LessOrEqual => "Less Than or Equal",
            Self::Contains => "Contains",
            Self::NotContain => "Not Contain",
            Self::InRange => "In Range",
        };
        f.write_str(rendered)
    }
}

// ============================================================================
// SECTION: Condition Values
// ============================================================================

/// Comparison value carried by a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// Single scalar value in raw string form.
    Scalar(String),
    /// Ordered `[lower, upper]` pair for range conditions.
    Pair([String; 2]),
}

impl ConditionValue {
    /// Returns the scalar form when this value is not a pair.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Pair(_) => None,
        }
    }
}

impl Default for ConditionValue {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

/// Single `(field, operator, value)` condition tested against a document.
///
/// # Invariants
/// - `field` and `operator` may be omitted only on mandatory-field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Name of the extracted field the condition reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Operator applied to the field value.
    #[serde(rename = "condition", default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ConditionOperator>,
    /// Comparison value.
    #[serde(default)]
    pub value: ConditionValue,
}

// ============================================================================
// SECTION: Rule Actions
// ============================================================================

/// Severity applied when a rule's conditions do not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSeverity {
    /// Outcome lands in the warning bucket.
    Warning,
    /// Outcome lands in the failed bucket.
    Fail,
}

/// Action attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    /// Severity of a violated rule.
    #[serde(rename = "action")]
    pub severity: ActionSeverity,
    /// Message surfaced on the violated outcome.
    pub message: String,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Canonical catalog rule.
///
/// # Invariants
/// - `id` is immutable after creation; `created_at`/`updated_at` are
///   server-assigned at the service boundary.
/// - `conditions` is an ordered list combined with AND semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier.
    pub id: RuleId,
    /// Unique rule name.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rule category.
    pub rule_type: RuleType,
    /// Ordered conditions combined with AND semantics.
    #[serde(rename = "condition")]
    pub conditions: Vec<Condition>,
    /// Action applied when the conditions do not hold.
    pub action: RuleAction,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl Rule {
    /// Validates the rule's save-time invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when the rule is malformed.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        if self.conditions.is_empty() && self.rule_type != RuleType::MandatoryField {
            return Err(RuleError::MissingConditions);
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            validate_condition(self.rule_type, index, condition)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rule configuration errors surfaced at save time.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Rule name is empty.
    #[error("rule name must not be empty")]
    EmptyName,
    /// Rule defines no conditions.
    #[error("rule must define at least one condition")]
    MissingConditions,
    /// Condition requires a field name.
    #[error("condition {0} requires a field name")]
    MissingField(usize),
    /// Condition requires an operator.
    #[error("condition {0} requires an operator")]
    MissingOperator(usize),
    /// Range condition value is not a two-element pair.
    #[error("condition {0}: In Range requires a [lower, upper] pair")]
    RangePairRequired(usize),
    /// Range bounds do not share an ordered type.
    #[error("condition {0}: range bounds must both be numbers or both be dates")]
    RangeBoundsUnordered(usize),
    /// Range bounds are reversed.
    #[error("condition {0}: range lower bound {1} exceeds upper bound {2}")]
    RangeBoundsReversed(usize, String, String),
    /// Operator requires a scalar value.
    #[error("condition {0}: {1} requires a scalar value")]
    ScalarRequired(usize, ConditionOperator),
    /// Ordered operator value is neither a number nor a date.
    #[error("condition {0}: {1} requires a numeric or date value, got `{2}`")]
    UnorderedValue(usize, ConditionOperator, String),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates a single condition against its rule type.
fn validate_condition(
    rule_type: RuleType,
    index: usize,
    condition: &Condition,
) -> Result<(), RuleError> {
    let mandatory = rule_type == RuleType::MandatoryField;
    let named = condition.field.as_ref().is_some_and(|field| !field.trim().is_empty());
    if !mandatory && !named {
        return Err(RuleError::MissingField(index));
    }

    let Some(operator) = condition.operator else {
        if mandatory {
            return Ok(());
        }
        return Err(RuleError::MissingOperator(index));
    };

    match operator {
        ConditionOperator::InRange => validate_range_bounds(index, &condition.value),
        ConditionOperator::Contains | ConditionOperator::NotContain => {
            if condition.value.as_scalar().is_none() {
                return Err(RuleError::ScalarRequired(index, operator));
            }
            Ok(())
        }
        ConditionOperator::GreaterThan
        | ConditionOperator::LessThan
        | ConditionOperator::GreaterOrEqual
        | ConditionOperator::LessOrEqual => {
            let Some(scalar) = condition.value.as_scalar() else {
                return Err(RuleError::ScalarRequired(index, operator));
            };
            if parse_number(scalar).is_none() && parse_date(scalar).is_none() {
                return Err(RuleError::UnorderedValue(index, operator, scalar.to_string()));
            }
            Ok(())
        }
        ConditionOperator::Equal | ConditionOperator::NotEqual => Ok(()),
    }
}

/// Validates that range bounds form an ordered `[lower, upper]` pair.
///
/// Reversed bounds are rejected rather than silently swapped.
fn validate_range_bounds(index: usize, value: &ConditionValue) -> Result<(), RuleError> {
    let ConditionValue::Pair([lower, upper]) = value else {
        return Err(RuleError::RangePairRequired(index));
    };

    if let (Some(lo), Some(hi)) = (parse_number(lower), parse_number(upper)) {
        if lo > hi {
            return Err(RuleError::RangeBoundsReversed(index, lower.clone(), upper.clone()));
        }
        return Ok(());
    }
    if let (Some(lo), Some(hi)) = (parse_date(lower), parse_date(upper)) {
        if lo > hi {
            return Err(RuleError::RangeBoundsReversed(index, lower.clone(), upper.clone()));
        }
        return Ok(());
    }
    Err(RuleError::RangeBoundsUnordered(index))
}
