// docgate-core/src/runtime/matcher.rs
// ============================================================================
// Module: Docgate Condition Matcher
// Description: Operator evaluation for rule conditions against field values.
// Purpose: Convert raw extracted values into deterministic match outcomes.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The matcher evaluates one `(field, operator, value)` condition against a
//! raw extracted value. Both sides are resolved through the field model once
//! per condition, never re-parsed per comparison. Missing fields and
//! uncoercible values yield unsatisfied outcomes with diagnostics rather
//! than errors, so one bad value never aborts a document's evaluation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use crate::core::ConditionOperator;
use crate::core::ConditionValue;
use crate::core::FieldKind;
use crate::core::FieldValue;
use crate::core::TypedField;
use crate::core::coerce_field;

// ============================================================================
// SECTION: Match Outcomes
// ============================================================================

/// Outcome of matching one condition against one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// True when the condition held.
    pub satisfied: bool,
    /// Diagnostic explaining a degraded or failed match, when relevant.
    pub diagnostic: Option<String>,
}

impl MatchOutcome {
    /// Creates a satisfied outcome with no diagnostic.
    #[must_use]
    pub const fn satisfied() -> Self {
        Self {
            satisfied: true,
            diagnostic: None,
        }
    }

    /// Creates an unsatisfied outcome with no diagnostic.
    #[must_use]
    pub const fn unsatisfied() -> Self {
        Self {
            satisfied: false,
            diagnostic: None,
        }
    }

    /// Creates an unsatisfied outcome carrying a diagnostic.
    #[must_use]
    pub fn degraded(diagnostic: impl Into<String>) -> Self {
        Self {
            satisfied: false,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Creates an outcome from a plain boolean comparison result.
    #[must_use]
    pub const fn from_bool(satisfied: bool) -> Self {
        Self {
            satisfied,
            diagnostic: None,
        }
    }
}

// ============================================================================
// SECTION: Condition Matching
// ============================================================================

/// Matches a condition operator and value against a raw extracted field.
///
/// `field` is `None` when the field is absent from the extracted data; this
/// always yields an unsatisfied outcome with a "not found" diagnostic since
/// a condition cannot be satisfied by missing data.
#[must_use]
pub fn match_condition(
    field: Option<&str>,
    operator: ConditionOperator,
    value: &ConditionValue,
) -> MatchOutcome {
    let Some(raw) = field else {
        return MatchOutcome::degraded("field not found in extracted data");
    };

    match operator {
        ConditionOperator::Equal => match_equality(raw, value, false),
        ConditionOperator::NotEqual => match_equality(raw, value, true),
        ConditionOperator::GreaterThan
        | ConditionOperator::LessThan
        | ConditionOperator::GreaterOrEqual
        | ConditionOperator::LessOrEqual => match_ordering(raw, operator, value),
        ConditionOperator::Contains => match_substring(raw, value, false),
        ConditionOperator::NotContain => match_substring(raw, value, true),
        ConditionOperator::InRange => match_range(raw, value),
    }
}

// ============================================================================
// SECTION: Equality
// ============================================================================

/// Compares for equality, preferring a shared ordered type over raw strings.
fn match_equality(raw: &str, value: &ConditionValue, negate: bool) -> MatchOutcome {
    let Some(expected) = value.as_scalar() else {
        return MatchOutcome::degraded("equality comparison requires a scalar value");
    };
    let equal = ordered_pair(raw, expected).map_or_else(
        || raw.trim() == expected.trim(),
        |(left, right)| ordered_cmp(&left, &right) == Some(Ordering::Equal),
    );
    MatchOutcome::from_bool(equal != negate)
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

/// Compares with an ordering operator; both sides must share an ordered type.
fn match_ordering(raw: &str, operator: ConditionOperator, value: &ConditionValue) -> MatchOutcome {
    let Some(expected) = value.as_scalar() else {
        return MatchOutcome::degraded(format!("{operator} requires a scalar value"));
    };
    let Some((left, right)) = ordered_pair(raw, expected) else {
        return MatchOutcome::degraded(format!(
            "cannot compare `{raw}` with `{expected}` as numbers or dates"
        ));
    };
    let Some(ordering) = ordered_cmp(&left, &right) else {
        return MatchOutcome::degraded(format!(
            "cannot compare `{raw}` with `{expected}` as numbers or dates"
        ));
    };
    let satisfied = match operator {
        ConditionOperator::GreaterThan => ordering.is_gt(),
        ConditionOperator::GreaterOrEqual => ordering.is_ge(),
        ConditionOperator::LessThan => ordering.is_lt(),
        ConditionOperator::LessOrEqual => ordering.is_le(),
        _ => return MatchOutcome::degraded(format!("{operator} is not an ordering operator")),
    };
    MatchOutcome::from_bool(satisfied)
}

// ============================================================================
// SECTION: Substrings
// ============================================================================

/// Case-insensitive substring test on the string forms.
fn match_substring(raw: &str, value: &ConditionValue, negate: bool) -> MatchOutcome {
    let Some(needle) = value.as_scalar() else {
        return MatchOutcome::degraded("substring comparison requires a scalar value");
    };
    let haystack = raw.trim().to_lowercase();
    let needle = needle.trim().to_lowercase();
    MatchOutcome::from_bool(haystack.contains(&needle) != negate)
}

// ============================================================================
// SECTION: Ranges
// ============================================================================

/// Inclusive range membership under a shared ordered coercion.
fn match_range(raw: &str, value: &ConditionValue) -> MatchOutcome {
    let ConditionValue::Pair([lower, upper]) = value else {
        return MatchOutcome::degraded("In Range requires a [lower, upper] pair");
    };
    let Some((field, lo, hi)) = ordered_triple(raw, lower, upper) else {
        return MatchOutcome::degraded(format!(
            "cannot compare `{raw}` against range [{lower}, {upper}] as numbers or dates"
        ));
    };
    if ordered_cmp(&lo, &hi) == Some(Ordering::Greater) {
        // Save-time validation rejects reversed bounds; never swap silently.
        return MatchOutcome::degraded(format!("range bounds reversed: [{lower}, {upper}]"));
    }
    let above_lower = matches!(ordered_cmp(&lo, &field), Some(Ordering::Less | Ordering::Equal));
    let below_upper = matches!(ordered_cmp(&field, &hi), Some(Ordering::Less | Ordering::Equal));
    MatchOutcome::from_bool(above_lower && below_upper)
}

// ============================================================================
// SECTION: Ordered Coercion
// ============================================================================

/// Resolves two raw strings into a shared ordered type (number, then date).
fn ordered_pair(left: &str, right: &str) -> Option<(FieldValue, FieldValue)> {
    for kind in [FieldKind::Number, FieldKind::Date] {
        if let (TypedField::Value(left), TypedField::Value(right)) =
            (coerce_field(kind, left), coerce_field(kind, right))
        {
            return Some((left, right));
        }
    }
    None
}

/// Resolves three raw strings into a shared ordered type (number, then date).
fn ordered_triple(a: &str, b: &str, c: &str) -> Option<(FieldValue, FieldValue, FieldValue)> {
    for kind in [FieldKind::Number, FieldKind::Date] {
        if let (TypedField::Value(a), TypedField::Value(b), TypedField::Value(c)) =
            (coerce_field(kind, a), coerce_field(kind, b), coerce_field(kind, c))
        {
            return Some((a, b, c));
        }
    }
    None
}

/// Orders two typed values of the same kind.
fn ordered_cmp(left: &FieldValue, right: &FieldValue) -> Option<Ordering> {
    match (left, right) {
        (FieldValue::Numeric(left), FieldValue::Numeric(right)) => left.partial_cmp(right),
        (FieldValue::DateVal(left), FieldValue::DateVal(right)) => Some(left.cmp(right)),
        _ => None,
    }
}
