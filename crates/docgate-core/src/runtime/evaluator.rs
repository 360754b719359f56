// docgate-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Docgate Rule Evaluator
// Description: Applies catalog rules to an extracted document.
// Purpose: Produce deterministic per-rule outcomes in template order.
// Dependencies: crate::core, crate::runtime::matcher
// ============================================================================

//! ## Overview
//! The evaluator applies each rule bound to a document's template against the
//! extracted field values. Rules are independent; outcomes are listed in the
//! template's rule order so results stay reproducible and diffable.
//! Evaluation is a pure function of its inputs: no I/O, no clock reads, no
//! shared mutable state, and a single malformed rule degrades into a failed
//! outcome with a diagnostic rather than aborting the document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::Condition;
use crate::core::ExtractedDocument;
use crate::core::OutcomeBucket;
use crate::core::Rule;
use crate::core::RuleOutcome;
use crate::core::RuleType;
use crate::core::Template;
use crate::core::Timestamp;
use crate::core::rule::ActionSeverity;
use crate::runtime::matcher::MatchOutcome;
use crate::runtime::matcher::match_condition;

// ============================================================================
// SECTION: Template Evaluation
// ============================================================================

/// Evaluates the rules bound to a template against an extracted document.
///
/// Rule ids are resolved against `catalog_rules` in template order; dangling
/// ids are skipped defensively (template save-time validation rejects them,
/// but a stale catalog must not abort evaluation).
#[must_use]
pub fn evaluate_template(
    template: &Template,
    catalog_rules: &[Rule],
    document: &ExtractedDocument,
    now: Timestamp,
) -> Vec<RuleOutcome> {
    template
        .rule_ids
        .iter()
        .filter_map(|rule_id| catalog_rules.iter().find(|rule| &rule.id == rule_id))
        .map(|rule| evaluate_rule(document, rule, Some(&template.field_schema), now))
        .collect()
}

/// Evaluates a pre-resolved rule list against an extracted document.
///
/// Outcome listing order follows the input rule order.
#[must_use]
pub fn evaluate_rules(
    document: &ExtractedDocument,
    rules: &[Rule],
    now: Timestamp,
) -> Vec<RuleOutcome> {
    rules.iter().map(|rule| evaluate_rule(document, rule, None, now)).collect()
}

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

/// Per-rule evaluation state folded over the rule's conditions.
#[derive(Debug, Default)]
struct ConditionFold {
    /// All conditions held so far.
    satisfied: bool,
    /// A condition was structurally malformed (evaluation-error path).
    malformed: bool,
    /// Collected diagnostics across conditions.
    diagnostics: Vec<String>,
}

/// Evaluates one rule and buckets the outcome.
fn evaluate_rule(
    document: &ExtractedDocument,
    rule: &Rule,
    field_schema: Option<&BTreeMap<String, String>>,
    now: Timestamp,
) -> RuleOutcome {
    let mut fold = ConditionFold {
        satisfied: true,
        ..ConditionFold::default()
    };

    for condition in &rule.conditions {
        let outcome = match rule.rule_type {
            RuleType::MandatoryField => mandatory_outcome(condition, document),
            RuleType::FormatValidation | RuleType::BusinessLogic => {
                predicate_outcome(condition, document, &mut fold)
            }
        };
        fold.satisfied &= outcome.satisfied;
        if let Some(diagnostic) = outcome.diagnostic {
            fold.diagnostics.push(diagnostic);
        }
        note_schema_drift(condition, field_schema, &mut fold);
    }

    let bucket = if fold.malformed {
        OutcomeBucket::Failed
    } else if fold.satisfied {
        OutcomeBucket::Passed
    } else {
        match rule.action.severity {
            ActionSeverity::Warning => OutcomeBucket::Warning,
            ActionSeverity::Fail => OutcomeBucket::Failed,
        }
    };

    RuleOutcome {
        rule_name: rule.name.clone(),
        rule_type: rule.rule_type,
        message: outcome_message(rule, bucket, &fold.diagnostics),
        timestamp: now,
        bucket,
    }
}

/// Implicit present-and-non-empty check for mandatory-field rules.
fn mandatory_outcome(condition: &Condition, document: &ExtractedDocument) -> MatchOutcome {
    let Some(field) = condition.field.as_deref().filter(|field| !field.trim().is_empty()) else {
        // A mandatory condition naming no field has nothing to require; keep
        // the document passing but surface the misconfiguration.
        return MatchOutcome {
            satisfied: true,
            diagnostic: Some("mandatory condition has no field configured".to_string()),
        };
    };
    match document.field(field) {
        None => MatchOutcome::degraded(format!("field `{field}` not found in extracted data")),
        Some(value) if value.trim().is_empty() => {
            MatchOutcome::degraded(format!("field `{field}` is empty"))
        }
        Some(_) => MatchOutcome::satisfied(),
    }
}

/// Operator-based condition check for format and business rules.
fn predicate_outcome(
    condition: &Condition,
    document: &ExtractedDocument,
    fold: &mut ConditionFold,
) -> MatchOutcome {
    let field = condition.field.as_deref().filter(|field| !field.trim().is_empty());
    let (Some(field), Some(operator)) = (field, condition.operator) else {
        // Save-time validation rejects this shape; degrade instead of abort.
        fold.malformed = true;
        return MatchOutcome::degraded("rule condition is missing a field or operator");
    };
    match_condition(document.field(field), operator, &condition.value)
}

/// Flags conditions that reference fields outside the template schema.
///
/// This is a data-quality signal only; the condition is still evaluated.
fn note_schema_drift(
    condition: &Condition,
    field_schema: Option<&BTreeMap<String, String>>,
    fold: &mut ConditionFold,
) {
    let (Some(schema), Some(field)) = (field_schema, condition.field.as_deref()) else {
        return;
    };
    if !field.trim().is_empty() && !schema.contains_key(field) {
        fold.diagnostics
            .push(format!("field `{field}` is not declared in the template field schema"));
    }
}

/// Composes the outcome message from the rule action and diagnostics.
fn outcome_message(rule: &Rule, bucket: OutcomeBucket, diagnostics: &[String]) -> String {
    let base = match bucket {
        OutcomeBucket::Passed => "All rule conditions satisfied",
        OutcomeBucket::Warning | OutcomeBucket::Failed => rule.action.message.as_str(),
    };
    if diagnostics.is_empty() {
        base.to_string()
    } else {
        format!("{base} ({})", diagnostics.join("; "))
    }
}
