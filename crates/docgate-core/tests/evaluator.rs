// crates/docgate-core/tests/evaluator.rs
// ============================================================================
// Module: Evaluator Tests
// Description: End-to-end rule evaluation against extracted documents.
// Purpose: Pin bucketing, ordering, and degraded-input behavior.
// Dependencies: docgate-core
// ============================================================================

//! Rule evaluator behavior for templates, severities, and malformed input.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;

use docgate_core::ActionSeverity;
use docgate_core::Condition;
use docgate_core::ConditionOperator;
use docgate_core::ConditionValue;
use docgate_core::ExtractedDocument;
use docgate_core::OutcomeBucket;
use docgate_core::Rule;
use docgate_core::RuleAction;
use docgate_core::RuleId;
use docgate_core::RuleType;
use docgate_core::Template;
use docgate_core::TemplateId;
use docgate_core::Timestamp;
use docgate_core::evaluate_rules;
use docgate_core::evaluate_template;

/// Fixed evaluation timestamp for deterministic assertions.
const NOW: Timestamp = Timestamp::from_unix_millis(1_735_689_600_000);

/// Builds a rule with one condition and the given severity.
fn rule(
    id: &str,
    name: &str,
    rule_type: RuleType,
    condition: Condition,
    severity: ActionSeverity,
    message: &str,
) -> Rule {
    Rule {
        id: RuleId::new(id),
        name: name.to_string(),
        description: None,
        rule_type,
        conditions: vec![condition],
        action: RuleAction {
            severity,
            message: message.to_string(),
        },
        created_at: NOW,
        updated_at: NOW,
    }
}

/// Builds an operator condition on a named field.
fn condition(field: &str, operator: ConditionOperator, value: &str) -> Condition {
    Condition {
        field: Some(field.to_string()),
        operator: Some(operator),
        value: ConditionValue::Scalar(value.to_string()),
    }
}

/// Builds an extracted document from field pairs.
fn document(fields: &[(&str, &str)]) -> ExtractedDocument {
    ExtractedDocument {
        fields: fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect(),
        quality_pages: Vec::new(),
    }
}

#[test]
fn expired_date_rule_fails_the_document() {
    let rule = rule(
        "rule-expiry",
        "Expiry date must be in the future",
        RuleType::BusinessLogic,
        condition("Expiry Date", ConditionOperator::GreaterThan, "2025-01-01"),
        ActionSeverity::Fail,
        "Document has expired",
    );
    let document = document(&[("Expiry Date", "2024-06-01")]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Failed);
    assert_eq!(outcomes[0].message, "Document has expired");
    assert_eq!(outcomes[0].timestamp, NOW);
}

#[test]
fn mandatory_rule_reports_missing_field() {
    let rule = rule(
        "rule-lc",
        "LC Number is required",
        RuleType::MandatoryField,
        Condition {
            field: Some("LC Number".to_string()),
            operator: None,
            value: ConditionValue::default(),
        },
        ActionSeverity::Fail,
        "LC Number must be present",
    );
    let document = document(&[("Amount", "1000")]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Failed);
    assert!(outcomes[0].message.contains("not found in extracted data"));
}

#[test]
fn mandatory_rule_rejects_whitespace_only_values() {
    let rule = rule(
        "rule-lc",
        "LC Number is required",
        RuleType::MandatoryField,
        Condition {
            field: Some("LC Number".to_string()),
            operator: None,
            value: ConditionValue::default(),
        },
        ActionSeverity::Warning,
        "LC Number must be present",
    );
    let document = document(&[("LC Number", "   ")]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Warning);
    assert!(outcomes[0].message.contains("is empty"));
}

#[test]
fn mandatory_rule_without_field_passes_with_diagnostic() {
    let rule = rule(
        "rule-misconfigured",
        "Misconfigured mandatory rule",
        RuleType::MandatoryField,
        Condition {
            field: None,
            operator: None,
            value: ConditionValue::default(),
        },
        ActionSeverity::Fail,
        "unused",
    );
    let document = document(&[]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Passed);
    assert!(outcomes[0].message.contains("no field configured"));
}

#[test]
fn warning_severity_buckets_as_warning() {
    let rule = rule(
        "rule-currency",
        "Currency should be USD",
        RuleType::FormatValidation,
        condition("Currency", ConditionOperator::Equal, "USD"),
        ActionSeverity::Warning,
        "Currency is not USD",
    );
    let document = document(&[("Currency", "EUR")]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Warning);
    assert_eq!(outcomes[0].message, "Currency is not USD");
}

#[test]
fn satisfied_rule_passes_with_standard_message() {
    let rule = rule(
        "rule-amount",
        "Amount within limit",
        RuleType::BusinessLogic,
        condition("Amount", ConditionOperator::LessOrEqual, "1000000"),
        ActionSeverity::Fail,
        "Amount exceeds limit",
    );
    let document = document(&[("Amount", "250,000.00")]);

    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Passed);
    assert_eq!(outcomes[0].message, "All rule conditions satisfied");
}

#[test]
fn malformed_predicate_rule_fails_with_diagnostic() {
    let rule = rule(
        "rule-broken",
        "Broken rule",
        RuleType::FormatValidation,
        Condition {
            field: Some("Amount".to_string()),
            operator: None,
            value: ConditionValue::default(),
        },
        ActionSeverity::Warning,
        "should not matter",
    );
    let document = document(&[("Amount", "100")]);

    // Malformed conditions always bucket as failed, even at warning severity.
    let outcomes = evaluate_rules(&document, &[rule], NOW);
    assert_eq!(outcomes[0].bucket, OutcomeBucket::Failed);
    assert!(outcomes[0].message.contains("missing a field or operator"));
}

#[test]
fn template_evaluation_preserves_rule_order_and_skips_dangling_ids() {
    let first = rule(
        "rule-1",
        "First",
        RuleType::BusinessLogic,
        condition("Amount", ConditionOperator::GreaterThan, "0"),
        ActionSeverity::Fail,
        "Amount must be positive",
    );
    let second = rule(
        "rule-2",
        "Second",
        RuleType::FormatValidation,
        condition("Currency", ConditionOperator::Equal, "USD"),
        ActionSeverity::Warning,
        "Currency is not USD",
    );
    let catalog = vec![second.clone(), first.clone()];

    let template = Template {
        id: TemplateId::new("template-1"),
        name: "Invoice".to_string(),
        description: None,
        prompt: "Extract invoice fields".to_string(),
        field_schema: BTreeMap::from([
            ("Amount".to_string(), "number".to_string()),
            ("Currency".to_string(), "text".to_string()),
        ]),
        rule_ids: vec![
            RuleId::new("rule-1"),
            RuleId::new("rule-missing"),
            RuleId::new("rule-2"),
        ],
        created_at: NOW,
        updated_at: NOW,
    };
    let document = document(&[("Amount", "100"), ("Currency", "USD")]);

    let outcomes = evaluate_template(&template, &catalog, &document, NOW);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].rule_name, "First");
    assert_eq!(outcomes[1].rule_name, "Second");
}

#[test]
fn template_evaluation_flags_schema_drift() {
    let drifted = rule(
        "rule-drift",
        "References undeclared field",
        RuleType::BusinessLogic,
        condition("Undeclared", ConditionOperator::Equal, "x"),
        ActionSeverity::Warning,
        "Undeclared mismatch",
    );
    let template = Template {
        id: TemplateId::new("template-1"),
        name: "Invoice".to_string(),
        description: None,
        prompt: "Extract invoice fields".to_string(),
        field_schema: BTreeMap::from([("Amount".to_string(), "number".to_string())]),
        rule_ids: vec![RuleId::new("rule-drift")],
        created_at: NOW,
        updated_at: NOW,
    };
    let document = document(&[("Undeclared", "x")]);

    let outcomes = evaluate_template(&template, &[drifted], &document, NOW);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].message.contains("not declared in the template field schema"));
}

#[test]
fn evaluation_is_deterministic_for_fixed_inputs() {
    let rules = vec![
        rule(
            "rule-1",
            "Amount positive",
            RuleType::BusinessLogic,
            condition("Amount", ConditionOperator::GreaterThan, "0"),
            ActionSeverity::Fail,
            "Amount must be positive",
        ),
        rule(
            "rule-2",
            "Currency USD",
            RuleType::FormatValidation,
            condition("Currency", ConditionOperator::Equal, "USD"),
            ActionSeverity::Warning,
            "Currency is not USD",
        ),
    ];
    let document = document(&[("Amount", "42"), ("Currency", "GBP")]);

    let first = evaluate_rules(&document, &rules, NOW);
    let second = evaluate_rules(&document, &rules, NOW);
    assert_eq!(first, second);
}
