// crates/docgate-core/tests/wire_format.rs
// ============================================================================
// Module: Wire Format Tests
// Description: Serialized shapes for rules, templates, and results.
// Purpose: Pin the persisted catalog JSON so stored data stays readable.
// Dependencies: docgate-core, serde_json
// ============================================================================

//! Serialized catalog shapes: key names, operator strings, and timestamps.

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

use docgate_core::ActionSeverity;
use docgate_core::ComplianceStatus;
use docgate_core::ConditionOperator;
use docgate_core::ConditionValue;
use docgate_core::QualityClassification;
use docgate_core::Rule;
use docgate_core::RuleType;
use docgate_core::Template;
use docgate_core::Timestamp;
use docgate_core::ValidationResult;
use serde_json::json;

#[test]
fn rule_json_uses_catalog_key_names() -> Result<(), Box<dyn std::error::Error>> {
    let raw = json!({
        "id": "rule-1",
        "name": "Amount within limit",
        "description": "Reject very large invoices",
        "rule_type": "Business Logics",
        "condition": [
            {"field": "Amount", "condition": "Less Than or Equal", "value": "1000000"}
        ],
        "action": {"action": "fail", "message": "Amount exceeds limit"},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    });

    let rule: Rule = serde_json::from_value(raw.clone())?;
    assert_eq!(rule.rule_type, RuleType::BusinessLogic);
    assert_eq!(rule.conditions.len(), 1);
    assert_eq!(rule.conditions[0].operator, Some(ConditionOperator::LessOrEqual));
    assert_eq!(rule.action.severity, ActionSeverity::Fail);
    assert_eq!(rule.created_at, Timestamp::from_unix_millis(1_735_689_600_000));

    let round = serde_json::to_value(&rule)?;
    assert_eq!(round, raw);
    Ok(())
}

#[test]
fn operator_strings_match_the_catalog_vocabulary() -> Result<(), Box<dyn std::error::Error>> {
    let expectations = [
        (ConditionOperator::Equal, "Equal"),
        (ConditionOperator::NotEqual, "Not Equal"),
        (ConditionOperator::GreaterThan, "Greater Than"),
        (ConditionOperator::LessThan, "Less Than"),
        (ConditionOperator::GreaterOrEqual, "Greater Than or Equal"),
        (ConditionOperator::LessOrEqual, "Less Than or Equal"),
        (ConditionOperator::Contains, "Contains"),
        (ConditionOperator::NotContain, "Not Contain"),
        (ConditionOperator::InRange, "In Range"),
    ];
    for (operator, expected) in expectations {
        assert_eq!(serde_json::to_value(operator)?, json!(expected));
    }
    Ok(())
}

#[test]
fn rule_type_strings_match_the_catalog_vocabulary() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(serde_json::to_value(RuleType::MandatoryField)?, json!("Mandatory Fields"));
    assert_eq!(serde_json::to_value(RuleType::FormatValidation)?, json!("Format Validation"));
    assert_eq!(serde_json::to_value(RuleType::BusinessLogic)?, json!("Business Logics"));
    Ok(())
}

#[test]
fn range_values_deserialize_as_pairs() -> Result<(), Box<dyn std::error::Error>> {
    let value: ConditionValue = serde_json::from_value(json!(["10", "100"]))?;
    assert_eq!(value, ConditionValue::Pair(["10".to_string(), "100".to_string()]));

    let value: ConditionValue = serde_json::from_value(json!("42"))?;
    assert_eq!(value.as_scalar(), Some("42"));
    Ok(())
}

#[test]
fn mandatory_rule_conditions_may_omit_field_and_operator()
-> Result<(), Box<dyn std::error::Error>> {
    let raw = json!({
        "id": "rule-1",
        "name": "LC Number required",
        "rule_type": "Mandatory Fields",
        "condition": [{"field": "LC Number"}],
        "action": {"action": "warning", "message": "LC Number must be present"},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    });
    let rule: Rule = serde_json::from_value(raw)?;
    assert_eq!(rule.conditions[0].operator, None);
    assert_eq!(rule.conditions[0].value, ConditionValue::default());
    rule.validate()?;
    Ok(())
}

#[test]
fn template_schema_serializes_under_the_field_key() -> Result<(), Box<dyn std::error::Error>> {
    let raw = json!({
        "id": "template-1",
        "name": "Invoice",
        "prompt": "Extract invoice fields",
        "field": {"Amount": "number", "Currency": "text"},
        "rule_ids": ["rule-1"],
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    });

    let template: Template = serde_json::from_value(raw.clone())?;
    assert_eq!(template.field_schema.len(), 2);
    assert_eq!(template.field_schema.get("Amount").map(String::as_str), Some("number"));

    let round = serde_json::to_value(&template)?;
    assert_eq!(round, raw);
    Ok(())
}

#[test]
fn templates_tolerate_missing_rule_ids() -> Result<(), Box<dyn std::error::Error>> {
    let raw = json!({
        "id": "template-1",
        "name": "Invoice",
        "prompt": "Extract invoice fields",
        "field": {},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    });
    let template: Template = serde_json::from_value(raw)?;
    assert!(template.rule_ids.is_empty());
    Ok(())
}

#[test]
fn validation_result_statuses_use_snake_case() -> Result<(), Box<dyn std::error::Error>> {
    let result = ValidationResult {
        passed_rules: Vec::new(),
        warning_rules: Vec::new(),
        failed_rules: Vec::new(),
        overall_status: ComplianceStatus::NonCompliant,
        quality_classification: QualityClassification::NoData,
    };
    let value = serde_json::to_value(&result)?;
    assert_eq!(value["overall_status"], json!("non_compliant"));
    assert_eq!(value["quality_classification"], json!("no_data"));
    Ok(())
}

#[test]
fn timestamps_round_trip_through_rfc3339() -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = Timestamp::from_unix_millis(1_735_689_600_000);
    let value = serde_json::to_value(timestamp)?;
    assert_eq!(value, json!("2025-01-01T00:00:00Z"));

    let parsed: Timestamp = serde_json::from_value(value)?;
    assert_eq!(parsed, timestamp);
    Ok(())
}
