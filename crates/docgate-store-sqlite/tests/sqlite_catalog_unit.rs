// crates/docgate-store-sqlite/tests/sqlite_catalog_unit.rs
// ============================================================================
// Module: SQLite Catalog Store Tests
// Description: Durability and invariant tests for the SQLite catalog store.
// Purpose: Verify persistence, uniqueness, detachment, and fail-closed opens.
// Dependencies: docgate-core, docgate-store-sqlite, tempfile
// ============================================================================

//! `SQLite` catalog store behavior, including reopen-from-disk paths.

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
use std::path::Path;

use docgate_core::ActionSeverity;
use docgate_core::ComplianceStatus;
use docgate_core::Condition;
use docgate_core::ConditionValue;
use docgate_core::DocumentId;
use docgate_core::QualityClassification;
use docgate_core::Rule;
use docgate_core::RuleAction;
use docgate_core::RuleId;
use docgate_core::RuleStore;
use docgate_core::RuleType;
use docgate_core::StoreError;
use docgate_core::Template;
use docgate_core::TemplateId;
use docgate_core::TemplateStore;
use docgate_core::Timestamp;
use docgate_core::ValidationResult;
use docgate_core::ValidationResultStore;
use docgate_store_sqlite::SqliteCatalogStore;
use docgate_store_sqlite::SqliteStoreConfig;

/// Opens a store on a file under the given temp directory.
fn open_store(dir: &Path) -> Result<SqliteCatalogStore, Box<dyn std::error::Error>> {
    let config = SqliteStoreConfig {
        path: dir.join("catalog.sqlite"),
        busy_timeout_ms: 1_000,
        journal_mode: docgate_store_sqlite::SqliteStoreMode::Wal,
        sync_mode: docgate_store_sqlite::SqliteSyncMode::Normal,
    };
    Ok(SqliteCatalogStore::open(&config)?)
}

/// Builds a minimal valid mandatory-field rule.
fn mandatory_rule(id: &str, name: &str, field: &str, created_at_millis: i64) -> Rule {
    Rule {
        id: RuleId::new(id),
        name: name.to_string(),
        description: None,
        rule_type: RuleType::MandatoryField,
        conditions: vec![Condition {
            field: Some(field.to_string()),
            operator: None,
            value: ConditionValue::default(),
        }],
        action: RuleAction {
            severity: ActionSeverity::Fail,
            message: format!("{field} is required"),
        },
        created_at: Timestamp::from_unix_millis(created_at_millis),
        updated_at: Timestamp::from_unix_millis(created_at_millis),
    }
}

/// Builds a template bound to the given rule ids.
fn template(id: &str, name: &str, rule_ids: &[&str]) -> Template {
    Template {
        id: TemplateId::new(id),
        name: name.to_string(),
        description: None,
        prompt: "Extract the declared fields".to_string(),
        field_schema: BTreeMap::new(),
        rule_ids: rule_ids.iter().map(|raw| RuleId::new(*raw)).collect(),
        created_at: Timestamp::from_unix_millis(1_000),
        updated_at: Timestamp::from_unix_millis(1_000),
    }
}

#[test]
fn rules_survive_a_store_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    {
        let store = open_store(dir.path())?;
        store.create_rule(mandatory_rule("rule-1", "First", "A", 1_000))?;
    }
    let store = open_store(dir.path())?;
    let rule = store.get_rule(&RuleId::new("rule-1"))?.ok_or("rule missing after reopen")?;
    assert_eq!(rule.name, "First");
    Ok(())
}

#[test]
fn list_rules_orders_most_recent_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.create_rule(mandatory_rule("rule-1", "Older", "A", 1_000))?;
    store.create_rule(mandatory_rule("rule-2", "Newer", "B", 2_000))?;

    let rules = store.list_rules()?;
    assert_eq!(rules[0].name, "Newer");
    assert_eq!(rules[1].name, "Older");
    Ok(())
}

#[test]
fn duplicate_rule_names_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.create_rule(mandatory_rule("rule-1", "Same Name", "A", 1_000))?;

    let result = store.create_rule(mandatory_rule("rule-2", "Same Name", "B", 2_000));
    assert!(matches!(result, Err(StoreError::DuplicateRuleName(_))));
    Ok(())
}

#[test]
fn update_replaces_the_stored_payload() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.create_rule(mandatory_rule("rule-1", "First", "A", 1_000))?;

    let mut updated = mandatory_rule("rule-1", "Renamed", "B", 1_000);
    updated.updated_at = Timestamp::from_unix_millis(5_000);
    store.update_rule(updated)?;

    let rule = store.get_rule(&RuleId::new("rule-1"))?.ok_or("rule missing")?;
    assert_eq!(rule.name, "Renamed");
    assert_eq!(rule.updated_at, Timestamp::from_unix_millis(5_000));
    Ok(())
}

#[test]
fn update_of_unknown_rule_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let result = store.update_rule(mandatory_rule("ghost", "Ghost", "A", 1_000));
    assert!(matches!(result, Err(StoreError::RuleNotFound(_))));
    Ok(())
}

#[test]
fn deleting_a_rule_detaches_template_bindings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.create_rule(mandatory_rule("rule-1", "First", "A", 1_000))?;
    store.create_rule(mandatory_rule("rule-2", "Second", "B", 2_000))?;
    store.create_template(template("template-1", "Invoice", &["rule-1", "rule-2"]))?;

    store.delete_rule(&RuleId::new("rule-1"))?;

    let stored = store
        .get_template(&TemplateId::new("template-1"))?
        .ok_or("template missing after rule delete")?;
    assert_eq!(stored.rule_ids, vec![RuleId::new("rule-2")]);
    Ok(())
}

#[test]
fn template_rule_order_survives_a_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    {
        let store = open_store(dir.path())?;
        store.create_rule(mandatory_rule("rule-1", "First", "A", 1_000))?;
        store.create_rule(mandatory_rule("rule-2", "Second", "B", 2_000))?;
        store.create_template(template("template-1", "Invoice", &["rule-2", "rule-1"]))?;
    }
    let store = open_store(dir.path())?;
    let stored = store
        .get_template(&TemplateId::new("template-1"))?
        .ok_or("template missing after reopen")?;
    assert_eq!(stored.rule_ids, vec![RuleId::new("rule-2"), RuleId::new("rule-1")]);
    Ok(())
}

#[test]
fn templates_with_dangling_rule_ids_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;

    let result = store.create_template(template("template-1", "Invoice", &["rule-9"]));
    assert!(matches!(result, Err(StoreError::InvalidTemplate(_))));
    Ok(())
}

#[test]
fn results_replace_prior_runs_and_survive_a_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let document_id = DocumentId::new("doc-1");
    let result = ValidationResult {
        passed_rules: Vec::new(),
        warning_rules: Vec::new(),
        failed_rules: Vec::new(),
        overall_status: ComplianceStatus::Compliant,
        quality_classification: QualityClassification::Good,
    };
    {
        let store = open_store(dir.path())?;
        let stale = ValidationResult {
            overall_status: ComplianceStatus::NonCompliant,
            ..result.clone()
        };
        store.save_result(&document_id, stale)?;
        store.save_result(&document_id, result.clone())?;
    }
    let store = open_store(dir.path())?;
    let loaded = store.load_result(&document_id)?.ok_or("result missing after reopen")?;
    assert_eq!(loaded, result);
    Ok(())
}

#[test]
fn load_result_for_unknown_document_is_none() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    assert!(store.load_result(&DocumentId::new("missing"))?.is_none());
    Ok(())
}
