// docgate-core/src/runtime/store.rs
// ============================================================================
// Module: Docgate In-Memory Catalog Store
// Description: Simple in-memory catalog store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of the catalog
//! store traits for tests and local demos. It enforces the same invariants
//! as durable backends: validated rules, unique names, no dangling template
//! references at save time, and rule deletion detaching template bindings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::DocumentId;
use crate::core::Rule;
use crate::core::RuleId;
use crate::core::Template;
use crate::core::TemplateId;
use crate::core::ValidationResult;
use crate::interfaces::CatalogStore;
use crate::interfaces::RuleStore;
use crate::interfaces::StoreError;
use crate::interfaces::TemplateStore;
use crate::interfaces::ValidationResultStore;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Catalog contents guarded by the store mutex.
#[derive(Debug, Default)]
struct CatalogState {
    /// Rules in insertion order.
    rules: Vec<Rule>,
    /// Templates in insertion order.
    templates: Vec<Template>,
    /// Validation results keyed by document id.
    results: BTreeMap<String, ValidationResult>,
}

/// In-memory catalog store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogStore {
    /// Catalog state protected by a mutex.
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory catalog store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    /// Locks the catalog state, mapping poisoning into a store error.
    fn lock(&self) -> Result<MutexGuard<'_, CatalogState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("catalog store mutex poisoned".to_string()))
    }
}

impl RuleStore for InMemoryCatalogStore {
    fn create_rule(&self, rule: Rule) -> Result<(), StoreError> {
        rule.validate()?;
        let mut state = self.lock()?;
        if state.rules.iter().any(|existing| existing.name == rule.name) {
            return Err(StoreError::DuplicateRuleName(rule.name));
        }
        if state.rules.iter().any(|existing| existing.id == rule.id) {
            return Err(StoreError::Backend(format!("rule id already exists: {}", rule.id)));
        }
        state.rules.push(rule);
        Ok(())
    }

    fn update_rule(&self, rule: Rule) -> Result<(), StoreError> {
        rule.validate()?;
        let mut state = self.lock()?;
        if state
            .rules
            .iter()
            .any(|existing| existing.name == rule.name && existing.id != rule.id)
        {
            return Err(StoreError::DuplicateRuleName(rule.name));
        }
        let Some(slot) = state.rules.iter_mut().find(|existing| existing.id == rule.id) else {
            return Err(StoreError::RuleNotFound(rule.id));
        };
        *slot = rule;
        Ok(())
    }

    fn delete_rule(&self, id: &RuleId) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.rules.len();
        state.rules.retain(|rule| &rule.id != id);
        if state.rules.len() == before {
            return Err(StoreError::RuleNotFound(id.clone()));
        }
        for template in &mut state.templates {
            template.rule_ids.retain(|rule_id| rule_id != id);
        }
        Ok(())
    }

    fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, StoreError> {
        let state = self.lock()?;
        Ok(state.rules.iter().find(|rule| &rule.id == id).cloned())
    }

    fn list_rules(&self) -> Result<Vec<Rule>, StoreError> {
        let state = self.lock()?;
        Ok(state.rules.iter().rev().cloned().collect())
    }
}

impl TemplateStore for InMemoryCatalogStore {
    fn create_template(&self, template: Template) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        template.validate_against(&state.rules)?;
        if state.templates.iter().any(|existing| existing.name == template.name) {
            return Err(StoreError::DuplicateTemplateName(template.name));
        }
        state.templates.push(template);
        Ok(())
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        template.validate_against(&state.rules)?;
        if state
            .templates
            .iter()
            .any(|existing| existing.name == template.name && existing.id != template.id)
        {
            return Err(StoreError::DuplicateTemplateName(template.name));
        }
        let Some(slot) =
            state.templates.iter_mut().find(|existing| existing.id == template.id)
        else {
            return Err(StoreError::TemplateNotFound(template.id));
        };
        *slot = template;
        Ok(())
    }

    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, StoreError> {
        let state = self.lock()?;
        Ok(state.templates.iter().find(|template| &template.id == id).cloned())
    }

    fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let state = self.lock()?;
        Ok(state.templates.iter().rev().cloned().collect())
    }
}

impl ValidationResultStore for InMemoryCatalogStore {
    fn save_result(
        &self,
        document_id: &DocumentId,
        result: ValidationResult,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.results.insert(document_id.as_str().to_string(), result);
        Ok(())
    }

    fn load_result(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<ValidationResult>, StoreError> {
        let state = self.lock()?;
        Ok(state.results.get(document_id.as_str()).cloned())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared catalog store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedCatalogStore {
    /// Inner store implementation.
    inner: Arc<dyn CatalogStore>,
}

impl SharedCatalogStore {
    /// Wraps a catalog store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl CatalogStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl RuleStore for SharedCatalogStore {
    fn create_rule(&self, rule: Rule) -> Result<(), StoreError> {
        self.inner.create_rule(rule)
    }

    fn update_rule(&self, rule: Rule) -> Result<(), StoreError> {
        self.inner.update_rule(rule)
    }

    fn delete_rule(&self, id: &RuleId) -> Result<(), StoreError> {
        self.inner.delete_rule(id)
    }

    fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, StoreError> {
        self.inner.get_rule(id)
    }

    fn list_rules(&self) -> Result<Vec<Rule>, StoreError> {
        self.inner.list_rules()
    }
}

impl TemplateStore for SharedCatalogStore {
    fn create_template(&self, template: Template) -> Result<(), StoreError> {
        self.inner.create_template(template)
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        self.inner.update_template(template)
    }

    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, StoreError> {
        self.inner.get_template(id)
    }

    fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.inner.list_templates()
    }
}

impl ValidationResultStore for SharedCatalogStore {
    fn save_result(
        &self,
        document_id: &DocumentId,
        result: ValidationResult,
    ) -> Result<(), StoreError> {
        self.inner.save_result(document_id, result)
    }

    fn load_result(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<ValidationResult>, StoreError> {
        self.inner.load_result(document_id)
    }
}
