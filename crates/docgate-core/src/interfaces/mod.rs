// docgate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Docgate Interfaces
// Description: Backend-agnostic interfaces for catalog and result storage.
// Purpose: Define the contract surfaces used by Docgate services.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Docgate integrates with storage backends without
//! embedding backend-specific details. Implementations must enforce the
//! catalog invariants uniformly: rule names are unique, templates never
//! reference missing rules at save time, and deleting a rule detaches it
//! from every template that bound it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::DocumentId;
use crate::core::identifiers::RuleId;
use crate::core::identifiers::TemplateId;
use crate::core::outcome::ValidationResult;
use crate::core::rule::Rule;
use crate::core::rule::RuleError;
use crate::core::template::Template;
use crate::core::template::TemplateError;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Storage errors shared by all catalog backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend reported an error.
    #[error("store backend error: {0}")]
    Backend(String),
    /// Referenced rule does not exist.
    #[error("rule not found: {0}")]
    RuleNotFound(RuleId),
    /// Referenced template does not exist.
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),
    /// No validation result persisted for the document.
    #[error("no validation result for document: {0}")]
    ResultNotFound(DocumentId),
    /// Another rule already uses the name.
    #[error("rule name already exists: {0}")]
    DuplicateRuleName(String),
    /// Another template already uses the name.
    #[error("template name already exists: {0}")]
    DuplicateTemplateName(String),
    /// Rule failed save-time validation.
    #[error("invalid rule: {0}")]
    InvalidRule(#[from] RuleError),
    /// Template failed save-time validation.
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] TemplateError),
}

// ============================================================================
// SECTION: Rule Store
// ============================================================================

/// Catalog storage for rules.
///
/// Implementations validate rules before persisting and keep rule names
/// unique across the catalog.
pub trait RuleStore: Send + Sync {
    /// Persists a new rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRule`] on validation failure and
    /// [`StoreError::DuplicateRuleName`] when the name is taken.
    fn create_rule(&self, rule: Rule) -> Result<(), StoreError>;

    /// Replaces an existing rule, matched by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RuleNotFound`] when the id is unknown,
    /// [`StoreError::InvalidRule`] on validation failure, and
    /// [`StoreError::DuplicateRuleName`] when the new name collides with
    /// another rule.
    fn update_rule(&self, rule: Rule) -> Result<(), StoreError>;

    /// Deletes a rule and detaches it from every template that bound it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RuleNotFound`] when the id is unknown.
    fn delete_rule(&self, id: &RuleId) -> Result<(), StoreError>;

    /// Loads a rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, StoreError>;

    /// Lists all rules, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn list_rules(&self) -> Result<Vec<Rule>, StoreError>;
}

// ============================================================================
// SECTION: Template Store
// ============================================================================

/// Catalog storage for templates.
///
/// Implementations reject dangling `rule_ids` at save time; evaluation
/// tolerates them defensively but persisted templates never start dangling.
pub trait TemplateStore: Send + Sync {
    /// Persists a new template.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTemplate`] when validation fails,
    /// including dangling rule references.
    fn create_template(&self, template: Template) -> Result<(), StoreError>;

    /// Replaces an existing template, matched by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TemplateNotFound`] when the id is unknown and
    /// [`StoreError::InvalidTemplate`] when validation fails.
    fn update_template(&self, template: Template) -> Result<(), StoreError>;

    /// Loads a template by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, StoreError>;

    /// Lists all templates, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn list_templates(&self) -> Result<Vec<Template>, StoreError>;
}

// ============================================================================
// SECTION: Validation Result Store
// ============================================================================

/// Storage for per-document validation results.
pub trait ValidationResultStore: Send + Sync {
    /// Persists the result of an evaluation run, replacing any prior result
    /// for the same document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn save_result(
        &self,
        document_id: &DocumentId,
        result: ValidationResult,
    ) -> Result<(), StoreError>;

    /// Loads the persisted result for a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend fails.
    fn load_result(&self, document_id: &DocumentId)
    -> Result<Option<ValidationResult>, StoreError>;
}

// ============================================================================
// SECTION: Catalog Store
// ============================================================================

/// Full catalog storage surface: rules, templates, and validation results.
pub trait CatalogStore: RuleStore + TemplateStore + ValidationResultStore {}

impl<T> CatalogStore for T where T: RuleStore + TemplateStore + ValidationResultStore {}
