// docgate-api/src/routes.rs
// ============================================================================
// Module: Docgate REST Routes
// Description: Axum handlers for rules, templates, and document results.
// Purpose: Implement the REST surface over the shared catalog store.
// Dependencies: axum, docgate-core, serde, uuid
// ============================================================================

//! ## Overview
//! Handlers accept draft payloads without ids or timestamps; the service
//! assigns both at the boundary so the stored catalog is the single source
//! of truth. Evaluation happens on the intake endpoint only; reads return
//! the persisted result unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use docgate_core::Condition;
use docgate_core::DocumentId;
use docgate_core::ExtractedDocument;
use docgate_core::PageQuality;
use docgate_core::Rule;
use docgate_core::RuleAction;
use docgate_core::RuleId;
use docgate_core::RuleStore;
use docgate_core::RuleType;
use docgate_core::SharedCatalogStore;
use docgate_core::Template;
use docgate_core::TemplateId;
use docgate_core::TemplateStore;
use docgate_core::Timestamp;
use docgate_core::ValidationResult;
use docgate_core::ValidationResultStore;
use docgate_core::aggregate_quality;
use docgate_core::build_validation_result;
use docgate_core::evaluate_template;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ============================================================================
// SECTION: State and Router
// ============================================================================

/// Shared state for all REST handlers.
#[derive(Clone)]
pub struct AppState {
    /// Catalog store backing the service.
    pub store: SharedCatalogStore,
    /// Maximum accepted request body size.
    pub max_body_bytes: usize,
}

/// Builds the REST router over the given state.
#[must_use]
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/{id}", put(update_rule).delete(delete_rule))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/{id}", get(get_template).put(update_template))
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}/extraction", post(submit_extraction))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Reads the system clock as an engine timestamp.
fn now() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX));
    Timestamp::from_unix_millis(millis)
}

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Rule payload without server-assigned fields.
#[derive(Debug, Deserialize)]
pub struct RuleDraft {
    /// Unique rule name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Rule category.
    pub rule_type: RuleType,
    /// Ordered conditions.
    #[serde(rename = "condition")]
    pub conditions: Vec<Condition>,
    /// Action applied when conditions do not hold.
    pub action: RuleAction,
}

impl RuleDraft {
    /// Materializes the draft into a catalog rule.
    fn into_rule(self, id: RuleId, created_at: Timestamp, updated_at: Timestamp) -> Rule {
        Rule {
            id,
            name: self.name,
            description: self.description,
            rule_type: self.rule_type,
            conditions: self.conditions,
            action: self.action,
            created_at,
            updated_at,
        }
    }
}

/// Template payload without server-assigned fields.
#[derive(Debug, Deserialize)]
pub struct TemplateDraft {
    /// Template name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Extraction instruction for the upstream pipeline.
    pub prompt: String,
    /// Field schema mapping name to expected value or description.
    #[serde(rename = "field", default)]
    pub field_schema: BTreeMap<String, String>,
    /// Rules bound to this template.
    #[serde(default)]
    pub rule_ids: Vec<RuleId>,
}

impl TemplateDraft {
    /// Materializes the draft into a catalog template.
    fn into_template(
        self,
        id: TemplateId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Template {
        Template {
            id,
            name: self.name,
            description: self.description,
            prompt: self.prompt,
            field_schema: self.field_schema,
            rule_ids: self.rule_ids,
            created_at,
            updated_at,
        }
    }
}

/// Extraction payload delivered when the upstream pipeline completes.
#[derive(Debug, Deserialize)]
pub struct ExtractionSubmission {
    /// Template the document was extracted against.
    pub template_id: TemplateId,
    /// Extracted field values keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Per-page quality metrics.
    #[serde(default)]
    pub quality_pages: Vec<PageQuality>,
}

// ============================================================================
// SECTION: Rule Handlers
// ============================================================================

/// Lists catalog rules, most recently created first.
async fn list_rules(State(state): State<AppState>) -> Result<Json<Vec<Rule>>, ApiError> {
    Ok(Json(state.store.list_rules()?))
}

/// Creates a rule with a server-assigned id and timestamps.
async fn create_rule(
    State(state): State<AppState>,
    Json(draft): Json<RuleDraft>,
) -> Result<(StatusCode, Json<Rule>), ApiError> {
    let stamp = now();
    let rule = draft.into_rule(RuleId::new(Uuid::new_v4().to_string()), stamp, stamp);
    state.store.create_rule(rule.clone())?;
    tracing::info!(rule_id = %rule.id, name = %rule.name, "rule created");
    Ok((StatusCode::CREATED, Json(rule)))
}

/// Replaces a rule, preserving its creation timestamp.
async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<RuleDraft>,
) -> Result<StatusCode, ApiError> {
    let id = RuleId::new(id);
    let existing = state
        .store
        .get_rule(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("rule not found: {id}")))?;
    let rule = draft.into_rule(id, existing.created_at, now());
    state.store.update_rule(rule)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a rule, detaching it from every template.
async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_rule(&RuleId::new(id.clone()))?;
    tracing::info!(rule_id = %id, "rule deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// SECTION: Template Handlers
// ============================================================================

/// Lists templates, most recently created first.
async fn list_templates(State(state): State<AppState>) -> Result<Json<Vec<Template>>, ApiError> {
    Ok(Json(state.store.list_templates()?))
}

/// Loads a single template by id.
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let id = TemplateId::new(id);
    let template = state
        .store
        .get_template(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("template not found: {id}")))?;
    Ok(Json(template))
}

/// Creates a template with a server-assigned id and timestamps.
async fn create_template(
    State(state): State<AppState>,
    Json(draft): Json<TemplateDraft>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let stamp = now();
    let template =
        draft.into_template(TemplateId::new(Uuid::new_v4().to_string()), stamp, stamp);
    state.store.create_template(template.clone())?;
    tracing::info!(template_id = %template.id, name = %template.name, "template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// Replaces a template, preserving its creation timestamp.
async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<TemplateDraft>,
) -> Result<StatusCode, ApiError> {
    let id = TemplateId::new(id);
    let existing = state
        .store
        .get_template(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("template not found: {id}")))?;
    let template = draft.into_template(id, existing.created_at, now());
    state.store.update_template(template)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// SECTION: Document Handlers
// ============================================================================

/// Runs the engine against freshly extracted data and persists the result.
async fn submit_extraction(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Json(submission): Json<ExtractionSubmission>,
) -> Result<Json<ValidationResult>, ApiError> {
    let template = state.store.get_template(&submission.template_id)?.ok_or_else(|| {
        ApiError::NotFound(format!("template not found: {}", submission.template_id))
    })?;
    let rules = state.store.list_rules()?;
    let document = ExtractedDocument {
        fields: submission.fields,
        quality_pages: submission.quality_pages,
    };

    let outcomes = evaluate_template(&template, &rules, &document, now());
    let quality = aggregate_quality(&document.quality_pages);
    let result = build_validation_result(outcomes, &quality);

    let document_id = DocumentId::new(document_id);
    state.store.save_result(&document_id, result.clone())?;
    tracing::info!(
        document_id = %document_id,
        template_id = %template.id,
        status = ?result.overall_status,
        "document evaluated"
    );
    Ok(Json(result))
}

/// Returns the persisted validation result for a document.
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ValidationResult>, ApiError> {
    let id = DocumentId::new(id);
    let result = state
        .store
        .load_result(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("no validation result for document: {id}")))?;
    Ok(Json(result))
}
