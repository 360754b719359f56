// docgate-api/src/error.rs
// ============================================================================
// Module: Docgate API Errors
// Description: HTTP error mapping for store and request failures.
// Purpose: Translate engine errors into status codes and JSON bodies.
// Dependencies: axum, docgate-core, serde_json
// ============================================================================

//! ## Overview
//! Every error leaves the service as a JSON `{ "message": … }` body. Catalog
//! validation problems map to 400, missing entities to 404, and backend
//! failures to 500 with the detail logged rather than leaked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use docgate_core::StoreError;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: API Errors
// ============================================================================

/// Errors surfaced by the REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload or catalog state rejected.
    #[error("{0}")]
    BadRequest(String),
    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Storage backend failure.
    #[error("internal storage error")]
    Backend(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InvalidRule(_)
            | StoreError::InvalidTemplate(_)
            | StoreError::DuplicateRuleName(_)
            | StoreError::DuplicateTemplateName(_) => Self::BadRequest(error.to_string()),
            StoreError::RuleNotFound(_)
            | StoreError::TemplateNotFound(_)
            | StoreError::ResultNotFound(_) => Self::NotFound(error.to_string()),
            StoreError::Backend(detail) => Self::Backend(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Backend(detail) => {
                tracing::error!(detail, "catalog store backend failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal storage error".to_string())
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
