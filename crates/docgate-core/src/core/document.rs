// docgate-core/src/core/document.rs
// ============================================================================
// Module: Docgate Extracted Document
// Description: Immutable extraction output consumed by the engine.
// Purpose: Carry extracted field values and per-page quality into evaluation.
// Dependencies: crate::core::quality, serde
// ============================================================================

//! ## Overview
//! An extracted document is produced once per document version by the
//! external extraction pipeline and never mutated afterwards. The engine
//! only reads it: field values feed the rule evaluator and per-page quality
//! feeds the quality aggregator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::quality::QualityMetrics;

// ============================================================================
// SECTION: Page Quality
// ============================================================================

/// Quality metrics for a single page, keyed by page number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageQuality {
    /// One-based page number.
    pub page: u32,
    /// Quality measurements for the page.
    pub quality_metrics: QualityMetrics,
}

// ============================================================================
// SECTION: Extracted Documents
// ============================================================================

/// Immutable extraction output for one document version.
///
/// # Invariants
/// - Produced once by the extraction pipeline; the engine only reads it.
/// - Field values are raw strings, possibly empty; absence and emptiness are
///   both treated as "missing" by mandatory-field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractedDocument {
    /// Extracted field values keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Per-page quality metrics in page order.
    #[serde(default)]
    pub quality_pages: Vec<PageQuality>,
}

impl ExtractedDocument {
    /// Returns the raw extracted value for a field when present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
