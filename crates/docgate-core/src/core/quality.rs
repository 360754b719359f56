// docgate-core/src/core/quality.rs
// ============================================================================
// Module: Docgate Quality Metrics
// Description: Per-page image quality measurements from the scan pipeline.
// Purpose: Mirror the persisted quality shape consumed by the aggregator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The upstream pipeline scores each page of a scanned document and persists
//! one metrics object per page. The engine only reads `overall_quality` for
//! classification; the remaining measurements ride along so the presentation
//! layer can render per-page detail without a second source of truth.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Quality Metrics
// ============================================================================

/// Per-page image quality measurements.
///
/// # Invariants
/// - Scores are on a 0-100 scale; `overall_quality` drives classification.
/// - Unknown wire fields are tolerated so pipeline additions do not break
///   intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QualityMetrics {
    /// Background noise score.
    #[serde(default)]
    pub background_noise: f64,
    /// Brightness score.
    #[serde(default)]
    pub brightness: f64,
    /// Brightness uniformity score.
    #[serde(default)]
    pub brightness_uniformity: f64,
    /// Contrast score.
    #[serde(default)]
    pub contrast: f64,
    /// Edge strength score.
    #[serde(default)]
    pub edge_strength: f64,
    /// Focus score.
    #[serde(default)]
    pub focus_score: f64,
    /// Lighting uniformity score.
    #[serde(default)]
    pub lighting_uniformity: f64,
    /// Aggregate page quality score in `[0, 100]`.
    #[serde(default)]
    pub overall_quality: f64,
    /// Resolution score.
    #[serde(default)]
    pub resolution_score: f64,
    /// Detected skew angle in degrees.
    #[serde(default)]
    pub skew_angle: f64,
    /// Text/background separation score.
    #[serde(default)]
    pub text_background_separation: f64,
    /// Text clarity score.
    #[serde(default)]
    pub text_clarity: f64,
    /// White balance score.
    #[serde(default)]
    pub white_balance_score: f64,
    /// Page is blurry.
    #[serde(default)]
    pub is_blurry: bool,
    /// Page has low contrast.
    #[serde(default)]
    pub is_low_contrast: bool,
    /// Page resolution is below threshold.
    #[serde(default)]
    pub is_low_resolution: bool,
    /// Page is overexposed.
    #[serde(default)]
    pub is_overexposed: bool,
    /// Page is skewed.
    #[serde(default)]
    pub is_skewed: bool,
    /// Page is underexposed.
    #[serde(default)]
    pub is_underexposed: bool,
    /// Page lighting is uneven.
    #[serde(default)]
    pub is_uneven_lighting: bool,
}
