// docgate-core/src/core/field.rs
// ============================================================================
// Module: Docgate Field Model
// Description: Typed field values and string coercion for extracted data.
// Purpose: Resolve raw extracted strings into typed values exactly once.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Extraction produces raw string values; the field model resolves each one
//! into a tagged [`FieldValue`] before matching so comparisons never re-parse.
//! Coercion failure is not an error: it yields a typed [`Uncoercible`] marker
//! that the condition matcher folds into a diagnostic outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Date Formats
// ============================================================================

/// ISO-8601 calendar date (`2025-01-31`).
static ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Slash-separated year-first date (`2025/01/31`).
static SLASH_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]/[month]/[day]");
/// US locale date (`01/31/2025`).
static US_DATE: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Declared or inferred type of an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-text field compared as a string.
    Text,
    /// Numeric field with ordered comparison semantics.
    Number,
    /// Calendar date field with ordered comparison semantics.
    Date,
}

// ============================================================================
// SECTION: Field Values
// ============================================================================

/// Tagged field value resolved from a raw extracted string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value (trimmed raw form).
    Text(String),
    /// Numeric value.
    Numeric(f64),
    /// Calendar date value.
    DateVal(Date),
    /// Inclusive ordered range used by range conditions.
    Range(Box<FieldValue>, Box<FieldValue>),
}

/// Marker for a raw value that could not be coerced to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uncoercible {
    /// Raw string value as extracted.
    pub raw: String,
    /// Kind the value was expected to coerce to.
    pub expected: FieldKind,
}

/// Result of coercing a raw extracted value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedField {
    /// Coercion succeeded.
    Value(FieldValue),
    /// Coercion failed; the matcher turns this into a diagnostic outcome.
    Uncoercible(Uncoercible),
}

// ============================================================================
// SECTION: Coercion
// ============================================================================

/// Coerces a raw extracted string to the declared field kind.
#[must_use]
pub fn coerce_field(kind: FieldKind, raw: &str) -> TypedField {
    let trimmed = raw.trim();
    let value = match kind {
        FieldKind::Text => Some(FieldValue::Text(trimmed.to_string())),
        FieldKind::Number => parse_number(trimmed).map(FieldValue::Numeric),
        FieldKind::Date => parse_date(trimmed).map(FieldValue::DateVal),
    };
    value.map_or_else(
        || {
            TypedField::Uncoercible(Uncoercible {
                raw: raw.to_string(),
                expected: kind,
            })
        },
        TypedField::Value,
    )
}

/// Infers the field kind from a raw string when the schema declares none.
///
/// Numbers win over dates so that bare integers never parse as years.
#[must_use]
pub fn infer_kind(raw: &str) -> FieldKind {
    let trimmed = raw.trim();
    if parse_number(trimmed).is_some() {
        FieldKind::Number
    } else if parse_date(trimmed).is_some() {
        FieldKind::Date
    } else {
        FieldKind::Text
    }
}

/// Parses an integer or decimal string, tolerating thousands separators.
#[must_use]
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    let parsed: f64 = cleaned.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Parses a calendar date from RFC3339 or common locale date strings.
#[must_use]
pub(crate) fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if let Ok(datetime) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(datetime.date());
    }
    for format in [ISO_DATE, SLASH_DATE, US_DATE] {
        if let Ok(date) = Date::parse(trimmed, format) {
            return Some(date);
        }
    }
    None
}
