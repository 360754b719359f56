// docgate-core/src/core/time.rs
// ============================================================================
// Module: Docgate Time Model
// Description: Canonical timestamp representation for outcomes and catalog rows.
// Purpose: Provide deterministic, replayable time values across Docgate records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Docgate uses explicit time values embedded in outcomes and catalog rows to
//! keep evaluation deterministic. The core engine never reads wall-clock time
//! directly; hosts must supply timestamps at the service boundary. On the
//! wire a timestamp renders as an RFC3339 string, matching the persisted
//! shapes the presentation layer already parses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in Docgate outcomes and catalog records.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time.
/// - Stored as unix epoch milliseconds; serialized as an RFC3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(&self) -> i64 {
        self.0
    }

    /// Renders the timestamp as an RFC3339 string.
    ///
    /// Returns `None` when the millisecond value falls outside the range
    /// representable by a calendar date.
    #[must_use]
    pub fn to_rfc3339(&self) -> Option<String> {
        let nanos = i128::from(self.0).checked_mul(1_000_000)?;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
        datetime.format(&Rfc3339).ok()
    }

    /// Parses a timestamp from an RFC3339 string.
    ///
    /// Returns `None` when the input is not a valid RFC3339 date-time.
    #[must_use]
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        let datetime = OffsetDateTime::parse(value, &Rfc3339).ok()?;
        let millis = datetime.unix_timestamp_nanos() / 1_000_000;
        i64::try_from(millis).ok().map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(rendered) => f.write_str(&rendered),
            None => self.0.fmt(f),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self
            .to_rfc3339()
            .ok_or_else(|| S::Error::custom("timestamp out of RFC3339 range"))?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid RFC3339 timestamp: {raw}")))
    }
}
