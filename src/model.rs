//! Domain records for the weather aggregation pipeline.
//!
//! Two record kinds are persisted, both append-only: the verbatim payload
//! captured from a source ([`RawRecord`]) and its normalized counterpart
//! ([`NormalizedRecord`]). Everything else is transient pipeline state.

use chrono::{DateTime, Local};
use serde_derive::Serialize;

/// A successful fetch from one source, not yet persisted or parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReading {
    pub source_id: u32,
    pub payload: String,
}

/// Input for appending a raw record; the store assigns the identity.
#[derive(Debug, Clone)]
pub struct NewRawRecord {
    pub source_id: u32,
    pub payload: String,
    pub timestamp: DateTime<Local>,
}

/// Input for appending a normalized record; the store assigns the identity.
#[derive(Debug, Clone)]
pub struct NewNormalizedRecord {
    pub source_id: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: DateTime<Local>,
    pub raw_id: i64,
}

/// Verbatim payload persisted before any parsing is attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Store-assigned identity
    pub id: i64,
    pub source_id: u32,
    pub payload: String,
    pub timestamp: DateTime<Local>,
}

/// Temperature/humidity pair extracted from any of the recognized payload
/// shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalReading {
    pub temperature: f64,
    pub humidity: f64,
}

/// Normalized reading persisted alongside its raw counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Store-assigned identity
    pub id: i64,
    pub source_id: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: DateTime<Local>,
    /// Lookup key of the raw record this was derived from. A plain id, not
    /// an owning reference: the raw record outlives this one if either is
    /// ever removed.
    pub raw_id: i64,
}

/// Mean temperature/humidity over the full normalized history, computed
/// fresh on every aggregation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub average_temperature: f64,
    pub average_humidity: f64,
}

impl AggregateResult {
    /// Aggregate returned when no normalized history exists yet.
    pub fn empty() -> Self {
        Self {
            average_temperature: 0.0,
            average_humidity: 0.0,
        }
    }
}

/// Rounds to 2 decimal places with round-half-up (away from zero) semantics.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
