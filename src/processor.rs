//! Per-reading persistence sequencing.
//!
//! For one successful fetch: save the raw payload verbatim, parse it, then
//! save the normalized record carrying the raw record's id. The raw save
//! comes first on purpose: a payload that fails to parse is still captured.

use crate::error::ProcessError;
use crate::model::{NewNormalizedRecord, NewRawRecord, SourceReading};
use crate::parser;
use crate::store::WeatherStore;
use chrono::Local;
use std::sync::Arc;

pub struct Processor {
    store: Arc<dyn WeatherStore>,
}

impl Processor {
    pub fn new(store: Arc<dyn WeatherStore>) -> Self {
        Self { store }
    }

    /// Persists one reading as a raw/normalized record pair.
    ///
    /// A parse failure fails the item and leaves only the raw record behind;
    /// no zero-valued normalized fallback is ever written. The caller is
    /// expected to log and swallow the error so sibling items are unaffected.
    pub async fn process(&self, reading: SourceReading) -> Result<(), ProcessError> {
        tracing::debug!("Processing reading from source {}", reading.source_id);

        let raw = self
            .store
            .save_raw(NewRawRecord {
                source_id: reading.source_id,
                payload: reading.payload,
                timestamp: Local::now(),
            })
            .await?;

        let canonical = parser::parse(&raw.payload)?;

        let normalized = self
            .store
            .save_normalized(NewNormalizedRecord {
                source_id: raw.source_id,
                temperature: canonical.temperature,
                humidity: canonical.humidity,
                timestamp: Local::now(),
                raw_id: raw.id,
            })
            .await?;

        tracing::info!(
            "Normalized record {} saved for source {} with linked raw id {}",
            normalized.id,
            normalized.source_id,
            normalized.raw_id
        );
        Ok(())
    }
}
