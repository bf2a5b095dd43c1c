//! Mock implementations and server helpers for testing.
//!
//! Provides wiremock helpers for standing up fake source endpoints and a
//! failing [`WeatherStore`] implementation for exercising persistence
//! error paths.

use crate::error::StorageError;
use crate::model::{NewNormalizedRecord, NewRawRecord, NormalizedRecord, RawRecord};
use crate::store::WeatherStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a source endpoint at `/source/{id}` answering 200 with `body`.
pub async fn mock_source(server: &MockServer, id: u32, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/source/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts a source endpoint that answers 500 with a non-JSON error body on
/// every attempt, and asserts it is hit exactly `expected_attempts` times.
pub async fn mock_source_failing(server: &MockServer, id: u32, expected_attempts: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/source/{}", id)))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(expected_attempts)
        .mount(server)
        .await;
}

/// Store whose operations fail, either across the board or only for the
/// normalized kind. Raw saves are counted so tests can assert how far a
/// processing sequence got.
pub struct FailingStore {
    fail_raw: bool,
    raw_saves: AtomicUsize,
}

impl FailingStore {
    /// Every operation fails.
    pub fn new() -> Self {
        Self {
            fail_raw: true,
            raw_saves: AtomicUsize::new(0),
        }
    }

    /// Raw operations succeed; normalized operations fail.
    pub fn failing_normalized_only() -> Self {
        Self {
            fail_raw: false,
            raw_saves: AtomicUsize::new(0),
        }
    }

    /// Number of raw records accepted so far.
    pub fn raw_saves(&self) -> usize {
        self.raw_saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherStore for FailingStore {
    async fn save_raw(&self, record: NewRawRecord) -> Result<RawRecord, StorageError> {
        if self.fail_raw {
            return Err(StorageError::write_failed("raw", "mock store failure"));
        }
        let id = self.raw_saves.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        Ok(RawRecord {
            id,
            source_id: record.source_id,
            payload: record.payload,
            timestamp: record.timestamp,
        })
    }

    async fn find_all_raw(&self) -> Result<Vec<RawRecord>, StorageError> {
        Err(StorageError::read_failed("raw", "mock store failure"))
    }

    async fn save_normalized(
        &self,
        _record: NewNormalizedRecord,
    ) -> Result<NormalizedRecord, StorageError> {
        Err(StorageError::write_failed("normalized", "mock store failure"))
    }

    async fn find_all_normalized(&self) -> Result<Vec<NormalizedRecord>, StorageError> {
        Err(StorageError::read_failed("normalized", "mock store failure"))
    }
}
