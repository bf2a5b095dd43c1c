//! Append-only persistence for raw and normalized records.
//!
//! The store contract is deliberately small: two record kinds, each with
//! `save` (returning the assigned identity) and `find_all`. No update or
//! delete operations exist. `MemoryStore` is the in-process implementation;
//! swapping in a database client means implementing [`WeatherStore`] and
//! nothing else.
//!
//! Store calls are blocking-style work. `MemoryStore` routes every
//! operation through `tokio::task::spawn_blocking` so slow store activity
//! runs on the runtime's bounded blocking pool instead of stalling the
//! fetch scheduler.

use crate::error::StorageError;
use crate::model::{NewNormalizedRecord, NewRawRecord, NormalizedRecord, RawRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const KIND_RAW: &str = "raw";
const KIND_NORMALIZED: &str = "normalized";

/// Which side of the store contract an operation belongs to, so its
/// failures report as the right [`StorageError`] flavor.
#[derive(Clone, Copy)]
enum StoreOp {
    Write,
    Read,
}

impl StoreOp {
    fn fail(self, kind: &'static str, err: impl std::fmt::Display) -> StorageError {
        match self {
            StoreOp::Write => StorageError::write_failed(kind, err),
            StoreOp::Read => StorageError::read_failed(kind, err),
        }
    }
}

/// Persistence contract for the two append-only record kinds.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Appends a raw record and returns it with its assigned identity.
    async fn save_raw(&self, record: NewRawRecord) -> Result<RawRecord, StorageError>;

    /// Returns every raw record ever saved.
    async fn find_all_raw(&self) -> Result<Vec<RawRecord>, StorageError>;

    /// Appends a normalized record and returns it with its assigned identity.
    async fn save_normalized(
        &self,
        record: NewNormalizedRecord,
    ) -> Result<NormalizedRecord, StorageError>;

    /// Returns every normalized record ever saved.
    async fn find_all_normalized(&self) -> Result<Vec<NormalizedRecord>, StorageError>;
}

#[derive(Debug, Default)]
struct Tables {
    next_raw_id: i64,
    next_normalized_id: i64,
    raw: BTreeMap<i64, RawRecord>,
    normalized: BTreeMap<i64, NormalizedRecord>,
}

/// Key-ordered in-memory store. Identities are assigned monotonically
/// starting at 1, independently per record kind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the tables on the blocking pool.
    async fn with_tables<T, F>(
        &self,
        kind: &'static str,
        op: StoreOp,
        f: F,
    ) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Tables) -> T + Send + 'static,
    {
        let tables = Arc::clone(&self.tables);
        tokio::task::spawn_blocking(move || {
            let mut guard = tables
                .lock()
                .map_err(|_| op.fail(kind, "store mutex poisoned"))?;
            Ok(f(&mut guard))
        })
        .await
        .map_err(|e| op.fail(kind, e))?
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn save_raw(&self, record: NewRawRecord) -> Result<RawRecord, StorageError> {
        self.with_tables(KIND_RAW, StoreOp::Write, move |tables| {
            tables.next_raw_id += 1;
            let stored = RawRecord {
                id: tables.next_raw_id,
                source_id: record.source_id,
                payload: record.payload,
                timestamp: record.timestamp,
            };
            tables.raw.insert(stored.id, stored.clone());
            stored
        })
        .await
    }

    async fn find_all_raw(&self) -> Result<Vec<RawRecord>, StorageError> {
        self.with_tables(KIND_RAW, StoreOp::Read, |tables| {
            tables.raw.values().cloned().collect()
        })
        .await
    }

    async fn save_normalized(
        &self,
        record: NewNormalizedRecord,
    ) -> Result<NormalizedRecord, StorageError> {
        self.with_tables(KIND_NORMALIZED, StoreOp::Write, move |tables| {
            tables.next_normalized_id += 1;
            let stored = NormalizedRecord {
                id: tables.next_normalized_id,
                source_id: record.source_id,
                temperature: record.temperature,
                humidity: record.humidity,
                timestamp: record.timestamp,
                raw_id: record.raw_id,
            };
            tables.normalized.insert(stored.id, stored.clone());
            stored
        })
        .await
    }

    async fn find_all_normalized(&self) -> Result<Vec<NormalizedRecord>, StorageError> {
        self.with_tables(KIND_NORMALIZED, StoreOp::Read, |tables| {
            tables.normalized.values().cloned().collect()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn new_raw(source_id: u32, payload: &str) -> NewRawRecord {
        NewRawRecord {
            source_id,
            payload: payload.to_string(),
            timestamp: Local::now(),
        }
    }

    fn new_normalized(source_id: u32, raw_id: i64) -> NewNormalizedRecord {
        NewNormalizedRecord {
            source_id,
            temperature: 20.1,
            humidity: 55.0,
            timestamp: Local::now(),
            raw_id,
        }
    }

    mod succeeds {
        use super::*;

        #[tokio::test]
        async fn test_save_raw_assigns_monotonic_ids() {
            let store = MemoryStore::new();

            let first = store.save_raw(new_raw(1, "{}")).await.unwrap();
            let second = store.save_raw(new_raw(2, "{}")).await.unwrap();

            assert_eq!(first.id, 1);
            assert_eq!(second.id, 2);
        }

        #[tokio::test]
        async fn test_find_all_raw_returns_full_history() {
            let store = MemoryStore::new();

            store.save_raw(new_raw(1, r#"{"temp":20.1,"hum":55}"#)).await.unwrap();
            store.save_raw(new_raw(2, "not json")).await.unwrap();

            let all = store.find_all_raw().await.unwrap();
            assert_eq!(all.len(), 2);
            assert_eq!(all[0].payload, r#"{"temp":20.1,"hum":55}"#);
            assert_eq!(all[1].payload, "not json");
        }

        #[tokio::test]
        async fn test_save_normalized_keeps_raw_back_reference() {
            let store = MemoryStore::new();

            let raw = store.save_raw(new_raw(1, "{}")).await.unwrap();
            let normalized = store.save_normalized(new_normalized(1, raw.id)).await.unwrap();

            assert_eq!(normalized.id, 1);
            assert_eq!(normalized.raw_id, raw.id);
        }

        #[tokio::test]
        async fn test_record_kinds_have_independent_id_sequences() {
            let store = MemoryStore::new();

            store.save_raw(new_raw(1, "{}")).await.unwrap();
            store.save_raw(new_raw(2, "{}")).await.unwrap();
            let normalized = store.save_normalized(new_normalized(1, 1)).await.unwrap();

            assert_eq!(normalized.id, 1);
        }

        #[tokio::test]
        async fn test_find_all_normalized_empty() {
            let store = MemoryStore::new();
            let all = store.find_all_normalized().await.unwrap();
            assert!(all.is_empty());
        }

        #[tokio::test]
        async fn test_concurrent_saves_do_not_lose_records() {
            let store = Arc::new(MemoryStore::new());

            let handles: Vec<_> = (1..=20u32)
                .map(|id| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move { store.save_raw(new_raw(id, "{}")).await })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let all = store.find_all_raw().await.unwrap();
            assert_eq!(all.len(), 20);
            // Key-ordered iteration: ids come back sorted and unique
            let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
            assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
        }
    }

    mod fails {
        use super::*;

        /// Poisons the store mutex by panicking while holding it.
        fn poison(store: &MemoryStore) {
            let tables = Arc::clone(&store.tables);
            std::thread::spawn(move || {
                let _guard = tables.lock().unwrap();
                panic!("poisoning store mutex");
            })
            .join()
            .unwrap_err();
        }

        #[tokio::test]
        async fn test_save_failure_reports_write_flavor() {
            let store = MemoryStore::new();
            poison(&store);

            let err = store.save_raw(new_raw(1, "{}")).await.unwrap_err();
            assert!(matches!(err, StorageError::WriteFailed { .. }));
        }

        #[tokio::test]
        async fn test_find_all_failure_reports_read_flavor() {
            let store = MemoryStore::new();
            poison(&store);

            let err = store.find_all_raw().await.unwrap_err();
            assert!(matches!(err, StorageError::ReadFailed { .. }));
            assert!(err.to_string().starts_with("failed to read raw records"));

            let err = store.find_all_normalized().await.unwrap_err();
            assert!(matches!(err, StorageError::ReadFailed { .. }));
        }
    }
}
