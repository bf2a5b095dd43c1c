//! Concurrent collection across all configured sources.
//!
//! One fetch future per source id, driven concurrently with a cap on
//! in-flight requests. Each source gets its own bounded fixed-delay retry
//! budget; a source that exhausts it is logged and excluded, and the
//! collection as a whole still returns whatever subset succeeded. No single
//! misbehaving source can prevent the rest from being collected.

use crate::config::RetryConfig;
use crate::model::SourceReading;
use crate::source::Client;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

pub struct Collector {
    client: Arc<Client>,
    source_count: u32,
    retry: RetryConfig,
    max_concurrent_fetches: usize,
}

impl Collector {
    pub fn new(
        client: Arc<Client>,
        source_count: u32,
        retry: RetryConfig,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            client,
            source_count,
            retry,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Fetches from every source in `1..=source_count` concurrently and
    /// returns the readings of the sources that ultimately succeeded.
    ///
    /// Never fails; an empty vector means no source answered within its
    /// retry budget. Ordering of the result carries no meaning.
    pub async fn collect(&self) -> Vec<SourceReading> {
        stream::iter(1..=self.source_count)
            .map(|source_id| self.fetch_with_retry(source_id))
            .buffer_unordered(self.max_concurrent_fetches)
            .filter_map(|reading| async move { reading })
            .collect()
            .await
    }

    /// Runs the retry policy for one source: `max_attempts` total attempts
    /// with a fixed delay between them. The delay suspends only this
    /// source's future; sibling sources keep running.
    async fn fetch_with_retry(&self, source_id: u32) -> Option<SourceReading> {
        let mut attempt = 1;
        loop {
            match self.client.fetch(source_id).await {
                Ok(reading) => return Some(reading),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        "Retrying source {} (attempt {}/{}) due to error: {}",
                        source_id,
                        attempt,
                        self.retry.max_attempts,
                        err
                    );
                    sleep(Duration::from_secs(self.retry.delay_seconds)).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!("Failed to fetch data from source {}: {}", source_id, err);
                    return None;
                }
            }
        }
    }
}
