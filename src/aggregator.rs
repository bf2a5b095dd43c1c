//! Full-cycle orchestration: collect, process, aggregate.
//!
//! A cycle collects from every configured source, processes each successful
//! reading, and only then reads the entire normalized history to compute
//! the mean. The read-history step is a hard barrier: it never runs while
//! any of this cycle's processing is still in flight.

use crate::collector::Collector;
use crate::error::{Error, Result};
use crate::model::{round2, AggregateResult, NormalizedRecord};
use crate::processor::Processor;
use crate::store::WeatherStore;
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

pub struct Aggregator {
    collector: Collector,
    processor: Processor,
    store: Arc<dyn WeatherStore>,
    cycle_deadline_seconds: Option<u64>,
}

impl Aggregator {
    pub fn new(
        collector: Collector,
        processor: Processor,
        store: Arc<dyn WeatherStore>,
        cycle_deadline_seconds: Option<u64>,
    ) -> Self {
        Self {
            collector,
            processor,
            store,
            cycle_deadline_seconds,
        }
    }

    /// Runs one full cycle and returns the aggregate over the entire
    /// normalized history, not just this cycle's writes.
    ///
    /// Per-source and per-item failures are logged inside the cycle and
    /// never surface here. The cycle itself fails only if the configured
    /// deadline expires or the history read fails.
    pub async fn run_cycle(&self) -> Result<AggregateResult> {
        match self.cycle_deadline_seconds {
            Some(seconds) => {
                timeout(Duration::from_secs(seconds), self.collect_and_process())
                    .await
                    .map_err(|_| Error::CycleDeadline(seconds))?;
            }
            None => self.collect_and_process().await,
        }

        let history = self.store.find_all_normalized().await?;
        Ok(aggregate(&history))
    }

    async fn collect_and_process(&self) {
        let readings = self.collector.collect().await;
        tracing::info!("Collected readings from {} sources", readings.len());

        let results = join_all(readings.into_iter().map(|reading| {
            let source_id = reading.source_id;
            async move { (source_id, self.processor.process(reading).await) }
        }))
        .await;

        for (source_id, result) in results {
            if let Err(e) = result {
                tracing::error!(
                    "Failed to process and save data for source {}: {:?}",
                    source_id,
                    e
                );
            }
        }
    }
}

/// Arithmetic mean of temperature and humidity, rounded to 2 decimals.
/// Empty history degrades to the zero aggregate.
fn aggregate(records: &[NormalizedRecord]) -> AggregateResult {
    if records.is_empty() {
        return AggregateResult::empty();
    }

    let count = records.len() as f64;
    let total_temperature: f64 = records.iter().map(|r| r.temperature).sum();
    let total_humidity: f64 = records.iter().map(|r| r.humidity).sum();

    AggregateResult {
        average_temperature: round2(total_temperature / count),
        average_humidity: round2(total_humidity / count),
    }
}
