//! Multi-source weather aggregation service.
//!
//! Collects readings from N independent weather sources over HTTP,
//! normalizes their heterogeneous JSON payloads into a canonical schema,
//! persists both the raw and normalized records append-only, and serves an
//! on-demand aggregate (mean temperature/humidity over the full normalized
//! history).
//!
//! # Architecture
//!
//! One collection cycle, triggered per aggregate request:
//! - **Collector**: concurrent fetch per source with bounded fixed-delay retry
//! - **Processor**: persist raw, parse, persist normalized, per item
//! - **Aggregator**: barrier on all processing, then mean over the history
//!
//! # Features
//!
//! - Partial-failure isolation: no source or item failure aborts a cycle
//! - Tolerant parser recognizing three payload schemas
//! - Configurable in-flight cap and optional cycle deadline
//! - Graceful shutdown on SIGTERM/SIGINT

mod aggregator;
mod collector;
mod config;
mod error;
mod model;
mod parser;
mod processor;
mod routes;
mod source;
mod store;

#[cfg(test)]
mod test_utils;

use crate::aggregator::Aggregator;
use crate::collector::Collector;
use crate::processor::Processor;
use crate::store::{MemoryStore, WeatherStore};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = config::load_app_config()?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let source_config = config::load_source_config()?;
    let retry_config = config::load_retry_config()?;
    let collector_config = config::load_collector_config()?;
    let server_config = config::load_server_config()?;

    tracing::info!(
        "Collecting from {} sources at {} (retry: {} attempts, {}s delay)",
        source_config.count,
        source_config.base_url,
        retry_config.max_attempts,
        retry_config.delay_seconds
    );

    let store: Arc<dyn WeatherStore> = Arc::new(MemoryStore::new());
    let source_count = source_config.count;
    let client = Arc::new(source::Client::new(source_config));

    let collector = Collector::new(
        client,
        source_count,
        retry_config,
        collector_config.max_concurrent_fetches,
    );
    let processor = Processor::new(Arc::clone(&store));
    let aggregator = Arc::new(Aggregator::new(
        collector,
        processor,
        store,
        collector_config.cycle_deadline_seconds,
    ));

    let app = routes::router(aggregator);
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives SIGTERM or Ctrl-C.
async fn shutdown_signal() {
    let mut sig_term = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    tokio::select! {
        _ = sig_term.recv() => {
            tracing::info!("Received SIGTERM. Exiting...");
        }
        _ = ctrl_c() => {
            tracing::info!("Received SIGINT. Exiting...");
        }
    }
}
