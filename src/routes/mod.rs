use crate::aggregator::Aggregator;
use axum::Router;
use std::sync::Arc;

mod aggregate;
mod health;

/// Builds the top-level API router from the endpoint subrouters.
pub fn router(aggregator: Arc<Aggregator>) -> Router {
    Router::new()
        .merge(aggregate::router())
        .merge(health::router())
        .with_state(aggregator)
}
