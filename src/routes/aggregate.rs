//! The aggregation endpoint.
//!
//! `GET /weather/aggregate` triggers one full collection cycle and returns
//! the mean temperature/humidity over the entire normalized history. The
//! response is always well-formed JSON; an empty history yields the zero
//! aggregate rather than an error.

use crate::aggregator::Aggregator;
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use std::sync::Arc;

/// Create a subrouter containing the `/weather/aggregate` route.
pub fn router() -> Router<Arc<Aggregator>> {
    Router::new().route("/weather/aggregate", get(handler))
}

async fn handler(State(aggregator): State<Arc<Aggregator>>) -> impl IntoResponse {
    tracing::info!("GET /weather/aggregate - starting collection cycle");

    match aggregator.run_cycle().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("Aggregation cycle failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json("Failed to aggregate weather data"),
            )
                .into_response()
        }
    }
}
