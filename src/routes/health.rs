//! Liveness probe endpoint.
//!
//! `GET /health` answers without touching the sources or the store, so
//! container orchestrators can tell "process is up" apart from "sources
//! are reachable".

use axum::{routing::get, Json, Router};
use serde_derive::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
