//! Liveness endpoint
//!
//! Answers without touching the store, so a slow or unreachable database
//! never makes the process look dead.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Name reported to load balancers and log scrapers
pub const SERVICE_NAME: &str = "abtest";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
