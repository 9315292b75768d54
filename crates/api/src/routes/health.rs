use axum::extract::State;
use axum::{routing::get, Json, Router};
use mentorhub_db::repositories::ProfileRepo;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Current booking version counter.
    pub booking_version: u64,
    pub profile_count: usize,
}

/// GET /health -- returns service status and store counters.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        booking_version: state.pool.version(),
        profile_count: ProfileRepo::count(&state.pool).await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
