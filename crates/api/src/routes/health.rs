use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Number of migrations applied to the database, when reachable.
    pub migrations_applied: Option<i64>,
}

/// GET /health -- returns service, database, and migration state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = recipeshare_db::health_check(&state.pool).await.is_ok();

    let migrations_applied = if db_healthy {
        recipeshare_db::applied_migrations(&state.pool).await.ok()
    } else {
        None
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        migrations_applied,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
