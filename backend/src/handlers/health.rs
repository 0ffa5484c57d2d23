//! Liveness and database readiness

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` while the database is unreachable
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseStatus,
}

/// Check the pool with `SELECT 1`; an unreachable database answers 503
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => DatabaseStatus::Connected,
        Err(err) => {
            tracing::warn!("Health check could not reach the database: {}", err);
            DatabaseStatus::Disconnected
        }
    };

    let (code, status) = match database {
        DatabaseStatus::Connected => (StatusCode::OK, "healthy"),
        DatabaseStatus::Disconnected => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
