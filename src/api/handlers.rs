use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{AnalyticsService, SnapshotCache};
use crate::storage::OrderStore;

pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub analytics: AnalyticsService,
    pub snapshot_cache: Option<SnapshotCache>,
    pub started_at: Instant,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub uptime: u64,
    pub timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTestResponse {
    pub message: String,
    pub order_count: i64,
    pub timestamp: String,
}

/// Liveness probe with process uptime
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "health OK!".to_string(),
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Connectivity probe against the order store
pub async fn db_test(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DbTestResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.count_orders().await {
        Ok(order_count) => Ok(Json(DbTestResponse {
            message: "Database connection OK".to_string(),
            order_count,
            timestamp: Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            tracing::error!("Database connectivity check failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "Database error".to_string(),
                }),
            ))
        }
    }
}
