//! Business-insights API handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::handlers::{AppState, ErrorResponse};
use crate::analytics::TimeRange;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsQueryParams {
    /// Reporting window selector (`7d`, `30d`, `90d`, `1y`); anything
    /// else falls back to `30d`.
    pub time_range: Option<String>,
}

/// Get the analytics snapshot for the requested time range
pub async fn get_business_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightsQueryParams>,
) -> impl IntoResponse {
    let range = TimeRange::from_param(params.time_range.as_deref());

    if let Some(cache) = &state.snapshot_cache {
        if let Some(snapshot) = cache.get(range).await {
            return Json(snapshot).into_response();
        }
    }

    match state.analytics.compute_snapshot(range, Utc::now()).await {
        Ok(snapshot) => {
            if let Some(cache) = &state.snapshot_cache {
                cache.insert(range, snapshot.clone()).await;
            }
            Json(snapshot).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to compute business insights: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "Error fetching analytics data".to_string(),
                }),
            )
                .into_response()
        }
    }
}
