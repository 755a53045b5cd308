//! End-to-end tests for the business-insights API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use orderlens::analytics::{AnalyticsService, SnapshotCache};
use orderlens::api::{create_router, AppState};
use orderlens::models::{DeliveryDetails, Order, OrderStatus, RestaurantSnapshot};
use orderlens::storage::{OrderStore, SqliteStorage};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

async fn create_test_store() -> Arc<dyn OrderStore> {
    let store = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    store.init().await.unwrap();
    Arc::new(store)
}

fn create_app(store: Arc<dyn OrderStore>, cache_ttl_secs: u64) -> Router {
    let state = Arc::new(AppState {
        analytics: AnalyticsService::new(Arc::clone(&store)),
        store,
        snapshot_cache: (cache_ttl_secs > 0).then(|| SnapshotCache::new(cache_ttl_secs)),
        started_at: Instant::now(),
    });
    create_router(state, &[])
}

fn demo_order(id: &str, days_ago: i64, amount: i64) -> Order {
    Order {
        id: id.to_string(),
        created_at: Utc::now() - Duration::days(days_ago),
        total_amount: Some(amount),
        status: OrderStatus::Delivered,
        customer_id: Some("user-1".to_string()),
        delivery: Some(DeliveryDetails {
            name: "Alex Doe".to_string(),
            city: Some("London".to_string()),
        }),
        restaurant: Some(RestaurantSnapshot {
            id: "rest-1".to_string(),
            name: "Bella Napoli".to_string(),
            cuisines: vec!["Italian".to_string()],
        }),
    }
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = create_app(create_test_store().await, 0);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "health OK!");
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn db_test_endpoint_reports_order_count() {
    let store = create_test_store().await;
    store.insert(&demo_order("ord-1", 1, 1000)).await.unwrap();
    store.insert(&demo_order("ord-2", 2, 2000)).await.unwrap();

    let app = create_app(store, 0);

    let (status, body) = get_json(&app, "/api/business-insights/db-test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database connection OK");
    assert_eq!(body["orderCount"], 2);
}

#[tokio::test]
async fn insights_endpoint_returns_snapshot_shape() {
    let store = create_test_store().await;
    store.insert(&demo_order("ord-1", 2, 1000)).await.unwrap();

    let app = create_app(store, 0);

    let (status, body) = get_json(&app, "/api/business-insights?timeRange=7d").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["totalOrders"], 1);
    assert_eq!(body["totalRevenue"], 1000);
    assert_eq!(body["averageOrderValue"], 1000.0);
    assert_eq!(body["totalCustomers"], 1);
    assert_eq!(body["topCities"][0]["city"], "London");
    assert_eq!(body["topCuisines"][0]["cuisine"], "Italian");
    assert_eq!(body["topCuisines"][0]["percentage"], 100.0);
    assert_eq!(body["recentOrders"][0]["id"], "ord-1");
    assert_eq!(body["recentOrders"][0]["status"], "delivered");
    assert_eq!(body["monthlyData"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn unknown_time_range_falls_back_to_thirty_days() {
    let store = create_test_store().await;
    // 20 days old: outside 7d, inside the 30d default.
    store.insert(&demo_order("ord-1", 20, 1000)).await.unwrap();

    let app = create_app(store, 0);

    let (status, narrow) = get_json(&app, "/api/business-insights?timeRange=7d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(narrow["totalOrders"], 0);

    let (status, fallback) = get_json(&app, "/api/business-insights?timeRange=14d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback["totalOrders"], 1);

    let (status, default) = get_json(&app, "/api/business-insights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(default["totalOrders"], 1);
}

#[tokio::test]
async fn cached_snapshot_is_served_until_it_expires() {
    let store = create_test_store().await;
    store.insert(&demo_order("ord-1", 1, 1000)).await.unwrap();

    let app = create_app(Arc::clone(&store), 300);

    let (_, first) = get_json(&app, "/api/business-insights?timeRange=30d").await;
    assert_eq!(first["totalOrders"], 1);

    // A write after the snapshot was cached is invisible until the TTL
    // lapses.
    store.insert(&demo_order("ord-2", 1, 2000)).await.unwrap();

    let (_, second) = get_json(&app, "/api/business-insights?timeRange=30d").await;
    assert_eq!(second["totalOrders"], 1);

    // A different range misses the cache and sees the new order.
    let (_, other_range) = get_json(&app, "/api/business-insights?timeRange=90d").await;
    assert_eq!(other_range["totalOrders"], 2);
}
