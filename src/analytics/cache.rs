//! TTL cache for computed snapshots, keyed by time range.
//!
//! Caching sits at the API layer only; the aggregator itself stays a pure
//! read-and-compute path. There is one snapshot per time range, so the
//! cache holds at most four entries.

use moka::future::Cache;
use std::time::Duration;

use crate::analytics::models::{AnalyticsSnapshot, TimeRange};

pub struct SnapshotCache {
    cache: Cache<TimeRange, AnalyticsSnapshot>,
}

impl SnapshotCache {
    pub fn new(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { cache }
    }

    pub async fn get(&self, range: TimeRange) -> Option<AnalyticsSnapshot> {
        self.cache.get(&range).await
    }

    pub async fn insert(&self, range: TimeRange, snapshot: AnalyticsSnapshot) {
        self.cache.insert(range, snapshot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_orders: 0,
            total_revenue: 0,
            average_order_value: 0.0,
            total_customers: 0,
            order_growth: 0,
            revenue_growth: 0,
            top_cities: vec![],
            top_cuisines: vec![],
            recent_orders: vec![],
            monthly_data: vec![],
        }
    }

    #[tokio::test]
    async fn caches_per_time_range() {
        let cache = SnapshotCache::new(60);

        assert!(cache.get(TimeRange::Week).await.is_none());

        let mut snapshot = empty_snapshot();
        snapshot.total_orders = 7;
        cache.insert(TimeRange::Week, snapshot.clone()).await;

        assert_eq!(cache.get(TimeRange::Week).await, Some(snapshot));
        assert!(cache.get(TimeRange::Month).await.is_none());
    }
}
