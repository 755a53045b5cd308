//! Business-insights analytics.
//!
//! The aggregator reduces a time window of orders into the dashboard
//! snapshot: totals, growth rates, geographic and cuisine breakdowns, a
//! recent-orders feed, and a 12-month trend.

pub mod aggregator;
pub mod cache;
pub mod models;

pub use aggregator::{AnalyticsError, AnalyticsService};
pub use cache::SnapshotCache;
pub use models::{AnalyticsSnapshot, TimeRange};
