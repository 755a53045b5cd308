//! Wire and selector types for the business-insights snapshot.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// Reporting window selector. Unrecognized query values fall back to the
/// 30-day default instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub fn lookback_days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }

    /// Parse the `timeRange` query parameter, defaulting to 30 days for
    /// missing or unrecognized values.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => TimeRange::Month,
            Some("7d") => TimeRange::Week,
            Some("30d") => TimeRange::Month,
            Some("90d") => TimeRange::Quarter,
            Some("1y") => TimeRange::Year,
            Some(other) => {
                tracing::warn!(
                    "Unknown timeRange '{other}', falling back to '30d'. Supported values: 7d, 30d, 90d, 1y"
                );
                TimeRange::Month
            }
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Month
    }
}

/// Orders and revenue for one delivery city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStat {
    pub city: String,
    pub orders: i64,
    pub revenue: i64,
}

/// Orders attributed to one cuisine. An order counts once for every
/// cuisine its restaurant serves, so counts across cuisines can exceed
/// the order total and percentages need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineStat {
    pub cuisine: String,
    pub orders: i64,
    pub percentage: f64,
}

/// One row of the recent-orders feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: String,
    pub customer: String,
    pub amount: i64,
    pub status: OrderStatus,
    /// Calendar date only, `YYYY-MM-DD`.
    pub date: String,
}

/// One calendar-month bucket of the 12-month trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Three-letter month abbreviation ("Jan" .. "Dec").
    pub month: String,
    pub orders: i64,
    pub revenue: i64,
}

/// The full analytics result for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub average_order_value: f64,
    pub total_customers: i64,
    pub order_growth: i64,
    pub revenue_growth: i64,
    pub top_cities: Vec<CityStat>,
    pub top_cuisines: Vec<CuisineStat>,
    pub recent_orders: Vec<RecentOrder>,
    pub monthly_data: Vec<MonthlyBucket>,
}
