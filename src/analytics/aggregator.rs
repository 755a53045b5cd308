//! Business-insights aggregation over the order store.
//!
//! One call fetches the reporting window, the equal-length preceding
//! window, and the earliest-order timestamp, then reduces them into a
//! single [`AnalyticsSnapshot`]. The reductions themselves are pure
//! functions over already-fetched orders so they can be tested without a
//! database, and `now` is an explicit parameter so windowing and growth
//! are deterministic.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::analytics::models::{
    AnalyticsSnapshot, CityStat, CuisineStat, MonthlyBucket, RecentOrder, TimeRange,
};
use crate::models::Order;
use crate::storage::OrderStore;

/// Any store read failure aborts the whole computation; no partial
/// snapshot is ever returned and no retries happen here.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn OrderStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Compute the full snapshot for the window ending at `now`.
    pub async fn compute_snapshot(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsSnapshot, AnalyticsError> {
        let lookback = Duration::days(range.lookback_days());
        let start = now - lookback;
        let previous_start = start - lookback;

        // The three reads are independent; issue them concurrently.
        let (orders, previous_orders, earliest) = tokio::try_join!(
            self.store.orders_created_since(start),
            self.store.orders_created_between(previous_start, start),
            self.store.earliest_order_created_at(),
        )?;

        debug!(
            range = range.as_str(),
            orders = orders.len(),
            previous = previous_orders.len(),
            "fetched order windows"
        );

        let total_orders = orders.len() as i64;
        let total_revenue = sum_revenue(&orders);
        let average_order_value = if total_orders > 0 {
            total_revenue as f64 / total_orders as f64
        } else {
            0.0
        };

        // Percentage growth against a near-zero history is noise, so young
        // datasets (< 60 days since the first order ever) compare calendar
        // months instead of rolling windows. Inherited product behavior.
        let business_age_days = earliest
            .map(|first| (now - first).num_days())
            .unwrap_or(0);

        let (order_growth, revenue_growth) = if business_age_days < 60 {
            let current_start = month_start(now, 0);
            let next_start = month_start(now, 1);
            let previous_month_start = month_start(now, -1);

            let (current_month, previous_month) = tokio::try_join!(
                self.store
                    .orders_created_between(current_start, next_start),
                self.store
                    .orders_created_between(previous_month_start, current_start),
            )?;

            debug!(
                current = current_month.len(),
                previous = previous_month.len(),
                "month-over-month growth comparison"
            );

            growth_pair(&current_month, &previous_month)
        } else {
            growth_pair(&orders, &previous_orders)
        };

        Ok(AnalyticsSnapshot {
            total_orders,
            total_revenue,
            average_order_value,
            total_customers: distinct_customers(&orders),
            order_growth,
            revenue_growth,
            top_cities: top_cities(&orders),
            top_cuisines: cuisine_breakdown(&orders, total_orders),
            recent_orders: recent_orders(&orders),
            monthly_data: monthly_trend(&orders, now),
        })
    }
}

fn sum_revenue(orders: &[Order]) -> i64 {
    orders.iter().map(Order::amount_or_zero).sum()
}

fn distinct_customers(orders: &[Order]) -> i64 {
    orders
        .iter()
        .filter_map(|o| o.customer_id.as_deref())
        .collect::<HashSet<_>>()
        .len() as i64
}

/// Top five delivery cities by order count. Ties keep first-encountered
/// order (the grouping pass walks orders oldest first).
fn top_cities(orders: &[Order]) -> Vec<CityStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CityStat> = Vec::new();

    for order in orders {
        let Some(city) = order.delivery.as_ref().and_then(|d| d.city.as_deref()) else {
            continue;
        };
        let slot = *index.entry(city).or_insert_with(|| {
            stats.push(CityStat {
                city: city.to_string(),
                orders: 0,
                revenue: 0,
            });
            stats.len() - 1
        });
        stats[slot].orders += 1;
        stats[slot].revenue += order.amount_or_zero();
    }

    stats.sort_by(|a, b| b.orders.cmp(&a.orders));
    stats.truncate(5);
    stats
}

/// Per-cuisine order counts: an order contributes once for every cuisine
/// its restaurant serves. All cuisines are returned, no truncation.
fn cuisine_breakdown(orders: &[Order], total_orders: i64) -> Vec<CuisineStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CuisineStat> = Vec::new();

    for order in orders {
        let Some(restaurant) = order.restaurant.as_ref() else {
            continue;
        };
        for cuisine in &restaurant.cuisines {
            let slot = *index.entry(cuisine.as_str()).or_insert_with(|| {
                stats.push(CuisineStat {
                    cuisine: cuisine.clone(),
                    orders: 0,
                    percentage: 0.0,
                });
                stats.len() - 1
            });
            stats[slot].orders += 1;
        }
    }

    for stat in &mut stats {
        stat.percentage = if total_orders > 0 {
            ((stat.orders as f64 / total_orders as f64) * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };
    }

    stats.sort_by(|a, b| b.orders.cmp(&a.orders));
    stats
}

/// Every window order that has delivery details, newest first.
fn recent_orders(orders: &[Order]) -> Vec<RecentOrder> {
    let mut with_delivery: Vec<&Order> = orders.iter().filter(|o| o.delivery.is_some()).collect();
    with_delivery.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    with_delivery
        .into_iter()
        .map(|order| RecentOrder {
            id: order.id.clone(),
            customer: order
                .delivery
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            amount: order.amount_or_zero(),
            status: order.status,
            date: order.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

/// Twelve calendar months ending at `now`'s month, oldest first. Buckets
/// are filled from the fetched window, so months outside the window read 0.
fn monthly_trend(orders: &[Order], now: DateTime<Utc>) -> Vec<MonthlyBucket> {
    (0..12)
        .map(|i| {
            let offset = i - 11;
            let bucket_start = month_start(now, offset);
            let bucket_end = month_start(now, offset + 1);

            let (count, revenue) = orders
                .iter()
                .filter(|o| o.created_at >= bucket_start && o.created_at < bucket_end)
                .fold((0i64, 0i64), |(c, r), o| (c + 1, r + o.amount_or_zero()));

            MonthlyBucket {
                month: bucket_start.format("%b").to_string(),
                orders: count,
                revenue,
            }
        })
        .collect()
}

/// Growth percentages (orders, revenue) for a period against its
/// baseline. An empty baseline with any current orders reads as 100%
/// for both metrics; an empty baseline with nothing current reads 0.
fn growth_pair(current: &[Order], previous: &[Order]) -> (i64, i64) {
    let current_count = current.len() as i64;
    let previous_count = previous.len() as i64;

    if previous_count == 0 {
        return if current_count > 0 { (100, 100) } else { (0, 0) };
    }

    (
        percent_change(current_count, previous_count),
        percent_change(sum_revenue(current), sum_revenue(previous)),
    )
}

fn percent_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    (((current - previous) as f64 / previous as f64) * 100.0).round() as i64
}

/// First instant of the calendar month `offset` months away from `now`'s
/// month.
fn month_start(now: DateTime<Utc>, offset: i32) -> DateTime<Utc> {
    let months = now.year() * 12 + now.month0() as i32 + offset;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    // The first of a month is always a valid instant.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap()
}
