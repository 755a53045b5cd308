use crate::models::Order;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("order id already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Initialize the storage (create tables, indexes, etc.)
    async fn init(&self) -> Result<()>;

    /// Insert a new order. Fails with `Conflict` when the id is taken.
    async fn insert(&self, order: &Order) -> StorageResult<()>;

    /// All orders with `created_at >= start` (inclusive).
    async fn orders_created_since(&self, start: DateTime<Utc>) -> Result<Vec<Order>>;

    /// All orders with `created_at` in `[start, end)`.
    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>>;

    /// Creation time of the single oldest order, `None` on an empty store.
    async fn earliest_order_created_at(&self) -> Result<Option<DateTime<Utc>>>;

    /// Total number of orders in the store.
    async fn count_orders(&self) -> Result<i64>;
}
