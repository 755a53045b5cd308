use crate::models::Order;
use crate::storage::row::{cuisines_column, rows_into_orders, OrderRow, SELECT_ORDER_COLUMNS};
use crate::storage::{OrderStore, StorageError, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
}

impl SqliteStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl OrderStore for SqliteStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                created_at INTEGER NOT NULL,
                total_amount INTEGER,
                status TEXT NOT NULL,
                customer_id TEXT,
                delivery_name TEXT,
                delivery_city TEXT,
                restaurant_id TEXT,
                restaurant_name TEXT,
                cuisines TEXT
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn insert(&self, order: &Order) -> StorageResult<()> {
        let cuisines = cuisines_column(order).map_err(StorageError::Other)?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                id, created_at, total_amount, status, customer_id,
                delivery_name, delivery_city, restaurant_id, restaurant_name, cuisines
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&order.id)
        .bind(order.created_at.timestamp())
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .bind(order.customer_id.as_deref())
        .bind(order.delivery.as_ref().map(|d| d.name.as_str()))
        .bind(order.delivery.as_ref().and_then(|d| d.city.as_deref()))
        .bind(order.restaurant.as_ref().map(|r| r.id.as_str()))
        .bind(order.restaurant.as_ref().map(|r| r.name.as_str()))
        .bind(cuisines)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| StorageError::Other(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }

        Ok(())
    }

    async fn orders_created_since(&self, start: DateTime<Utc>) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {SELECT_ORDER_COLUMNS}
            FROM orders
            WHERE created_at >= ?
            ORDER BY created_at ASC, id ASC
            "#,
        ))
        .bind(start.timestamp())
        .fetch_all(self.pool.as_ref())
        .await?;

        rows_into_orders(rows)
    }

    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {SELECT_ORDER_COLUMNS}
            FROM orders
            WHERE created_at >= ? AND created_at < ?
            ORDER BY created_at ASC, id ASC
            "#,
        ))
        .bind(start.timestamp())
        .bind(end.timestamp())
        .fetch_all(self.pool.as_ref())
        .await?;

        rows_into_orders(rows)
    }

    async fn earliest_order_created_at(&self) -> Result<Option<DateTime<Utc>>> {
        let earliest = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT created_at FROM orders
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(earliest.and_then(|ts| DateTime::from_timestamp(ts, 0)))
    }

    async fn count_orders(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
