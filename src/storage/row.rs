//! Flat database row for orders, shared by both backends.

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use sqlx::FromRow;

use crate::models::{DeliveryDetails, Order, OrderStatus, RestaurantSnapshot};

/// One row of the `orders` table. Delivery and restaurant data is
/// denormalized into nullable columns; cuisines are a JSON array in a
/// text column.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct OrderRow {
    pub id: String,
    pub created_at: i64,
    pub total_amount: Option<i64>,
    pub status: String,
    pub customer_id: Option<String>,
    pub delivery_name: Option<String>,
    pub delivery_city: Option<String>,
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
    pub cuisines: Option<String>,
}

pub(crate) const SELECT_ORDER_COLUMNS: &str = "id, created_at, total_amount, status, \
     customer_id, delivery_name, delivery_city, restaurant_id, restaurant_name, cuisines";

impl OrderRow {
    pub fn into_order(self) -> Result<Order> {
        let created_at = DateTime::from_timestamp(self.created_at, 0)
            .ok_or_else(|| anyhow!("order {} has invalid created_at {}", self.id, self.created_at))?;

        let status = OrderStatus::parse(&self.status)
            .ok_or_else(|| anyhow!("order {} has unknown status '{}'", self.id, self.status))?;

        let delivery = self.delivery_name.map(|name| DeliveryDetails {
            name,
            city: self.delivery_city,
        });

        let restaurant = match self.restaurant_id {
            Some(id) => {
                let cuisines = match self.cuisines.as_deref() {
                    Some(raw) => serde_json::from_str(raw)
                        .with_context(|| format!("order {} has malformed cuisines column", id))?,
                    None => Vec::new(),
                };
                Some(RestaurantSnapshot {
                    id,
                    name: self.restaurant_name.unwrap_or_default(),
                    cuisines,
                })
            }
            None => None,
        };

        Ok(Order {
            id: self.id,
            created_at,
            total_amount: self.total_amount,
            status,
            customer_id: self.customer_id,
            delivery,
            restaurant,
        })
    }
}

pub(crate) fn rows_into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>> {
    rows.into_iter().map(OrderRow::into_order).collect()
}

/// JSON-encode the cuisine list for storage, `None` when the order has no
/// restaurant snapshot.
pub(crate) fn cuisines_column(order: &Order) -> Result<Option<String>> {
    order
        .restaurant
        .as_ref()
        .map(|r| serde_json::to_string(&r.cuisines).context("serialize cuisines"))
        .transpose()
}
