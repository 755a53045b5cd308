use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order, camelCase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Placed,
    Paid,
    InProgress,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Paid => "paid",
            OrderStatus::InProgress => "inProgress",
            OrderStatus::OutForDelivery => "outForDelivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "placed" => Some(OrderStatus::Placed),
            "paid" => Some(OrderStatus::Paid),
            "inProgress" => Some(OrderStatus::InProgress),
            "outForDelivery" => Some(OrderStatus::OutForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

/// Delivery address captured at checkout. The city may be missing on
/// legacy records, which excludes the order from city statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub name: String,
    pub city: Option<String>,
}

/// Denormalized restaurant data carried on the order at the time it was
/// placed, so analytics never needs a live restaurant lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSnapshot {
    pub id: String,
    pub name: String,
    pub cuisines: Vec<String>,
}

/// A single order as read from the order store. Immutable input to the
/// analytics computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Amount in minor currency units. Missing amounts are treated as 0
    /// wherever they are summed.
    pub total_amount: Option<i64>,
    pub status: OrderStatus,
    pub customer_id: Option<String>,
    pub delivery: Option<DeliveryDetails>,
    pub restaurant: Option<RestaurantSnapshot>,
}

impl Order {
    pub fn amount_or_zero(&self) -> i64 {
        self.total_amount.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Paid,
            OrderStatus::InProgress,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"outForDelivery\"");
    }
}
