pub mod order;

pub use order::{DeliveryDetails, Order, OrderStatus, RestaurantSnapshot};
