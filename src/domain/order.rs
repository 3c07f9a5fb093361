use chrono::{DateTime, Utc};

/// A placed order. While it exists it holds a reference on its product.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub moment: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub product_id: u64,
    pub quantity: u32,
    pub moment: DateTime<Utc>,
}
