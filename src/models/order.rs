use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OrderStatus — Free-form status string owned by the order service
// ---------------------------------------------------------------------------

/// Order status as reported by the order service.
///
/// The service owns the vocabulary, so unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn pending() -> Self {
        Self::new("pending")
    }

    pub fn shipped() -> Self {
        Self::new("shipped")
    }

    pub fn delivered() -> Self {
        Self::new("delivered")
    }

    pub fn cancelled() -> Self {
        Self::new("cancelled")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// OrderItem — One line of an order, sent or received
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::opt_number_or_string"
    )]
    pub price_at_purchase: Option<f64>,
}

// ---------------------------------------------------------------------------
// Order — A record returned by the order service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(alias = "id")]
    pub order_id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(
        default,
        alias = "total_price",
        deserialize_with = "super::opt_number_or_string"
    )]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// OrderSubmission — Body for creating an order, derived from a cart
// ---------------------------------------------------------------------------

/// The order-creation payload.
///
/// Built from a [`Cart`](crate::cart::Cart) at submission time and dropped
/// once the request completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSubmission {
    pub customer_id: i64,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
}

// ---------------------------------------------------------------------------
// StatusUpdate — Body for changing an order's status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}
