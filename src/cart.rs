//! Client-side shopping cart.
//!
//! The cart is a plain owned value: create one per session with
//! [`Cart::new`] and pass it to whatever renders or submits it. It has no
//! persistence; dropping it discards its contents.

use crate::error::ValidationError;
use crate::models::{OrderItem, OrderSubmission, Product};

/// Format an amount for display, e.g. `$24.98`.
///
/// Rounding to cents happens here and only here; stored totals are unrounded.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

// ---------------------------------------------------------------------------
// CartLine
// ---------------------------------------------------------------------------

/// One distinct product selected for purchase.
///
/// `name` and `unit_price` are captured when the product is first added and
/// are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`, unrounded.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// Ordered set of [`CartLine`]s, at most one per product, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    revision: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gets its quantity bumped; its captured
    /// name and price are kept as they were. No validation is performed.
    pub fn add(&mut self, product_id: i64, name: impl Into<String>, unit_price: f64) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id,
                name: name.into(),
                unit_price,
                quantity: 1,
            }),
        }
        self.touch();
    }

    /// Add one unit of a catalog product, capturing its current name and price.
    pub fn add_product(&mut self, product: &Product) {
        self.add(product.product_id, product.name.clone(), product.price);
    }

    /// Remove a product's line. Absent products are ignored.
    pub fn remove(&mut self, product_id: i64) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.touch();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    /// Sum of every line's subtotal. Zero for an empty cart.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Change counter, bumped on every mutation.
    ///
    /// A presentation layer can compare this against the last value it drew
    /// to decide whether to re-render.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Build the order-creation payload for this cart.
    ///
    /// Fails without side effects if the cart is empty, `customer_id` is not
    /// positive, or `shipping_address` is blank. The address is sent trimmed.
    pub fn to_order_payload(
        &self,
        customer_id: i64,
        shipping_address: &str,
    ) -> Result<OrderSubmission, ValidationError> {
        self.build_payload(customer_id, shipping_address, false)
    }

    /// Like [`to_order_payload`](Self::to_order_payload), but each line also
    /// carries its captured unit price as `price_at_purchase`.
    pub fn to_order_payload_with_prices(
        &self,
        customer_id: i64,
        shipping_address: &str,
    ) -> Result<OrderSubmission, ValidationError> {
        self.build_payload(customer_id, shipping_address, true)
    }

    fn build_payload(
        &self,
        customer_id: i64,
        shipping_address: &str,
        with_prices: bool,
    ) -> Result<OrderSubmission, ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        if customer_id <= 0 {
            return Err(ValidationError::InvalidCustomerId(customer_id));
        }
        let address = shipping_address.trim();
        if address.is_empty() {
            return Err(ValidationError::BlankShippingAddress);
        }

        let items = self
            .lines
            .iter()
            .map(|l| OrderItem {
                product_id: l.product_id,
                quantity: l.quantity,
                price_at_purchase: with_prices.then_some(l.unit_price),
            })
            .collect();

        Ok(OrderSubmission {
            customer_id,
            shipping_address: address.to_string(),
            items,
        })
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
