//! Order submission: turning a cart into an order.
//!
//! A submission attempt moves through
//! `Idle -> Validating -> Submitting -> Confirmed -> Idle`, falling back to
//! `Idle` from `Validating` on a local validation failure and from
//! `Submitting` on a transport or service failure. The cart is cleared only
//! in `Confirmed`, i.e. after the order service has acknowledged the order
//! with a well-formed record.

use crate::cart::Cart;
use crate::error::Result;
use crate::models::{Order, OrderSubmission};
use crate::queries::OrderQuery;

/// Anything that can accept an order submission.
///
/// Implemented by [`OrderQuery`]; tests substitute their own.
pub trait OrderSink {
    fn submit_order(&self, submission: &OrderSubmission) -> Result<Order>;
}

impl OrderSink for OrderQuery<'_> {
    fn submit_order(&self, submission: &OrderSubmission) -> Result<Order> {
        self.create(submission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Confirmed,
}

/// Drives one submission at a time and records the states it went through.
#[derive(Debug, Clone)]
pub struct Checkout {
    state: SubmissionState,
    include_purchase_prices: bool,
    trace: Vec<SubmissionState>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Checkout {
    /// `include_purchase_prices` controls whether line items carry
    /// `price_at_purchase`.
    pub fn new(include_purchase_prices: bool) -> Self {
        Self {
            state: SubmissionState::Idle,
            include_purchase_prices,
            trace: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// States entered during the most recent attempt, in order.
    pub fn last_attempt(&self) -> &[SubmissionState] {
        &self.trace
    }

    /// Validate the cart, submit it, and clear it on acknowledgment.
    ///
    /// On a validation error nothing is sent. On any failure the cart is
    /// left exactly as it was so the user can retry.
    pub fn submit<S: OrderSink + ?Sized>(
        &mut self,
        cart: &mut Cart,
        sink: &S,
        customer_id: i64,
        shipping_address: &str,
    ) -> Result<Order> {
        self.trace.clear();

        self.enter(SubmissionState::Validating);
        let built = if self.include_purchase_prices {
            cart.to_order_payload_with_prices(customer_id, shipping_address)
        } else {
            cart.to_order_payload(customer_id, shipping_address)
        };
        let submission = match built {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(error = %e, "order not submitted");
                self.enter(SubmissionState::Idle);
                return Err(e.into());
            }
        };

        self.enter(SubmissionState::Submitting);
        tracing::debug!(
            customer_id,
            lines = submission.items.len(),
            "submitting order"
        );
        match sink.submit_order(&submission) {
            Ok(order) => {
                self.enter(SubmissionState::Confirmed);
                cart.clear();
                tracing::info!(order_id = order.order_id, "order confirmed; cart cleared");
                self.enter(SubmissionState::Idle);
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed; cart retained");
                self.enter(SubmissionState::Idle);
                Err(e)
            }
        }
    }

    fn enter(&mut self, state: SubmissionState) {
        self.state = state;
        self.trace.push(state);
    }
}
