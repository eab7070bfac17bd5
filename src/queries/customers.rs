//! Customer service queries.

use crate::config::{self, CUSTOMER_API};
use crate::error::Result;
use crate::models::{Customer, NewCustomer};
use crate::transport::Transport;

/// Query interface for the customer service.
pub struct CustomerQuery<'a> {
    transport: &'a Transport,
}

impl<'a> CustomerQuery<'a> {
    /// Create a new `CustomerQuery` bound to the given transport.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List all customers.
    pub fn list(&self) -> Result<Vec<Customer>> {
        self.transport.get_list(CUSTOMER_API)
    }

    /// Create a customer.
    ///
    /// The body is normalized first (trimmed, blank optionals sent as
    /// `null`); a missing email or password fails before any request.
    pub fn create(&self, customer: NewCustomer) -> Result<Customer> {
        let customer = customer.normalized();
        customer.validate()?;
        let created: Customer = self.transport.post_json(CUSTOMER_API, &customer)?;
        tracing::info!(customer_id = created.customer_id, "customer created");
        Ok(created)
    }

    /// Delete a customer by id.
    pub fn delete(&self, customer_id: i64) -> Result<()> {
        self.transport
            .delete(&config::item_path(CUSTOMER_API, customer_id))
    }
}
