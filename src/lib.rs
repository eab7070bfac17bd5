//! Storefront SDK for Rust.
//!
//! Provides a client for the storefront's customer, product and order
//! services, reached through a single reverse proxy, plus an in-memory
//! shopping cart that turns into an order submission.
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_sdk::{Cart, StorefrontClient};
//!
//! let client = StorefrontClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()
//!     .unwrap();
//!
//! let products = client.products().list().unwrap();
//!
//! let mut cart = Cart::new();
//! for product in products.iter().take(2) {
//!     cart.add_product(product);
//! }
//!
//! let order = client
//!     .checkout()
//!     .submit(&mut cart, &client.orders(), 3, "1 Main St")
//!     .unwrap();
//! assert!(cart.is_empty());
//! println!("placed order #{}", order.order_id);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod queries;
pub mod session;
pub mod transport;
pub mod views;

#[cfg(feature = "async")]
pub use async_client::AsyncStorefrontClient;
pub use cart::{format_price, Cart, CartLine};
pub use checkout::{Checkout, OrderSink, SubmissionState};
pub use error::{Result, StorefrontError, ValidationError};
pub use session::Session;
pub use transport::Transport;
pub use views::{Dashboard, ListView, Notice, NoticeLevel};

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// StorefrontClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StorefrontClient`].
///
/// Use [`StorefrontClient::builder()`] for plain defaults or
/// [`StorefrontClientBuilder::from_env()`] to start from the environment.
#[derive(Debug, Clone)]
pub struct StorefrontClientBuilder {
    base_url: String,
    timeout: Duration,
    include_purchase_prices: bool,
}

impl Default for StorefrontClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            include_purchase_prices: false,
        }
    }
}

impl StorefrontClientBuilder {
    /// Start from defaults overridden by `STOREFRONT_BASE_URL` and
    /// `STOREFRONT_TIMEOUT_SECS`, where set.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = config::base_url_from_env() {
            builder.base_url = url;
        }
        if let Some(timeout) = config::timeout_from_env() {
            builder.timeout = timeout;
        }
        builder
    }

    /// Set the reverse-proxy origin, e.g. `http://localhost:8080`.
    ///
    /// Service paths (`/customers/`, `/products/`, `/orders/`) are appended
    /// to it. Defaults to `http://localhost`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send each line's captured unit price as `price_at_purchase` when
    /// submitting orders. Defaults to `false`.
    pub fn include_purchase_prices(mut self, include: bool) -> Self {
        self.include_purchase_prices = include;
        self
    }

    /// Build the client. Fails on an unparsable base URL.
    pub fn build(self) -> Result<StorefrontClient> {
        let transport = Transport::new(&self.base_url, self.timeout)?;
        tracing::debug!(base_url = transport.base_url(), "storefront client ready");
        Ok(StorefrontClient {
            transport,
            include_purchase_prices: self.include_purchase_prices,
        })
    }
}

// ---------------------------------------------------------------------------
// StorefrontClient
// ---------------------------------------------------------------------------

/// The main entry point for the storefront SDK.
///
/// Owns the HTTP [`Transport`] and exposes one lightweight borrowing query
/// wrapper per service. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    transport: Transport,
    include_purchase_prices: bool,
}

impl StorefrontClient {
    /// Create a new builder with default settings.
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    // -- Service accessors -------------------------------------------------

    /// Access the customer service.
    pub fn customers(&self) -> queries::CustomerQuery<'_> {
        queries::CustomerQuery::new(&self.transport)
    }

    /// Access the product catalog service.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.transport)
    }

    /// Access the order service.
    pub fn orders(&self) -> queries::OrderQuery<'_> {
        queries::OrderQuery::new(&self.transport)
    }

    // -- Cart and session helpers ------------------------------------------

    /// A fresh [`Checkout`] honoring this client's purchase-price setting.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.include_purchase_prices)
    }

    /// Start a user session with its own empty cart.
    pub fn session(&self) -> Session<'_> {
        Session::new(self)
    }

    /// Fetch all three lists, one after the other.
    ///
    /// A failure in one list shows up as [`ListView::Failed`] for that list
    /// only.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            customers: ListView::from_result(self.customers().list()),
            products: ListView::from_result(self.products().list()),
            orders: ListView::from_result(self.orders().list()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn includes_purchase_prices(&self) -> bool {
        self.include_purchase_prices
    }

    /// Return a reference to the underlying [`Transport`] for advanced usage.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StorefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StorefrontClient(base_url={}, include_purchase_prices={})",
            self.transport.base_url(),
            self.include_purchase_prices
        )
    }
}
