//! Async wrapper around [`StorefrontClient`] for use in Tokio runtimes.
//!
//! Runs every blocking request on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use storefront_sdk::{AsyncStorefrontClient, Cart};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncStorefrontClient::builder()
//!         .base_url("http://localhost:8080")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     // All three lists are fetched concurrently
//!     let dashboard = client.dashboard().await;
//!
//!     let mut cart = Cart::new();
//!     if let Some(product) = dashboard.products.items().first() {
//!         cart.add_product(product);
//!     }
//!     let order = client.place_order(&mut cart, 3, "1 Main St").await.unwrap();
//!     println!("placed order #{}", order.order_id);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cart::Cart;
use crate::error::{Result, StorefrontError};
use crate::models::Order;
use crate::views::{Dashboard, ListView};
use crate::{StorefrontClient, StorefrontClientBuilder};

fn join_error(e: tokio::task::JoinError) -> StorefrontError {
    StorefrontError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncStorefrontClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStorefrontClient`].
#[derive(Debug, Clone, Default)]
pub struct AsyncStorefrontClientBuilder {
    inner: StorefrontClientBuilder,
}

impl AsyncStorefrontClientBuilder {
    /// Start from the environment; see [`StorefrontClientBuilder::from_env`].
    pub fn from_env() -> Self {
        Self {
            inner: StorefrontClientBuilder::from_env(),
        }
    }

    /// Set the reverse-proxy origin.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Send `price_at_purchase` with order line items.
    pub fn include_purchase_prices(mut self, include: bool) -> Self {
        self.inner = self.inner.include_purchase_prices(include);
        self
    }

    /// Build the async client.
    ///
    /// The blocking HTTP client must not be created on an async worker, so
    /// construction runs on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncStorefrontClient> {
        tokio::task::spawn_blocking(move || {
            let client = self.inner.build()?;
            Ok(AsyncStorefrontClient {
                inner: Arc::new(client),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncStorefrontClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`StorefrontClient`].
///
/// The wrapped client is shared, not locked, so independent operations run
/// in parallel on the blocking pool.
#[derive(Clone)]
pub struct AsyncStorefrontClient {
    inner: Arc<StorefrontClient>,
}

impl AsyncStorefrontClient {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncStorefrontClientBuilder {
        AsyncStorefrontClientBuilder::default()
    }

    /// Run a sync client operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use storefront_sdk::AsyncStorefrontClient;
    /// # async fn example() -> storefront_sdk::Result<()> {
    /// # let client = AsyncStorefrontClient::builder().build().await?;
    /// let products = client.run(|c| c.products().list()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StorefrontClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(join_error)?
    }

    /// Fetch customers, products and orders concurrently.
    ///
    /// The three requests are independent; each list reflects only its own
    /// outcome.
    pub async fn dashboard(&self) -> Dashboard {
        let (customers, products, orders) = tokio::join!(
            self.run(|c| c.customers().list()),
            self.run(|c| c.products().list()),
            self.run(|c| c.orders().list()),
        );
        Dashboard {
            customers: ListView::from_result(customers),
            products: ListView::from_result(products),
            orders: ListView::from_result(orders),
        }
    }

    /// Submit `cart` as an order.
    ///
    /// The submission runs against a copy; `cart` is replaced by the
    /// (cleared) copy only once the order service has acknowledged. On any
    /// failure `cart` is left untouched.
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        customer_id: i64,
        shipping_address: &str,
    ) -> Result<Order> {
        let mut working = cart.clone();
        let address = shipping_address.to_string();
        let (order, working) = self
            .run(move |c| {
                let order = c
                    .checkout()
                    .submit(&mut working, &c.orders(), customer_id, &address)?;
                Ok((order, working))
            })
            .await?;
        *cart = working;
        Ok(order)
    }

    /// Re-fetch the order list every `every`, starting immediately.
    ///
    /// Each tick fires a new fetch without waiting for earlier ones, so
    /// fetches may overlap; whichever response arrives last is what the
    /// returned [`OrderWatch`] shows. Must be called from within a Tokio
    /// runtime. A zero period is rejected with
    /// [`StorefrontError::InvalidArgument`].
    pub fn watch_orders(&self, every: Duration) -> Result<OrderWatch> {
        if every.is_zero() {
            return Err(StorefrontError::InvalidArgument(
                "order refresh period must be greater than zero".into(),
            ));
        }
        let (tx, rx) = watch::channel(ListView::Loading);
        let tx = Arc::new(tx);
        let client = self.inner.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let view = match tokio::task::spawn_blocking(move || client.orders().list()).await {
                        Ok(result) => ListView::from_result(result),
                        Err(e) => ListView::Failed(join_error(e).to_string()),
                    };
                    tx.send_replace(view);
                });
            }
            tracing::debug!("order watch stopped: no receivers left");
        });

        Ok(OrderWatch { receiver: rx, handle })
    }

    /// Return a reference to the wrapped blocking client.
    pub fn blocking(&self) -> &StorefrontClient {
        &self.inner
    }
}

// ---------------------------------------------------------------------------
// OrderWatch
// ---------------------------------------------------------------------------

/// Handle to a periodic order refresh started by
/// [`AsyncStorefrontClient::watch_orders`]. Dropping it stops the refresh.
pub struct OrderWatch {
    receiver: watch::Receiver<ListView<Order>>,
    handle: JoinHandle<()>,
}

impl OrderWatch {
    /// The most recently received order list.
    pub fn latest(&self) -> ListView<Order> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next update. Returns `false` once the refresh has stopped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Stop refreshing.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for OrderWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
