//! One user's storefront session.
//!
//! A [`Session`] owns a cart and the on-screen list views, borrows a
//! [`StorefrontClient`], and maps every user action to a [`Notice`]. Each
//! action is guarded on its own: a failure is reported and leaves unrelated
//! state alone.

use std::path::Path;

use crate::cart::Cart;
use crate::checkout::Checkout;
use crate::models::{NewCustomer, NewProduct, OrderStatus, Product};
use crate::views::{Dashboard, ListView, Notice};
use crate::StorefrontClient;

pub struct Session<'a> {
    client: &'a StorefrontClient,
    cart: Cart,
    checkout: Checkout,
    dashboard: Dashboard,
}

impl<'a> Session<'a> {
    /// Start a session with an empty cart and every list in the loading state.
    pub fn new(client: &'a StorefrontClient) -> Self {
        Self {
            client,
            cart: Cart::new(),
            checkout: client.checkout(),
            dashboard: Dashboard::default(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    // -- Lists ---------------------------------------------------------------

    /// Re-fetch every list.
    pub fn refresh_all(&mut self) {
        self.refresh_customers();
        self.refresh_products();
        self.refresh_orders();
    }

    pub fn refresh_customers(&mut self) {
        self.dashboard.customers = ListView::from_result(self.client.customers().list());
    }

    pub fn refresh_products(&mut self) {
        self.dashboard.products = ListView::from_result(self.client.products().list());
    }

    pub fn refresh_orders(&mut self) {
        self.dashboard.orders = ListView::from_result(self.client.orders().list());
    }

    // -- Cart ----------------------------------------------------------------

    pub fn add_to_cart(&mut self, product: &Product) -> Notice {
        self.cart.add_product(product);
        Notice::success(format!("Added \"{}\" to cart.", product.name))
    }

    pub fn remove_from_cart(&mut self, product_id: i64) -> Notice {
        match self.cart.get(product_id).map(|line| line.name.clone()) {
            Some(name) => {
                self.cart.remove(product_id);
                Notice::info(format!("Removed \"{}\" from cart.", name))
            }
            None => Notice::info("That item is not in the cart."),
        }
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart is emptied and the order list refreshed; on any
    /// failure the cart is kept for a retry.
    pub fn place_order(&mut self, customer_id: i64, shipping_address: &str) -> Notice {
        let client = self.client;
        let orders = client.orders();
        match self
            .checkout
            .submit(&mut self.cart, &orders, customer_id, shipping_address)
        {
            Ok(order) => {
                self.refresh_orders();
                Notice::success(format!("Order #{} placed successfully.", order.order_id))
            }
            Err(e) => Notice::from_error("place order", &e),
        }
    }

    // -- Customers -----------------------------------------------------------

    pub fn create_customer(&mut self, customer: NewCustomer) -> Notice {
        match self.client.customers().create(customer) {
            Ok(_) => {
                self.refresh_customers();
                Notice::success("Customer added successfully.")
            }
            Err(e) => Notice::from_error("add customer", &e),
        }
    }

    pub fn delete_customer(&mut self, customer_id: i64) -> Notice {
        match self.client.customers().delete(customer_id) {
            Ok(()) => {
                self.refresh_customers();
                Notice::success(format!("Customer {} deleted.", customer_id))
            }
            Err(e) => Notice::from_error("delete customer", &e),
        }
    }

    // -- Products ------------------------------------------------------------

    pub fn create_product(&mut self, product: NewProduct) -> Notice {
        match self.client.products().create(product) {
            Ok(_) => {
                self.refresh_products();
                Notice::success("Product added successfully.")
            }
            Err(e) => Notice::from_error("add product", &e),
        }
    }

    /// Delete a product from the catalog.
    ///
    /// The cart is not touched; a line for a deleted product stays until the
    /// user removes it or the order service rejects it.
    pub fn delete_product(&mut self, product_id: i64) -> Notice {
        match self.client.products().delete(product_id) {
            Ok(()) => {
                self.refresh_products();
                Notice::success(format!("Product {} deleted.", product_id))
            }
            Err(e) => Notice::from_error("delete product", &e),
        }
    }

    pub fn upload_product_image<P: AsRef<Path>>(&mut self, product_id: i64, image: P) -> Notice {
        match self.client.products().upload_image(product_id, image) {
            Ok(product) => {
                self.refresh_products();
                Notice::success(format!("Image uploaded for \"{}\".", product.name))
            }
            Err(e) => Notice::from_error("upload image", &e),
        }
    }

    // -- Orders --------------------------------------------------------------

    pub fn update_order_status(&mut self, order_id: i64, status: OrderStatus) -> Notice {
        match self.client.orders().update_status(order_id, status) {
            Ok(order) => {
                self.refresh_orders();
                Notice::success(format!("Order #{} is now {}.", order.order_id, order.status))
            }
            Err(e) => Notice::from_error("update order", &e),
        }
    }

    pub fn delete_order(&mut self, order_id: i64) -> Notice {
        match self.client.orders().delete(order_id) {
            Ok(()) => {
                self.refresh_orders();
                Notice::success(format!("Order #{} deleted.", order_id))
            }
            Err(e) => Notice::from_error("delete order", &e),
        }
    }
}
