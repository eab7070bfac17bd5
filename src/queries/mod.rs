//! Query modules for the storefront services.
//!
//! Each module provides a query struct that borrows the client's
//! [`Transport`](crate::transport::Transport) and exposes one method per
//! endpoint of its service, returning typed records.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::CustomerQuery;
pub use orders::OrderQuery;
pub use products::ProductQuery;
