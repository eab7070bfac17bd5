//! Product catalog queries.

use std::path::Path;

use reqwest::blocking::multipart::Form;

use crate::config::{self, PRODUCT_API};
use crate::error::Result;
use crate::models::{NewProduct, Product};
use crate::transport::Transport;

/// Query interface for the product catalog service.
pub struct ProductQuery<'a> {
    transport: &'a Transport,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given transport.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List the whole catalog.
    pub fn list(&self) -> Result<Vec<Product>> {
        self.transport.get_list(PRODUCT_API)
    }

    /// Get a single product by id.
    pub fn get(&self, product_id: i64) -> Result<Product> {
        self.transport
            .get_json(&config::item_path(PRODUCT_API, product_id))
    }

    /// Create a product. Invalid names or numbers fail before any request.
    pub fn create(&self, product: NewProduct) -> Result<Product> {
        let product = product.normalized();
        product.validate()?;
        let created: Product = self.transport.post_json(PRODUCT_API, &product)?;
        tracing::info!(product_id = created.product_id, "product created");
        Ok(created)
    }

    /// Delete a product by id.
    pub fn delete(&self, product_id: i64) -> Result<()> {
        self.transport
            .delete(&config::item_path(PRODUCT_API, product_id))
    }

    /// Upload an image file for a product and return the updated record.
    ///
    /// The file is sent as the multipart field `file`.
    pub fn upload_image<P: AsRef<Path>>(&self, product_id: i64, image: P) -> Result<Product> {
        let form = Form::new().file("file", image.as_ref())?;
        let path = format!("{}/upload-image", config::item_path(PRODUCT_API, product_id));
        self.transport.post_multipart(&path, form)
    }

    /// Upload in-memory image bytes under the given file name.
    pub fn upload_image_bytes(
        &self,
        product_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Product> {
        let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let path = format!("{}/upload-image", config::item_path(PRODUCT_API, product_id));
        self.transport.post_multipart(&path, form)
    }
}
