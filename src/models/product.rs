use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Product — A catalog record returned by the product service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "id")]
    pub product_id: i64,
    pub name: String,
    #[serde(deserialize_with = "super::number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// ---------------------------------------------------------------------------
// NewProduct — Body for creating a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock_quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock_quantity,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trim the name and send a blank description as `null`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: super::non_blank(self.description),
            ..self
        }
    }

    /// Name, price and stock are required; numbers must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Product name"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidNumber {
                field: "Price",
                value: self.price.to_string(),
            });
        }
        if self.stock_quantity < 0 {
            return Err(ValidationError::InvalidNumber {
                field: "Stock",
                value: self.stock_quantity.to_string(),
            });
        }
        Ok(())
    }
}
