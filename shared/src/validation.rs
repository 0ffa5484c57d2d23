//! Validation utilities for product creation requests

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{CreateProductRequest, NewProduct};

/// Largest price a NUMERIC(10,2) column can hold
fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Reasons a product creation request is rejected before touching storage
#[derive(Debug, Error)]
pub enum ProductRequestError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid product fields: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Validate that a price is non-negative and fits the storage precision
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("price_negative");
        err.message = Some("Price must be non-negative".into());
        return Err(err);
    }
    if *price > max_price() {
        let mut err = ValidationError::new("price_too_large");
        err.message = Some("Price exceeds the maximum of 99999999.99".into());
        return Err(err);
    }
    Ok(())
}

/// Names of required fields absent from the request, in declaration order
pub fn missing_required_fields(request: &CreateProductRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if request.name.is_none() {
        missing.push("name");
    }
    if request.sku.is_none() {
        missing.push("sku");
    }
    if request.price.is_none() {
        missing.push("price");
    }
    if request.warehouse_id.is_none() {
        missing.push("warehouse_id");
    }
    if request.initial_quantity.is_none() {
        missing.push("initial_quantity");
    }
    missing
}

impl CreateProductRequest {
    /// Check presence of required fields, trim text, and validate ranges
    pub fn into_new_product(self) -> Result<NewProduct, ProductRequestError> {
        let missing = missing_required_fields(&self);
        let (Some(name), Some(sku), Some(price), Some(warehouse_id), Some(initial_quantity)) = (
            self.name,
            self.sku,
            self.price,
            self.warehouse_id,
            self.initial_quantity,
        ) else {
            return Err(ProductRequestError::MissingFields(missing));
        };

        let mut product = NewProduct {
            name: name.trim().to_string(),
            sku: sku.trim().to_string(),
            price,
            warehouse_id,
            initial_quantity,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            supplier_id: self.supplier_id,
            product_type_id: self.product_type_id,
        };

        // Bounds hold for the value as sent and for the stored cents
        product.validate()?;
        product.price = product
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        product.validate()?;
        Ok(product)
    }
}
