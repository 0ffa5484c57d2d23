//! Product creation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_price;

/// Raw product creation payload.
///
/// Every field is optional at this stage so that missing fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub warehouse_id: Option<i64>,
    pub initial_quantity: Option<i32>,
    pub description: Option<String>,
    pub supplier_id: Option<i64>,
    pub product_type_id: Option<i64>,
}

/// A product creation request with every required field present,
/// trimmed and ready for validation
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 255, message = "Product name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "SKU must be 1-100 characters"))]
    pub sku: String,
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    pub warehouse_id: i64,
    #[validate(range(min = 0, message = "Initial quantity must be non-negative"))]
    pub initial_quantity: i32,
    pub description: Option<String>,
    pub supplier_id: Option<i64>,
    pub product_type_id: Option<i64>,
}

/// Summary returned after a product is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: i64,
    pub name: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub warehouse_id: i64,
    pub initial_quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Response body for a successful product creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product: CreatedProduct,
}

impl From<CreatedProduct> for CreateProductResponse {
    fn from(product: CreatedProduct) -> Self {
        Self {
            message: "Product created successfully".to_string(),
            product,
        }
    }
}
