//! Sales models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sale event; append-only and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    /// Always positive
    pub quantity: i32,
    pub sale_date: DateTime<Utc>,
    pub order_id: Option<String>,
    pub customer_id: Option<i64>,
}
