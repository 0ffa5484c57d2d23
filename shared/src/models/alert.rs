//! Low-stock alert response models

use serde::{Deserialize, Serialize};

/// Supplier contact details attached to an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierInfo {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
}

/// A (product, warehouse) pair whose stock is below its effective threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    /// Absent when there is no sales activity to project from
    pub days_until_stockout: Option<i64>,
    pub supplier: Option<SupplierInfo>,
}

/// Ranked low-stock alerts for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlertsResponse {
    pub alerts: Vec<LowStockAlert>,
    pub total_alerts: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LowStockAlertsResponse {
    pub fn new(alerts: Vec<LowStockAlert>) -> Self {
        Self {
            total_alerts: alerts.len(),
            alerts,
            message: None,
        }
    }

    /// Empty response for a company that has no warehouses
    pub fn no_warehouses() -> Self {
        Self {
            alerts: Vec::new(),
            total_alerts: 0,
            message: Some("No warehouses found for this company".to_string()),
        }
    }
}
