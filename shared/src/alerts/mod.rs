//! Low-stock alert computation
//!
//! Pure calculators shared by the alert service:
//! - threshold resolution (inventory override, product type default, fallback)
//! - sales velocity over a trailing window
//! - days-until-stockout projection
//! - assembly of the ranked alert list

mod stockout;
mod threshold;
mod velocity;

pub use stockout::*;
pub use threshold::*;
pub use velocity::*;

use crate::models::{LowStockAlert, LowStockAlertsResponse, SupplierInfo};
use crate::types::SalesWindow;

/// One inventory row joined with its product, warehouse, product type and supplier
#[derive(Debug, Clone)]
pub struct InventoryCandidate {
    pub inventory_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: i32,
    pub low_stock_threshold: Option<i32>,
    pub type_default_threshold: Option<i32>,
    pub supplier: Option<SupplierInfo>,
}

impl InventoryCandidate {
    pub fn key(&self) -> StockKey {
        StockKey::new(self.product_id, self.warehouse_id)
    }

    pub fn threshold(&self) -> i32 {
        effective_threshold(self.low_stock_threshold, self.type_default_threshold)
    }

    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.quantity, self.threshold())
    }
}

/// Caller-controlled alert parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertOptions {
    pub window: SalesWindow,
    /// Keep low-stock rows that had no sales in the window
    pub include_no_sales: bool,
}

/// Build the ranked alert list from fetched inventory rows and window sales.
///
/// Rows are kept when below their effective threshold and, unless
/// `include_no_sales` is set, when they sold something in the window.
/// Projected rows come first, most urgent first; unprojected rows follow.
/// The sort is stable, so ties keep the input order.
pub fn assemble_low_stock_alerts<I>(
    candidates: I,
    sales: &SalesTotals,
    options: AlertOptions,
) -> LowStockAlertsResponse
where
    I: IntoIterator<Item = InventoryCandidate>,
{
    let mut alerts: Vec<LowStockAlert> = candidates
        .into_iter()
        .filter(InventoryCandidate::is_low_stock)
        .filter_map(|candidate| {
            let velocity = average_daily_sales(sales.total_sold(candidate.key()), options.window);
            if velocity.is_none() && !options.include_no_sales {
                return None;
            }

            Some(LowStockAlert {
                threshold: candidate.threshold(),
                days_until_stockout: days_until_stockout(candidate.quantity, velocity),
                product_id: candidate.product_id,
                product_name: candidate.product_name,
                sku: candidate.sku,
                warehouse_id: candidate.warehouse_id,
                warehouse_name: candidate.warehouse_name,
                current_stock: candidate.quantity,
                supplier: candidate.supplier,
            })
        })
        .collect();

    alerts.sort_by_key(urgency);

    LowStockAlertsResponse::new(alerts)
}

/// Sort key: projected before unprojected, then fewest days first
pub fn urgency(alert: &LowStockAlert) -> (bool, i64) {
    match alert.days_until_stockout {
        Some(days) => (false, days),
        None => (true, 0),
    }
}
