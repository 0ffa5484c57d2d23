//! Sales velocity over a trailing window

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Sale;
use crate::types::SalesWindow;

/// Identifies one product stocked at one warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StockKey {
    pub product_id: i64,
    pub warehouse_id: i64,
}

impl StockKey {
    pub fn new(product_id: i64, warehouse_id: i64) -> Self {
        Self {
            product_id,
            warehouse_id,
        }
    }
}

/// Units sold inside a window, per (product, warehouse).
///
/// A pair with no entry had no sales in the window, which is distinct from
/// having a velocity of zero.
#[derive(Debug, Clone, Default)]
pub struct SalesTotals {
    totals: HashMap<StockKey, i64>,
}

impl SalesTotals {
    /// Aggregate raw sale events, keeping only those inside `window` ending at `now`
    pub fn from_sales<'a, I>(sales: I, window: SalesWindow, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Sale>,
    {
        sales
            .into_iter()
            .filter(|sale| window.contains(sale.sale_date, now))
            .map(|sale| {
                (
                    StockKey::new(sale.product_id, sale.warehouse_id),
                    i64::from(sale.quantity),
                )
            })
            .collect()
    }

    pub fn total_sold(&self, key: StockKey) -> Option<i64> {
        self.totals.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Repeated keys accumulate, so both raw events and pre-grouped rows can be collected
impl FromIterator<(StockKey, i64)> for SalesTotals {
    fn from_iter<T: IntoIterator<Item = (StockKey, i64)>>(iter: T) -> Self {
        let mut totals = HashMap::new();
        for (key, quantity) in iter {
            *totals.entry(key).or_insert(0) += quantity;
        }
        Self { totals }
    }
}

/// Average units sold per day over the whole window.
///
/// The denominator is the window length, not the number of days that saw a
/// sale, so sparse sales are spread over the full period. `None` means no
/// sales were recorded in the window.
pub fn average_daily_sales(total_sold: Option<i64>, window: SalesWindow) -> Option<f64> {
    total_sold.map(|total| total as f64 / window.days() as f64)
}
