//! Effective low-stock threshold resolution

/// Threshold used when neither the inventory row nor the product type sets one
pub const FALLBACK_LOW_STOCK_THRESHOLD: i32 = 10;

/// Resolve the effective threshold: inventory override, then the product
/// type default, then [`FALLBACK_LOW_STOCK_THRESHOLD`].
pub fn effective_threshold(inventory_override: Option<i32>, type_default: Option<i32>) -> i32 {
    inventory_override
        .or(type_default)
        .unwrap_or(FALLBACK_LOW_STOCK_THRESHOLD)
}

/// Stock is low only when strictly below the threshold
pub fn is_low_stock(quantity: i32, threshold: i32) -> bool {
    quantity < threshold
}
