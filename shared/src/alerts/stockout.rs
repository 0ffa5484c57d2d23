//! Days-until-stockout projection

/// Whole days of stock left at the given velocity.
///
/// Returns `None` when there is no velocity or it is not positive.
pub fn days_until_stockout(current_stock: i32, average_daily_sales: Option<f64>) -> Option<i64> {
    let velocity = average_daily_sales.filter(|v| v.is_finite() && *v > 0.0)?;
    let days = (f64::from(current_stock) / velocity).floor();
    // `as` saturates at i64::MAX for vanishingly small velocities
    Some(days as i64)
}
