//! HTTP handlers for low-stock alert endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::LowStockAlertsResponse;
use crate::services::AlertService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    /// Trailing sales window in days
    pub days: Option<i64>,
    pub include_no_sales: Option<bool>,
}

/// Get low-stock alerts for a company
pub async fn get_low_stock_alerts(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
    query: Result<Query<LowStockQuery>, QueryRejection>,
) -> AppResult<Json<LowStockAlertsResponse>> {
    let Query(query) = query?;
    let days = query
        .days
        .unwrap_or(state.config.alerts.default_window_days);
    let include_no_sales = query.include_no_sales.unwrap_or(false);

    let service = AlertService::new(state.db);
    let alerts = service
        .get_low_stock_alerts(company_id, days, include_no_sales)
        .await?;
    Ok(Json(alerts))
}
