//! Route definitions for the StockFlow inventory platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/products", post(handlers::create_product))
        .nest("/companies", company_routes())
}

/// Company-scoped routes
fn company_routes() -> Router<AppState> {
    Router::new().route(
        "/:company_id/alerts/low-stock",
        get(handlers::get_low_stock_alerts),
    )
}
