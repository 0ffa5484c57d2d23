//! HTTP handlers for product endpoints

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::models::{CreateProductRequest, CreateProductResponse};
use crate::services::ProductService;
use crate::AppState;

/// Create a product and its initial inventory
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreateProductResponse>)> {
    let Json(request) = payload?;
    let input = request.into_new_product()?;

    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}
