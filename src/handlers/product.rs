//! Product handlers: list, read, recommendations by category, create.
//! Extractor rejections are converted to `AppError` so every failure uses the JSON error body.

use crate::error::AppError;
use crate::model::Product;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: String,
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list_products().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, AppError> {
    let Path(id) = id?;
    let product = state
        .products
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
    Ok(Json(product))
}

/// GET /api/products/recommendations?category=X
pub async fn recommended_products(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.products.recommended_products(&query.category).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Json(product) = payload?;
    Ok(Json(state.products.create_product(product).await?))
}
