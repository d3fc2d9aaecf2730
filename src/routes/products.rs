//! Product API routes.

use crate::handlers::product::{create_product, get_product, list_products, recommended_products};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Product routes under /api/products. The static `recommendations` segment wins over `:id`.
pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/recommendations", get(recommended_products))
        .route("/api/products/:id", get(get_product))
        .with_state(state)
}
