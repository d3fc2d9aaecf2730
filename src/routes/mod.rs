//! Router assembly.

mod common;
mod orders;
mod products;

pub use common::common_routes;
pub use orders::order_routes;
pub use products::product_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// The full application: operational routes plus the product and order APIs.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(product_routes(state.clone()))
        .merge(order_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
