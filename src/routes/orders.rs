//! Order API routes.

use crate::handlers::order::{create_order, get_order, list_orders, orders_by_user, update_order_status};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Order routes under /api/orders.
pub fn order_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/user/:user_id", get(orders_by_user))
        .route("/api/orders/:order_id", get(get_order).put(update_order_status))
        .with_state(state)
}
