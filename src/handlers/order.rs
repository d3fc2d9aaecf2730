//! Order handlers: list, read, list by user, create, status update.

use crate::error::AppError;
use crate::model::Order;
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
pub struct StatusQuery {
    pub status: String,
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list_orders().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    order_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Order>, AppError> {
    let Path(order_id) = order_id?;
    let order = state
        .orders
        .get_order(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {}", order_id)))?;
    Ok(Json(order))
}

pub async fn orders_by_user(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Order>>, AppError> {
    let Path(user_id) = user_id?;
    Ok(Json(state.orders.orders_by_user(user_id).await?))
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<Order>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let Json(order) = payload?;
    Ok(Json(state.orders.create_order(order).await?))
}

/// PUT /api/orders/:order_id?status=X. Unknown ids are a 404; nothing is written.
pub async fn update_order_status(
    State(state): State<AppState>,
    order_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Order>, AppError> {
    let Path(order_id) = order_id?;
    let Query(query) = query?;
    let order = state
        .orders
        .update_order_status(order_id, &query.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {}", order_id)))?;
    Ok(Json(order))
}
