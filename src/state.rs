//! Shared application state for all routes.

use crate::model::{Order, Product};
use crate::service::{OrderService, ProductService};
use crate::store::{MemoryRepository, PgOrderRepository, PgProductRepository};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub orders: OrderService,
    /// Set when backed by PostgreSQL; the readiness probe pings it.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        AppState {
            products: ProductService::new(Arc::new(PgProductRepository::new(pool.clone()))),
            orders: OrderService::new(Arc::new(PgOrderRepository::new(pool.clone()))),
            pool: Some(pool),
        }
    }

    /// Process-local storage; contents are lost on restart.
    pub fn in_memory() -> Self {
        AppState {
            products: ProductService::new(Arc::new(MemoryRepository::<Product>::new())),
            orders: OrderService::new(Arc::new(MemoryRepository::<Order>::new())),
            pool: None,
        }
    }
}
