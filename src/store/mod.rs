//! Persistence: a generic repository contract, the per-entity query extensions,
//! and the Postgres and in-memory backends.

mod bootstrap;
pub mod memory;
pub mod postgres;

pub use bootstrap::ensure_database_exists;
pub use memory::MemoryRepository;
pub use postgres::{PgOrderRepository, PgProductRepository};

use crate::error::AppError;
use crate::model::{Order, Product};
use async_trait::async_trait;

/// The query shapes every entity store supports.
#[async_trait]
pub trait Repository<E: Send + 'static>: Send + Sync {
    /// All records in insertion (id) order.
    async fn find_all(&self) -> Result<Vec<E>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError>;

    /// Insert when the record has no id, otherwise overwrite the stored record.
    /// Returns the record as stored, with every assigned id filled in.
    async fn save(&self, entity: E) -> Result<E, AppError>;
}

#[async_trait]
pub trait ProductRepository: Repository<Product> {
    /// Products whose `categories` contain `category` exactly.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError>;
}

#[async_trait]
pub trait OrderRepository: Repository<Order> {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, AppError>;
}
