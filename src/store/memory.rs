//! In-process store used when no database is configured, and by tests.

use super::{OrderRepository, ProductRepository, Repository};
use crate::error::AppError;
use crate::model::{Entity, Order, Product};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// One table keyed by id. Child records are stored inside their parent, so
/// they are written and dropped with it.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    rows: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
    next_child_id: AtomicI64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            next_child_id: AtomicI64::new(1),
        }
    }

    async fn find_where<F>(&self, pred: F) -> Vec<E>
    where
        F: Fn(&E) -> bool + Send,
    {
        let rows = self.rows.read().await;
        rows.values().filter(|e| pred(*e)).cloned().collect()
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, AppError> {
        Ok(self.find_where(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E, AppError> {
        let mut rows = self.rows.write().await;
        let id = match entity.id() {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(AppError::NotFound(format!("{} {}", E::KIND, id))),
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                entity.set_id(id);
                id
            }
        };
        entity.assign_child_ids(&mut || self.next_child_id.fetch_add(1, Ordering::SeqCst));
        rows.insert(id, entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl ProductRepository for MemoryRepository<Product> {
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        Ok(self.find_where(|p| p.in_category(category)).await)
    }
}

#[async_trait]
impl OrderRepository for MemoryRepository<Order> {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        Ok(self.find_where(|o| o.user_id == user_id).await)
    }
}
