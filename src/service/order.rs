//! Order business functions. Status update is the only one with logic of its own.

use crate::error::AppError;
use crate::model::{Entity, Order};
use crate::store::OrderRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<Order>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Saves the order and its items as new records; client ids are discarded
    /// so an item can never end up shared with another order.
    pub async fn create_order(&self, mut order: Order) -> Result<Order, AppError> {
        order.clear_ids();
        let order = self.repository.save(order).await?;
        tracing::info!(
            order_id = ?order.id,
            user_id = order.user_id,
            items = order.order_items.len(),
            "created order"
        );
        Ok(order)
    }

    /// Overwrite the status of an existing order and save the whole record.
    /// Returns `None`, without writing anything, when the order does not exist.
    pub async fn update_order_status(&self, order_id: i64, status: &str) -> Result<Option<Order>, AppError> {
        let Some(mut order) = self.repository.find_by_id(order_id).await? else {
            tracing::debug!(order_id, "status update for unknown order");
            return Ok(None);
        };
        let previous = std::mem::replace(&mut order.status, status.to_string());
        let order = self.repository.save(order).await?;
        tracing::info!(order_id, from = %previous, to = %order.status, "order status changed");
        Ok(Some(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderItem;
    use crate::store::{MemoryRepository, Repository};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn item(product_id: i64, quantity: i32) -> OrderItem {
        OrderItem { id: None, product_id, quantity }
    }

    fn pending(user_id: i64) -> Order {
        Order {
            id: None,
            user_id,
            status: "Pending".into(),
            order_items: vec![item(1, 2), item(7, 1)],
        }
    }

    /// Memory repository that counts saves.
    #[derive(Default)]
    struct CountingRepository {
        inner: MemoryRepository<Order>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl Repository<Order> for CountingRepository {
        async fn find_all(&self) -> Result<Vec<Order>, AppError> {
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
            self.inner.find_by_id(id).await
        }

        async fn save(&self, order: Order) -> Result<Order, AppError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(order).await
        }
    }

    #[async_trait]
    impl OrderRepository for CountingRepository {
        async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
            self.inner.find_by_user_id(user_id).await
        }
    }

    #[tokio::test]
    async fn status_update_changes_only_status() {
        let svc = OrderService::new(Arc::new(MemoryRepository::<Order>::new()));
        let created = svc.create_order(pending(2)).await.unwrap();
        let id = created.id.unwrap();

        let updated = svc.update_order_status(id, "Shipped").await.unwrap().unwrap();
        assert_eq!(updated.status, "Shipped");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.order_items, created.order_items);

        let stored = svc.get_order(id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn status_update_on_unknown_order_is_absent_and_writes_nothing() {
        let repo = Arc::new(CountingRepository::default());
        let svc = OrderService::new(repo.clone());

        assert_eq!(svc.update_order_status(999, "Shipped").await.unwrap(), None);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
        assert!(svc.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn any_status_string_is_accepted() {
        let svc = OrderService::new(Arc::new(MemoryRepository::<Order>::new()));
        let id = svc.create_order(pending(1)).await.unwrap().id.unwrap();
        for status in ["SHIPPED", "", "on the moon"] {
            let updated = svc.update_order_status(id, status).await.unwrap().unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn created_order_round_trips_items_in_order() {
        let svc = OrderService::new(Arc::new(MemoryRepository::<Order>::new()));
        let created = svc.create_order(pending(5)).await.unwrap();
        let fetched = svc.get_order(created.id.unwrap()).await.unwrap().unwrap();
        let pairs: Vec<_> = fetched.order_items.iter().map(|i| (i.product_id, i.quantity)).collect();
        assert_eq!(pairs, vec![(1, 2), (7, 1)]);
        assert!(fetched.order_items.iter().all(|i| i.id.is_some()));
    }

    #[tokio::test]
    async fn orders_by_user_is_the_user_subset() {
        let svc = OrderService::new(Arc::new(MemoryRepository::<Order>::new()));
        for user_id in [1, 2, 1, 3] {
            svc.create_order(pending(user_id)).await.unwrap();
        }
        let mine = svc.orders_by_user(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.user_id == 1));
        assert!(svc.orders_by_user(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_discards_client_item_ids() {
        let svc = OrderService::new(Arc::new(MemoryRepository::<Order>::new()));
        let first = svc.create_order(pending(1)).await.unwrap();
        let mut copy = first.clone();
        copy.user_id = 2;
        let second = svc.create_order(copy).await.unwrap();
        assert_ne!(second.id, first.id);
        for (a, b) in first.order_items.iter().zip(&second.order_items) {
            assert_ne!(a.id, b.id);
        }
    }
}
