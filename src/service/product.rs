//! Product business functions: straight delegation to the repository.

use crate::error::AppError;
use crate::model::{Entity, Product};
use crate::store::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Products tagged with `category` (exact match).
    pub async fn recommended_products(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.repository.find_by_category(category).await
    }

    /// Any id in the payload is ignored; the store assigns one.
    pub async fn create_product(&self, mut product: Product) -> Result<Product, AppError> {
        product.clear_ids();
        let product = self.repository.save(product).await?;
        tracing::info!(product_id = ?product.id, name = %product.name, "created product");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRepository;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryRepository::<Product>::new()))
    }

    fn laptop() -> Product {
        Product {
            id: None,
            name: "Laptop".into(),
            description: "14 inch".into(),
            price: 1299.99,
            categories: vec!["Electronics".into(), "Computers".into()],
        }
    }

    #[tokio::test]
    async fn created_product_id_is_stable() {
        let svc = service();
        let created = svc.create_product(laptop()).await.unwrap();
        let id = created.id.expect("id assigned");
        assert_eq!(created.name, "Laptop");
        assert_eq!(created.price, 1299.99);
        assert_eq!(created.categories, vec!["Electronics", "Computers"]);

        let fetched = svc.get_product(id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(svc.get_product(id).await.unwrap().unwrap().id, Some(id));
    }

    #[tokio::test]
    async fn client_supplied_id_is_ignored() {
        let svc = service();
        let first = svc.create_product(laptop()).await.unwrap();
        let mut dup = laptop();
        dup.id = first.id;
        let second = svc.create_product(dup).await.unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(svc.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn recommendations_are_the_category_subset() {
        let svc = service();
        let created = svc.create_product(laptop()).await.unwrap();
        svc.create_product(Product {
            name: "Novel".into(),
            categories: vec!["Books".into()],
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(svc.recommended_products("Electronics").await.unwrap(), vec![created]);
        assert!(svc.recommended_products("Toys").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_absent() {
        assert_eq!(service().get_product(404).await.unwrap(), None);
    }
}
