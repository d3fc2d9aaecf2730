//! PostgreSQL repositories. Each query shape is written out explicitly.

use super::{OrderRepository, ProductRepository, Repository};
use crate::error::AppError;
use crate::model::{Entity, Order, OrderItem, Product};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

const PRODUCT_COLUMNS: &str = "id, name, description, price, categories";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    categories: Vec<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            categories: row.categories,
        }
    }
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_many(&self, sql: &str, bind: Option<&str>) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %sql, param = ?bind, "query");
        let mut query = sqlx::query_as::<_, ProductRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS);
        self.query_many(&sql, None).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Product::from))
    }

    async fn save(&self, product: Product) -> Result<Product, AppError> {
        let sql = match product.id {
            None => format!(
                "INSERT INTO products (name, description, price, categories) VALUES ($1, $2, $3, $4) RETURNING {}",
                PRODUCT_COLUMNS
            ),
            Some(_) => format!(
                "UPDATE products SET name = $1, description = $2, price = $3, categories = $4 WHERE id = $5 RETURNING {}",
                PRODUCT_COLUMNS
            ),
        };
        tracing::debug!(sql = %sql, id = ?product.id, "query");
        let mut query = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.categories.as_slice());
        if let Some(id) = product.id {
            query = query.bind(id);
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(Product::from)
            .ok_or_else(|| AppError::NotFound(format!("{} {}", Product::KIND, product.id.unwrap_or_default())))
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {} FROM products WHERE categories @> ARRAY[$1]::text[] ORDER BY id",
            PRODUCT_COLUMNS
        );
        self.query_many(&sql, Some(category)).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    status: String,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i32,
}

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load orders, then batch-load their items in one query and attach them in position order.
    async fn with_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let sql = "SELECT id, order_id, product_id, quantity FROM order_items \
                   WHERE order_id = ANY($1) ORDER BY order_id, position";
        tracing::debug!(sql = %sql, orders = ids.len(), "query");
        let items = sqlx::query_as::<_, OrderItemRow>(sql)
            .bind(ids.as_slice())
            .fetch_all(&self.pool)
            .await?;

        let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(OrderItem {
                id: Some(item.id),
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        Ok(rows
            .into_iter()
            .map(|r| Order {
                id: Some(r.id),
                user_id: r.user_id,
                status: r.status,
                order_items: by_order.remove(&r.id).unwrap_or_default(),
            })
            .collect())
    }

    /// Write the items of `order_id` to match `items`: update known ids, insert the rest,
    /// delete rows no longer present. Fills in the ids of inserted items.
    async fn sync_items(
        tx: &mut PgConnection,
        order_id: i64,
        items: &mut [OrderItem],
    ) -> Result<(), AppError> {
        for (position, item) in items.iter_mut().enumerate() {
            let position = position as i32;
            let updated = match item.id {
                Some(item_id) => {
                    let res = sqlx::query(
                        "UPDATE order_items SET product_id = $1, quantity = $2, position = $3 \
                         WHERE id = $4 AND order_id = $5",
                    )
                    .bind(item.product_id)
                    .bind(item.quantity)
                    .bind(position)
                    .bind(item_id)
                    .bind(order_id)
                    .execute(&mut *tx)
                    .await?;
                    res.rows_affected() > 0
                }
                None => false,
            };
            if !updated {
                let (item_id,): (i64,) = sqlx::query_as(
                    "INSERT INTO order_items (order_id, position, product_id, quantity) \
                     VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(order_id)
                .bind(position)
                .bind(item.product_id)
                .bind(item.quantity)
                .fetch_one(&mut *tx)
                .await?;
                item.id = Some(item_id);
            }
        }

        let kept: Vec<i64> = items.iter().filter_map(|i| i.id).collect();
        sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND id <> ALL($2)")
            .bind(order_id)
            .bind(kept.as_slice())
            .execute(&mut *tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Order> for PgOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, AppError> {
        let sql = "SELECT id, user_id, status FROM orders ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, OrderRow>(sql).fetch_all(&self.pool).await?;
        self.with_items(rows).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let sql = "SELECT id, user_id, status FROM orders WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, OrderRow>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let rows: Vec<OrderRow> = row.into_iter().collect();
        Ok(self.with_items(rows).await?.pop())
    }

    async fn save(&self, mut order: Order) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;
        let order_id = match order.id {
            None => {
                let (id,): (i64,) =
                    sqlx::query_as("INSERT INTO orders (user_id, status) VALUES ($1, $2) RETURNING id")
                        .bind(order.user_id)
                        .bind(&order.status)
                        .fetch_one(&mut *tx)
                        .await?;
                id
            }
            Some(id) => {
                let res = sqlx::query("UPDATE orders SET user_id = $1, status = $2 WHERE id = $3")
                    .bind(order.user_id)
                    .bind(&order.status)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                if res.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("{} {}", Order::KIND, id)));
                }
                id
            }
        };
        tracing::debug!(order_id, items = order.order_items.len(), "saving order (tx)");
        Self::sync_items(&mut *tx, order_id, &mut order.order_items).await?;
        tx.commit().await?;
        order.set_id(order_id);
        Ok(order)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        let sql = "SELECT id, user_id, status FROM orders WHERE user_id = $1 ORDER BY id";
        tracing::debug!(sql = %sql, user_id, "query");
        let rows = sqlx::query_as::<_, OrderRow>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        self.with_items(rows).await
    }
}
