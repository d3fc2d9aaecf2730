//! Create the storefront tables. Every statement is idempotent, so this runs on each start.

use crate::error::AppError;
use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        price DOUBLE PRECISION NOT NULL DEFAULT 0,
        categories TEXT[] NOT NULL DEFAULT '{}'
    )
    "#,
    "CREATE INDEX IF NOT EXISTS products_categories_idx ON products USING GIN (categories)",
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        status TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS orders_user_id_idx ON orders (user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id BIGSERIAL PRIMARY KEY,
        order_id BIGINT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        product_id BIGINT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS order_items_order_id_idx ON order_items (order_id, position)",
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        tracing::debug!(sql = %ddl.trim(), "migration");
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = SCHEMA.len(), "schema up to date");
    Ok(())
}
