//! Storefront: products and orders over a REST API, backed by PostgreSQL or an in-memory store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Order, OrderItem, Product};
pub use routes::app;
pub use service::{OrderService, ProductService};
pub use state::AppState;
pub use store::ensure_database_exists;
