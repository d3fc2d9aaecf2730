//! HTTP handlers. Each one delegates to a service and maps `None` to 404.

pub mod order;
pub mod product;
