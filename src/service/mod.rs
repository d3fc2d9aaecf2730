//! Business layer between the HTTP handlers and the repositories.

pub mod order;
pub mod product;

pub use order::OrderService;
pub use product::ProductService;
