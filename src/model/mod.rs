//! Domain records exchanged with clients and persisted by the store.

pub mod order;
pub mod product;

pub use order::{Order, OrderItem};
pub use product::Product;

/// A record whose primary key is assigned by the store on first save.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in not-found messages and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Drop every store-assigned id so the next save inserts a fresh record.
    fn clear_ids(&mut self);

    /// Give owned child records without an id a fresh one from `next_id`.
    fn assign_child_ids(&mut self, _next_id: &mut dyn FnMut() -> i64) {}
}
