//! Orders and their owned line items.

use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    /// Free-form; no transition rules are enforced.
    #[serde(default)]
    pub status: String,
    /// Owned by the order: saved and deleted together with it.
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i32,
}

impl Entity for Order {
    const KIND: &'static str = "order";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn clear_ids(&mut self) {
        self.id = None;
        for item in &mut self.order_items {
            item.id = None;
        }
    }

    fn assign_child_ids(&mut self, next_id: &mut dyn FnMut() -> i64) {
        for item in self.order_items.iter_mut().filter(|i| i.id.is_none()) {
            item.id = Some(next_id());
        }
    }
}
