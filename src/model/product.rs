//! Catalogue products.

use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// Exact, case-sensitive membership test.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl Entity for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn clear_ids(&mut self) {
        self.id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_partial_payload_with_defaults() {
        let p: Product = serde_json::from_value(json!({ "name": "Laptop", "price": 1299.99 })).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.name, "Laptop");
        assert_eq!(p.description, "");
        assert!(p.categories.is_empty());
    }

    #[test]
    fn category_membership_is_case_sensitive() {
        let p = Product {
            categories: vec!["Electronics".into(), "Computers".into()],
            ..Default::default()
        };
        assert!(p.in_category("Electronics"));
        assert!(!p.in_category("electronics"));
        assert!(!p.in_category("Elec"));
    }
}
