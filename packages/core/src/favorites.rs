use serde::{Deserialize, Serialize};

/// The favorites list as the storefront client keeps it: an ordered,
/// de-duplicated JSON array of product ids under one local-storage key.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn add(&mut self, product_id: &str) {
        if !self.contains(product_id) {
            self.ids.push(product_id.to_string());
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.ids.retain(|id| id != product_id);
    }

    /// Returns whether the product is a favorite after the toggle.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            self.remove(product_id);
            false
        } else {
            self.add(product_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut favorites = Favorites::new();
        favorites.add("p1");
        favorites.add("p1");
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle("p1"));
        assert!(favorites.contains("p1"));
        assert!(!favorites.toggle("p1"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn serde_round_trip_is_a_plain_array() {
        let mut favorites = Favorites::new();
        favorites.add("p1");
        favorites.add("p2");
        let raw = serde_json::to_string(&favorites).unwrap();
        assert_eq!(raw, r#"["p1","p2"]"#);
        let back: Favorites = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, favorites);
    }
}
