use serde::{Deserialize, Serialize};

use crate::hub::ShippingPolicy;

/// One cart line. `price` is the unit price in whole rupees, snapshotted
/// when the item was added.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
}

/// The shopping cart as the storefront client keeps it: a JSON array under
/// a single local-storage key, read and rewritten whole on every change.
/// Lines are keyed by (product, size, color) so the same garment in two
/// sizes stays two lines.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    fn position(&self, product_id: &str, size: Option<&str>, color: Option<&str>) -> Option<usize> {
        self.items.iter().position(|i| {
            i.product_id == product_id
                && i.size.as_deref() == size
                && i.color.as_deref() == color
        })
    }

    /// Add an item, merging quantities into an existing matching line.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self.position(&item.product_id, item.size.as_deref(), item.color.as_deref()) {
            Some(idx) => self.items[idx].quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        color: Option<&str>,
        quantity: u32,
    ) {
        if let Some(idx) = self.position(product_id, size, color) {
            if quantity == 0 {
                self.items.remove(idx);
            } else {
                self.items[idx].quantity = quantity;
            }
        }
    }

    pub fn remove(&mut self, product_id: &str, size: Option<&str>, color: Option<&str>) {
        if let Some(idx) = self.position(product_id, size, color) {
            self.items.remove(idx);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> i64 {
        self.items
            .iter()
            .map(|i| i.price * i64::from(i.quantity))
            .sum()
    }

    /// Flat fee below the free-shipping threshold, free at or above it.
    /// An empty cart ships nothing and owes nothing.
    pub fn shipping_fee(&self, policy: &ShippingPolicy) -> i64 {
        if self.is_empty() || self.subtotal() >= policy.free_shipping_threshold {
            0
        } else {
            policy.flat_fee
        }
    }

    /// How much more to spend before shipping is free. `None` once the
    /// threshold is met (or the cart is empty).
    pub fn remaining_for_free_shipping(&self, policy: &ShippingPolicy) -> Option<i64> {
        if self.is_empty() {
            return None;
        }
        let subtotal = self.subtotal();
        if subtotal >= policy.free_shipping_threshold {
            None
        } else {
            Some(policy.free_shipping_threshold - subtotal)
        }
    }

    pub fn total(&self, policy: &ShippingPolicy) -> i64 {
        self.subtotal() + self.shipping_fee(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, size: Option<&str>, quantity: u32) -> CartItem {
        CartItem {
            product_id: id.to_string(),
            name: format!("Item {}", id),
            price,
            image: None,
            size: size.map(str::to_string),
            color: None,
            quantity,
        }
    }

    fn policy() -> ShippingPolicy {
        ShippingPolicy {
            free_shipping_threshold: 999,
            flat_fee: 49,
        }
    }

    #[test]
    fn add_merges_matching_lines() {
        let mut cart = Cart::new();
        cart.add(item("p1", 500, Some("M"), 1));
        cart.add(item("p1", 500, Some("M"), 2));
        cart.add(item("p1", 500, Some("L"), 1));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(item("p1", 500, Some("M"), 2));
        cart.update_quantity("p1", Some("M"), None, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_of_unknown_line_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(item("p1", 500, None, 1));
        cart.update_quantity("p2", None, None, 3);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn shipping_is_flat_below_threshold_and_free_above() {
        let policy = policy();
        let mut cart = Cart::new();
        cart.add(item("p1", 500, None, 1));
        assert_eq!(cart.shipping_fee(&policy), 49);
        assert_eq!(cart.remaining_for_free_shipping(&policy), Some(499));
        assert_eq!(cart.total(&policy), 549);

        cart.add(item("p2", 499, None, 1));
        assert_eq!(cart.subtotal(), 999);
        assert_eq!(cart.shipping_fee(&policy), 0);
        assert_eq!(cart.remaining_for_free_shipping(&policy), None);
        assert_eq!(cart.total(&policy), 999);
    }

    #[test]
    fn empty_cart_owes_nothing() {
        let cart = Cart::new();
        assert_eq!(cart.shipping_fee(&policy()), 0);
        assert_eq!(cart.total(&policy()), 0);
        assert_eq!(cart.remaining_for_free_shipping(&policy()), None);
    }

    #[test]
    fn serde_round_trip_is_a_plain_array() {
        let mut cart = Cart::new();
        cart.add(item("p1", 500, Some("M"), 2));
        let raw = serde_json::to_string(&cart).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains(r#""productId":"p1""#));
        let back: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, cart);
    }
}
