use uuid::Uuid;

use super::catalog::Product;
use super::errors::DomainError;

/// Identity of a cart line: two lines with equal keys never coexist in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(product_id: Uuid, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

impl CartLineItem {
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }
}

/// A user's cart lines in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Rebuilds a cart from stored lines. Storage enforces key uniqueness.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|item| item.matches(key))
    }

    /// Adds `quantity` units of the line: an existing line accumulates,
    /// a new one is appended.
    pub fn add(&mut self, key: LineKey, quantity: i32) -> Result<(), DomainError> {
        if quantity < 1 {
            return Err(DomainError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        match self.position(&key) {
            Some(idx) => {
                let line = &mut self.items[idx];
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::InvalidRequest("quantity is too large".to_string())
                })?;
            }
            None => self.items.push(CartLineItem {
                product_id: key.product_id,
                size: key.size,
                color: key.color,
                quantity,
            }),
        }
        Ok(())
    }

    /// Sets the quantity of an existing line. Zero or negative removes it,
    /// which is a no-op when the line is absent.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i32) -> Result<(), DomainError> {
        if quantity <= 0 {
            self.remove(key);
            return Ok(());
        }
        match self.position(key) {
            Some(idx) => {
                self.items[idx].quantity = quantity;
                Ok(())
            }
            None => Err(DomainError::NotFound("Cart item".to_string())),
        }
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(key));
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// A cart line joined with its catalog record. `product` is `None` once the
/// product has left the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemView {
    pub product: Option<Product>,
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(product_id: Uuid, size: &str) -> LineKey {
        LineKey::new(product_id, size, "Black")
    }

    #[test]
    fn add_appends_new_lines_in_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut cart = Cart::default();
        cart.add(key(b, "9"), 1).unwrap();
        cart.add(key(a, "9"), 1).unwrap();

        let ids: Vec<Uuid> = cart.items().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn add_accumulates_on_same_key() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(key(p, "9"), 1).unwrap();
        cart.add(key(p, "9"), 2).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn add_keeps_separate_lines_for_different_sizes() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(key(p, "9"), 1).unwrap();
        cart.add(key(p, "10"), 1).unwrap();

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn add_keeps_separate_lines_for_different_colors() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(LineKey::new(p, "9", "Black"), 1).unwrap();
        cart.add(LineKey::new(p, "9", "White"), 1).unwrap();

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut cart = Cart::default();
        for q in [0, -3] {
            let err = cart.add(key(Uuid::new_v4(), "9"), q).unwrap_err();
            assert!(matches!(err, DomainError::InvalidRequest(_)));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_overflowing_quantity_and_keeps_line() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(key(p, "9"), i32::MAX).unwrap();

        let err = cart.add(key(p, "9"), 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
        assert_eq!(cart.items()[0].quantity, i32::MAX);
    }

    #[test]
    fn set_quantity_replaces_rather_than_increments() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(key(p, "9"), 4).unwrap();

        cart.set_quantity(&key(p, "9"), 2).unwrap();
        cart.set_quantity(&key(p, "9"), 2).unwrap();
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn set_quantity_on_missing_line_is_not_found() {
        let mut cart = Cart::default();
        let err = cart.set_quantity(&key(Uuid::new_v4(), "9"), 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn set_quantity_zero_or_negative_removes() {
        let p = Uuid::new_v4();
        for q in [0, -1] {
            let mut cart = Cart::default();
            cart.add(key(p, "9"), 2).unwrap();
            cart.set_quantity(&key(p, "9"), q).unwrap();
            assert!(cart.is_empty());
        }
    }

    #[test]
    fn set_quantity_zero_on_missing_line_is_noop() {
        let mut cart = Cart::default();
        cart.add(key(Uuid::new_v4(), "9"), 1).unwrap();
        let before = cart.clone();

        cart.set_quantity(&key(Uuid::new_v4(), "9"), 0).unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn remove_matches_full_key_only() {
        let p = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(LineKey::new(p, "9", "Black"), 1).unwrap();
        cart.add(LineKey::new(p, "9", "White"), 1).unwrap();

        assert!(cart.remove(&LineKey::new(p, "9", "White")));
        assert!(!cart.remove(&LineKey::new(p, "9", "White")));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].color, "Black");
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::default();
        cart.add(key(Uuid::new_v4(), "9"), 1).unwrap();
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
    }
}
