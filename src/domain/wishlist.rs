use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use super::catalog::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    pub product_id: Uuid,
    pub date_added: DateTime<Utc>,
}

/// A user's saved products, one entry per product, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    pub fn from_entries(entries: Vec<WishlistEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<WishlistEntry> {
        self.entries
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.entries.iter().any(|e| e.product_id == product_id)
    }

    /// Saves a product. Unlike the cart, a repeat is a no-op; returns whether
    /// an entry was added.
    ///
    /// `date_added` is kept at microseconds, the precision of the stored
    /// column, so a freshly added entry equals its reloaded form.
    pub fn add(&mut self, product_id: Uuid, now: DateTime<Utc>) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.entries.push(WishlistEntry {
            product_id,
            date_added: now.trunc_subsecs(6),
        });
        true
    }

    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);
        self.entries.len() != before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItemView {
    pub product: Option<Product>,
    pub product_id: Uuid,
    pub date_added: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn add_is_idempotent_and_keeps_first_date() {
        let p = Uuid::new_v4();
        let first = Utc::now();
        let mut wishlist = Wishlist::default();

        assert!(wishlist.add(p, first));
        assert!(!wishlist.add(p, first + Duration::minutes(5)));

        assert_eq!(wishlist.entries().len(), 1);
        assert_eq!(wishlist.entries()[0].date_added, first.trunc_subsecs(6));
    }

    #[test]
    fn date_added_is_kept_at_microseconds() {
        let now = DateTime::parse_from_rfc3339("2024-06-01T20:53:57.833855473Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut wishlist = Wishlist::default();
        wishlist.add(Uuid::new_v4(), now);

        assert_eq!(
            wishlist.entries()[0].date_added.to_rfc3339(),
            "2024-06-01T20:53:57.833855+00:00"
        );
    }

    #[test]
    fn add_preserves_insertion_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut wishlist = Wishlist::default();
        wishlist.add(b, Utc::now());
        wishlist.add(a, Utc::now());

        let ids: Vec<Uuid> = wishlist.entries().iter().map(|e| e.product_id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn remove_is_idempotent() {
        let p = Uuid::new_v4();
        let mut wishlist = Wishlist::default();
        wishlist.add(p, Utc::now());

        assert!(wishlist.remove(p));
        assert!(!wishlist.remove(p));
        assert!(wishlist.entries().is_empty());
    }
}
