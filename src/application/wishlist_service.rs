use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CatalogRepository, WishlistRepository};
use crate::domain::wishlist::{Wishlist, WishlistItemView};

use super::cart_service::index_by_id;

/// Result of saving a product: `added` is false when it was already saved.
#[derive(Debug, Clone)]
pub struct WishlistUpdate {
    pub added: bool,
    pub items: Vec<WishlistItemView>,
}

pub struct WishlistService<C, W> {
    catalog: C,
    wishlists: W,
}

impl<C: CatalogRepository, W: WishlistRepository> WishlistService<C, W> {
    pub fn new(catalog: C, wishlists: W) -> Self {
        Self { catalog, wishlists }
    }

    pub fn get_wishlist(&self, user_id: Uuid) -> Result<Vec<WishlistItemView>, DomainError> {
        let wishlist = self.wishlists.load(user_id)?;
        self.render(wishlist)
    }

    pub fn add_to_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistUpdate, DomainError> {
        if self.catalog.find_product(product_id)?.is_none() {
            return Err(DomainError::product_not_found());
        }

        let mut added = false;
        let wishlist = self.wishlists.update(user_id, &mut |wishlist| {
            added = wishlist.add(product_id, Utc::now());
            Ok(())
        })?;
        if added {
            log::info!("User {} saved product {}", user_id, product_id);
        }

        Ok(WishlistUpdate {
            added,
            items: self.render(wishlist)?,
        })
    }

    pub fn remove_from_wishlist(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<WishlistItemView>, DomainError> {
        let wishlist = self.wishlists.update(user_id, &mut |wishlist| {
            wishlist.remove(product_id);
            Ok(())
        })?;
        self.render(wishlist)
    }

    fn render(&self, wishlist: Wishlist) -> Result<Vec<WishlistItemView>, DomainError> {
        let ids: Vec<Uuid> = wishlist.entries().iter().map(|e| e.product_id).collect();
        let products = index_by_id(self.catalog.find_products(&ids)?);

        Ok(wishlist
            .into_entries()
            .into_iter()
            .map(|entry| WishlistItemView {
                product: products.get(&entry.product_id).cloned(),
                product_id: entry.product_id,
                date_added: entry.date_added,
            })
            .collect())
    }
}
