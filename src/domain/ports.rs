use std::sync::Arc;

use uuid::Uuid;

use super::cart::Cart;
use super::catalog::{Category, Product};
use super::errors::DomainError;
use super::wishlist::Wishlist;

/// Product and category storage.
///
/// Listings are ordered by name, compared byte-wise, with the id breaking ties.
pub trait CatalogRepository: Send + Sync + 'static {
    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    /// Products for the given ids; unknown ids are skipped.
    fn find_products(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    fn list_featured_products(&self) -> Result<Vec<Product>, DomainError>;
    fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError>;
    fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;

    fn insert_product(&self, product: &Product) -> Result<(), DomainError>;
    /// Overwrites a stored product. Returns false when it no longer exists.
    fn replace_product(&self, product: &Product) -> Result<bool, DomainError>;
    fn delete_product(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Fails with `Conflict` when the slug is taken.
    fn insert_category(&self, category: &Category) -> Result<(), DomainError>;
    /// Overwrites a stored category; products see the new name and slug.
    /// Fails with `Conflict` when the slug is taken by another category.
    fn replace_category(&self, category: &Category) -> Result<bool, DomainError>;
    /// Fails with `InvalidRequest` while products still reference the category.
    fn delete_category(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Mutation applied to a single user's cart under that user's lock.
pub type CartMutation<'a> = &'a mut dyn FnMut(&mut Cart) -> Result<(), DomainError>;

/// Mutation applied to a single user's wishlist under that user's lock.
pub type WishlistMutation<'a> = &'a mut dyn FnMut(&mut Wishlist) -> Result<(), DomainError>;

/// Per-user cart storage.
///
/// Both methods create an empty cart on first access. `update` runs the
/// read-modify-write atomically for the user: concurrent updates of the same
/// cart are serialised, and nothing is persisted when the mutation fails.
pub trait CartRepository: Send + Sync + 'static {
    fn load(&self, user_id: Uuid) -> Result<Cart, DomainError>;
    fn update(&self, user_id: Uuid, mutation: CartMutation<'_>) -> Result<Cart, DomainError>;
}

/// Per-user wishlist storage, with the same guarantees as [`CartRepository`].
pub trait WishlistRepository: Send + Sync + 'static {
    fn load(&self, user_id: Uuid) -> Result<Wishlist, DomainError>;
    fn update(&self, user_id: Uuid, mutation: WishlistMutation<'_>)
        -> Result<Wishlist, DomainError>;
}

// Shared adapters: one catalog backs all three services.

impl<T: CatalogRepository + ?Sized> CatalogRepository for Arc<T> {
    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        (**self).find_product(id)
    }

    fn find_products(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        (**self).find_products(ids)
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        (**self).list_products()
    }

    fn list_featured_products(&self) -> Result<Vec<Product>, DomainError> {
        (**self).list_featured_products()
    }

    fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        (**self).list_products_by_category(category_id)
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        (**self).list_categories()
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        (**self).find_category(id)
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        (**self).find_category_by_slug(slug)
    }

    fn insert_product(&self, product: &Product) -> Result<(), DomainError> {
        (**self).insert_product(product)
    }

    fn replace_product(&self, product: &Product) -> Result<bool, DomainError> {
        (**self).replace_product(product)
    }

    fn delete_product(&self, id: Uuid) -> Result<bool, DomainError> {
        (**self).delete_product(id)
    }

    fn insert_category(&self, category: &Category) -> Result<(), DomainError> {
        (**self).insert_category(category)
    }

    fn replace_category(&self, category: &Category) -> Result<bool, DomainError> {
        (**self).replace_category(category)
    }

    fn delete_category(&self, id: Uuid) -> Result<bool, DomainError> {
        (**self).delete_category(id)
    }
}

impl<T: CartRepository + ?Sized> CartRepository for Arc<T> {
    fn load(&self, user_id: Uuid) -> Result<Cart, DomainError> {
        (**self).load(user_id)
    }

    fn update(&self, user_id: Uuid, mutation: CartMutation<'_>) -> Result<Cart, DomainError> {
        (**self).update(user_id, mutation)
    }
}

impl<T: WishlistRepository + ?Sized> WishlistRepository for Arc<T> {
    fn load(&self, user_id: Uuid) -> Result<Wishlist, DomainError> {
        (**self).load(user_id)
    }

    fn update(
        &self,
        user_id: Uuid,
        mutation: WishlistMutation<'_>,
    ) -> Result<Wishlist, DomainError> {
        (**self).update(user_id, mutation)
    }
}
