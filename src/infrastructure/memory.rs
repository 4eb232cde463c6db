//! Process-local adapters, used when no database is configured and in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::cart::Cart;
use crate::domain::catalog::{Category, Product};
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    CartMutation, CartRepository, CatalogRepository, WishlistMutation, WishlistRepository,
};
use crate::domain::wishlist::Wishlist;
use crate::seed;

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Internal("in-memory store lock poisoned".to_string())
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CatalogData {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl CatalogData {
    fn slug_taken(&self, slug: &str, except: Uuid) -> bool {
        self.categories
            .iter()
            .any(|c| c.slug == slug && c.id != except)
    }
}

/// Catalog held in process memory. Kept sorted the way the Postgres adapter
/// orders rows: by name in byte order, then by id.
#[derive(Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn slug_conflict(slug: &str) -> DomainError {
    DomainError::Conflict(format!("category slug '{}' is already taken", slug))
}

impl InMemoryCatalog {
    pub fn new(mut categories: Vec<Category>, mut products: Vec<Product>) -> Self {
        sort_categories(&mut categories);
        sort_products(&mut products);
        Self {
            data: RwLock::new(CatalogData {
                categories,
                products,
            }),
        }
    }

    pub fn demo() -> Self {
        Self::new(seed::demo_categories(), seed::demo_products())
    }

    fn select(&self, pred: impl Fn(&Product) -> bool) -> Result<Vec<Product>, DomainError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.products.iter().filter(|p| pred(p)).cloned().collect())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogData>, DomainError> {
        self.data.write().map_err(poisoned)
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.select(|p| p.id == id)?.pop())
    }

    fn find_products(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        self.select(|p| ids.contains(&p.id))
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.select(|_| true)
    }

    fn list_featured_products(&self) -> Result<Vec<Product>, DomainError> {
        self.select(|p| p.featured)
    }

    fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        self.select(|p| p.category.id == category_id)
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.data.read().map_err(poisoned)?.categories.clone())
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.categories.iter().find(|c| c.id == id).cloned())
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.categories.iter().find(|c| c.slug == slug).cloned())
    }

    fn insert_product(&self, product: &Product) -> Result<(), DomainError> {
        let mut data = self.write()?;
        if !data.categories.iter().any(|c| c.id == product.category.id) {
            return Err(DomainError::InvalidRequest(format!(
                "category {} does not exist",
                product.category.id
            )));
        }
        if data.products.iter().any(|p| p.id == product.id) {
            return Err(DomainError::Conflict(format!(
                "product {} already exists",
                product.id
            )));
        }
        data.products.push(product.clone());
        sort_products(&mut data.products);
        Ok(())
    }

    fn replace_product(&self, product: &Product) -> Result<bool, DomainError> {
        let mut data = self.write()?;
        let Some(idx) = data.products.iter().position(|p| p.id == product.id) else {
            return Ok(false);
        };
        data.products[idx] = product.clone();
        sort_products(&mut data.products);
        Ok(true)
    }

    fn delete_product(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut data = self.write()?;
        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        Ok(data.products.len() != before)
    }

    fn insert_category(&self, category: &Category) -> Result<(), DomainError> {
        let mut data = self.write()?;
        if data.slug_taken(&category.slug, category.id) {
            return Err(slug_conflict(&category.slug));
        }
        if data.categories.iter().any(|c| c.id == category.id) {
            return Err(DomainError::Conflict(format!(
                "category {} already exists",
                category.id
            )));
        }
        data.categories.push(category.clone());
        sort_categories(&mut data.categories);
        Ok(())
    }

    fn replace_category(&self, category: &Category) -> Result<bool, DomainError> {
        let mut data = self.write()?;
        let Some(idx) = data.categories.iter().position(|c| c.id == category.id) else {
            return Ok(false);
        };
        if data.slug_taken(&category.slug, category.id) {
            return Err(slug_conflict(&category.slug));
        }
        data.categories[idx] = category.clone();
        sort_categories(&mut data.categories);

        let reference = category.reference();
        for product in data.products.iter_mut() {
            if product.category.id == category.id {
                product.category = reference.clone();
            }
        }
        Ok(true)
    }

    fn delete_category(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut data = self.write()?;
        if data.products.iter().any(|p| p.category.id == id) {
            return Err(DomainError::InvalidRequest(
                "Cannot delete category that has products".to_string(),
            ));
        }
        let before = data.categories.len();
        data.categories.retain(|c| c.id != id);
        Ok(data.categories.len() != before)
    }
}

// ── Per-user containers ──────────────────────────────────────────────────────

/// One lock per user, handed out from a registry whose own lock is only held
/// while looking up the slot.
struct UserSlots<T> {
    slots: Mutex<HashMap<Uuid, Arc<Mutex<T>>>>,
}

impl<T> Default for UserSlots<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Default> UserSlots<T> {
    fn slot(&self, user_id: Uuid) -> Result<Arc<Mutex<T>>, DomainError> {
        let mut slots = self.slots.lock().map_err(poisoned)?;
        Ok(Arc::clone(slots.entry(user_id).or_default()))
    }

    fn read(&self, user_id: Uuid) -> Result<T, DomainError> {
        let slot = self.slot(user_id)?;
        let value = slot.lock().map_err(poisoned)?;
        Ok(value.clone())
    }

    /// The mutation works on a copy; the stored value is replaced only on success.
    fn update(
        &self,
        user_id: Uuid,
        mutation: &mut dyn FnMut(&mut T) -> Result<(), DomainError>,
    ) -> Result<T, DomainError> {
        let slot = self.slot(user_id)?;
        let mut stored = slot.lock().map_err(poisoned)?;
        let mut draft = stored.clone();
        mutation(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: UserSlots<Cart>,
}

impl CartRepository for InMemoryCartRepository {
    fn load(&self, user_id: Uuid) -> Result<Cart, DomainError> {
        self.carts.read(user_id)
    }

    fn update(&self, user_id: Uuid, mutation: CartMutation<'_>) -> Result<Cart, DomainError> {
        self.carts.update(user_id, mutation)
    }
}

#[derive(Default)]
pub struct InMemoryWishlistRepository {
    wishlists: UserSlots<Wishlist>,
}

impl WishlistRepository for InMemoryWishlistRepository {
    fn load(&self, user_id: Uuid) -> Result<Wishlist, DomainError> {
        self.wishlists.read(user_id)
    }

    fn update(
        &self,
        user_id: Uuid,
        mutation: WishlistMutation<'_>,
    ) -> Result<Wishlist, DomainError> {
        self.wishlists.update(user_id, mutation)
    }
}
