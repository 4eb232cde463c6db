use uuid::Uuid;

use crate::domain::catalog::{
    Category, CategoryDraft, CategoryPatch, CategoryRef, Product, ProductDraft, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

/// Product and category queries for the storefront pages, plus the admin
/// operations that maintain the catalog.
pub struct CatalogService<C> {
    catalog: C,
}

impl<C: CatalogRepository> CatalogService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog.list_products()
    }

    pub fn list_featured_products(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog.list_featured_products()
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.catalog
            .find_product(id)?
            .ok_or_else(DomainError::product_not_found)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.catalog.list_categories()
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Result<Category, DomainError> {
        self.catalog
            .find_category_by_slug(slug)?
            .ok_or_else(category_not_found)
    }

    pub fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        self.catalog.list_products_by_category(category_id)
    }

    // ── Admin ────────────────────────────────────────────────────────────────

    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let category = self.category_ref(draft.category_id)?;
        let product = Product::from_draft(Uuid::new_v4(), draft, category)?;
        self.catalog.insert_product(&product)?;
        log::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    /// Applies a partial update. Cart and wishlist lines keep pointing at the
    /// product and render the new fields.
    pub fn update_product(&self, id: Uuid, mut patch: ProductPatch) -> Result<Product, DomainError> {
        let mut product = self.get_product(id)?;
        let category_id = patch.category_id.take();
        product.apply(patch);
        if let Some(category_id) = category_id {
            product.category = self.category_ref(category_id)?;
        }
        let product = product.normalized()?;

        if !self.catalog.replace_product(&product)? {
            return Err(DomainError::product_not_found());
        }
        log::info!("Updated product {}", id);
        Ok(product)
    }

    /// Delists a product. Lines already in carts and wishlists stay and
    /// render without product details.
    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.catalog.delete_product(id)? {
            return Err(DomainError::product_not_found());
        }
        log::info!("Deleted product {}", id);
        Ok(())
    }

    pub fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let category = Category::from_draft(Uuid::new_v4(), draft)?;
        self.catalog.insert_category(&category)?;
        log::info!("Created category {} ({})", category.id, category.slug);
        Ok(category)
    }

    pub fn update_category(&self, id: Uuid, patch: CategoryPatch) -> Result<Category, DomainError> {
        let mut category = self
            .catalog
            .find_category(id)?
            .ok_or_else(category_not_found)?;
        category.apply(patch);
        let category = category.normalized()?;

        if !self.catalog.replace_category(&category)? {
            return Err(category_not_found());
        }
        log::info!("Updated category {}", id);
        Ok(category)
    }

    pub fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.catalog.delete_category(id)? {
            return Err(category_not_found());
        }
        log::info!("Deleted category {}", id);
        Ok(())
    }

    fn category_ref(&self, id: Uuid) -> Result<CategoryRef, DomainError> {
        self.catalog
            .find_category(id)?
            .map(|c| c.reference())
            .ok_or_else(|| DomainError::InvalidRequest(format!("category {} does not exist", id)))
    }
}

fn category_not_found() -> DomainError {
    DomainError::NotFound("Category".to_string())
}
