pub mod cart_repo;
pub mod catalog_repo;
pub mod memory;
pub mod models;
pub mod wishlist_repo;

#[cfg(test)]
pub(crate) mod test_db;

pub use cart_repo::DieselCartRepository;
pub use catalog_repo::DieselCatalogRepository;
pub use memory::{InMemoryCartRepository, InMemoryCatalog, InMemoryWishlistRepository};
pub use wishlist_repo::DieselWishlistRepository;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Display position of the `idx`-th line of a container.
fn position(idx: usize) -> Result<i32, DomainError> {
    i32::try_from(idx).map_err(|_| DomainError::Internal(format!("position {} out of range", idx)))
}
