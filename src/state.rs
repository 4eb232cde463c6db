//! Shared handler state.
//!
//! Handlers receive this via `web::Data` and only see the application
//! services, so the storage backend can be swapped without touching them.

use std::sync::Arc;

use thiserror::Error;

use crate::application::{CartService, CatalogService, WishlistService};
use crate::config::{Config, Storage};
use crate::db::{create_pool, DbPool};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CatalogRepository, WishlistRepository};
use crate::infrastructure::{
    DieselCartRepository, DieselCatalogRepository, DieselWishlistRepository,
    InMemoryCartRepository, InMemoryCatalog, InMemoryWishlistRepository,
};
use crate::seed;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create database pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("failed to run migrations: {0}")]
    Migrations(String),
    #[error("failed to seed demo catalog: {0}")]
    Seed(#[from] DomainError),
}

type SharedCatalog = Arc<dyn CatalogRepository>;

pub struct AppState {
    pub catalog: CatalogService<SharedCatalog>,
    pub carts: CartService<SharedCatalog, Arc<dyn CartRepository>>,
    pub wishlists: WishlistService<SharedCatalog, Arc<dyn WishlistRepository>>,
}

impl AppState {
    pub fn new(
        catalog: SharedCatalog,
        carts: Arc<dyn CartRepository>,
        wishlists: Arc<dyn WishlistRepository>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&catalog)),
            carts: CartService::new(Arc::clone(&catalog), carts),
            wishlists: WishlistService::new(catalog, wishlists),
        }
    }

    pub fn in_memory(catalog: InMemoryCatalog) -> Self {
        Self::new(
            Arc::new(catalog),
            Arc::new(InMemoryCartRepository::default()),
            Arc::new(InMemoryWishlistRepository::default()),
        )
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DieselCatalogRepository::new(pool.clone())),
            Arc::new(DieselCartRepository::new(pool.clone())),
            Arc::new(DieselWishlistRepository::new(pool)),
        )
    }

    /// Connects, migrates and optionally seeds the configured backend.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        match &config.storage {
            Storage::Postgres {
                database_url,
                pool_max_size,
            } => {
                let pool = create_pool(database_url, *pool_max_size)?;
                crate::run_migrations(&pool)
                    .map_err(|e| StartupError::Migrations(e.to_string()))?;
                if config.seed_demo_catalog {
                    DieselCatalogRepository::new(pool.clone())
                        .seed_if_empty(&seed::demo_categories(), &seed::demo_products())?;
                }
                log::info!("Using Postgres storage (pool size {})", pool_max_size);
                Ok(Self::postgres(pool))
            }
            Storage::Memory => {
                log::warn!("Using in-memory storage; carts and wishlists are lost on restart");
                let catalog = if config.seed_demo_catalog {
                    InMemoryCatalog::demo()
                } else {
                    InMemoryCatalog::new(vec![], vec![])
                };
                Ok(Self::in_memory(catalog))
            }
        }
    }
}
