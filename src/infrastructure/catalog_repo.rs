use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{Category, Product};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{categories, products};

use super::models::{
    into_product, CategoryChangeset, CategoryRow, NewCategoryRow, NewProductRow, ProductChangeset,
    ProductRow,
};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts the given catalog when the products table is empty.
    /// Returns the number of products written.
    pub fn seed_if_empty(
        &self,
        new_categories: &[Category],
        new_products: &[Product],
    ) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let existing: i64 = products::table.count().get_result(conn)?;
            if existing > 0 {
                log::info!("Catalog already holds {} products, skipping seed", existing);
                return Ok(0);
            }

            let category_rows: Vec<NewCategoryRow> =
                new_categories.iter().map(NewCategoryRow::from).collect();
            diesel::insert_into(categories::table)
                .values(&category_rows)
                .on_conflict_do_nothing()
                .execute(conn)?;

            let product_rows: Vec<NewProductRow> =
                new_products.iter().map(NewProductRow::from).collect();
            let written = diesel::insert_into(products::table)
                .values(&product_rows)
                .execute(conn)?;

            log::info!(
                "Seeded {} categories and {} products",
                category_rows.len(),
                written
            );
            Ok(written)
        })
    }
}

/// Maps a unique violation on `categories.slug` to `Conflict`.
fn slug_taken(slug: &str) -> impl FnOnce(DieselError) -> DomainError + '_ {
    move |err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DomainError::Conflict(format!("category slug '{}' is already taken", slug))
        }
        other => other.into(),
    }
}

/// Maps a violation of `products.category_id` to `InvalidRequest`.
fn dangling_category(category_id: Uuid) -> impl FnOnce(DieselError) -> DomainError {
    move |err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DomainError::InvalidRequest(format!("category {} does not exist", category_id))
        }
        other => other.into(),
    }
}

fn category_in_use() -> DomainError {
    DomainError::InvalidRequest("Cannot delete category that has products".to_string())
}

fn join_rows(rows: Vec<(ProductRow, CategoryRow)>) -> Vec<Product> {
    rows.into_iter()
        .map(|(product, category)| into_product(product, category))
        .collect()
}

impl CatalogRepository for DieselCatalogRepository {
    fn find_product(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id))
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .first(&mut conn)
            .optional()?;

        Ok(row.map(|(product, category)| into_product(product, category)))
    }

    fn find_products(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut conn = self.pool.get()?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(products::id.eq_any(ids))
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .load(&mut conn)?;

        Ok(join_rows(rows))
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .inner_join(categories::table)
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .order((products::name.asc(), products::id.asc()))
            .load(&mut conn)?;

        Ok(join_rows(rows))
    }

    fn list_featured_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(products::featured.eq(true))
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .order((products::name.asc(), products::id.asc()))
            .load(&mut conn)?;

        Ok(join_rows(rows))
    }

    fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .inner_join(categories::table)
            .filter(products::category_id.eq(category_id))
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .order((products::name.asc(), products::id.asc()))
            .load(&mut conn)?;

        Ok(join_rows(rows))
    }

    fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = categories::table
            .select(CategoryRow::as_select())
            .order((categories::name.asc(), categories::id.asc()))
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = categories::table
            .find(id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Category::from))
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = categories::table
            .filter(categories::slug.eq(slug))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Category::from))
    }

    fn insert_product(&self, product: &Product) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(products::table)
            .values(&NewProductRow::from(product))
            .execute(&mut conn)
            .map_err(dangling_category(product.category.id))?;
        Ok(())
    }

    fn replace_product(&self, product: &Product) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(products::table.find(product.id))
            .set((
                ProductChangeset::from(product),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .map_err(dangling_category(product.category.id))?;
        Ok(updated > 0)
    }

    fn delete_product(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn insert_category(&self, category: &Category) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(categories::table)
            .values(&NewCategoryRow::from(category))
            .execute(&mut conn)
            .map_err(slug_taken(&category.slug))?;
        Ok(())
    }

    fn replace_category(&self, category: &Category) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(categories::table.find(category.id))
            .set(CategoryChangeset::from(category))
            .execute(&mut conn)
            .map_err(slug_taken(&category.slug))?;
        Ok(updated > 0)
    }

    fn delete_category(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let in_use: i64 = products::table
                .filter(products::category_id.eq(id))
                .count()
                .get_result(conn)?;
            if in_use > 0 {
                return Err(category_in_use());
            }

            // The foreign key catches a product inserted after the count.
            let deleted = diesel::delete(categories::table.find(id))
                .execute(conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        category_in_use()
                    }
                    other => other.into(),
                })?;
            Ok(deleted > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::DieselCatalogRepository;
    use crate::domain::catalog::Category;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CatalogRepository;
    use crate::infrastructure::memory::InMemoryCatalog;
    use crate::infrastructure::test_db::setup_db;
    use crate::seed;

    fn trail() -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Trail".to_string(),
            image: "/images/categories/trail.jpg".to_string(),
            slug: "trail".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn seed_is_applied_once() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        let written = repo
            .seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("seed failed");
        assert_eq!(written, seed::demo_products().len());

        let again = repo
            .seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("second seed failed");
        assert_eq!(again, 0);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn find_product_roundtrips_arrays_and_decimals() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        repo.seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("seed failed");

        let expected = seed::demo_products().remove(3);
        let found = repo
            .find_product(expected.id)
            .expect("find failed")
            .expect("product should exist");

        assert_eq!(found, expected);
        assert!(repo
            .find_product(Uuid::new_v4())
            .expect("find failed")
            .is_none());
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn listing_queries_filter_and_sort() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        repo.seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("seed failed");

        let all = repo.list_products().expect("list failed");
        assert_eq!(all.len(), seed::demo_products().len());

        let featured = repo.list_featured_products().expect("featured failed");
        assert!(featured.iter().all(|p| p.featured));

        let casual = repo
            .find_category_by_slug("casual")
            .expect("lookup failed")
            .expect("category should exist");
        let casual_products = repo
            .list_products_by_category(casual.id)
            .expect("by category failed");
        assert_eq!(casual_products.len(), 2);

        let ids: Vec<Uuid> = casual_products.iter().map(|p| p.id).collect();
        assert_eq!(repo.find_products(&ids).expect("find many failed").len(), 2);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn listing_order_matches_in_memory_catalog() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        let categories = seed::demo_categories();
        let mut products = seed::demo_products();
        for (product, name) in products
            .iter_mut()
            .zip(["adidas Samba", "Zoom Fly", "Air Force 1", "Zoom Fly", "air max", "Ärmel"])
        {
            product.name = name.to_string();
        }
        repo.seed_if_empty(&categories, &products)
            .expect("seed failed");

        let from_db = repo.list_products().expect("list failed");
        let from_memory = InMemoryCatalog::new(categories, products)
            .list_products()
            .expect("list failed");
        assert_eq!(from_db, from_memory);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn product_writes_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        repo.seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("seed failed");

        let mut product = seed::demo_products().remove(0);
        product.id = Uuid::new_v4();
        product.name = "Air Max Plus".to_string();
        repo.insert_product(&product).expect("insert failed");
        assert_eq!(
            repo.find_product(product.id).expect("find failed"),
            Some(product.clone())
        );

        product.price = BigDecimal::new(9999.into(), 2);
        product.original_price = None;
        assert!(repo.replace_product(&product).expect("replace failed"));
        assert_eq!(
            repo.find_product(product.id).expect("find failed"),
            Some(product.clone())
        );

        assert!(repo.delete_product(product.id).expect("delete failed"));
        assert!(!repo.delete_product(product.id).expect("second delete failed"));
        assert!(!repo.replace_product(&product).expect("replace failed"));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn category_writes_enforce_slug_and_usage() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);
        repo.seed_if_empty(&seed::demo_categories(), &seed::demo_products())
            .expect("seed failed");

        let trail = trail();
        repo.insert_category(&trail).expect("insert failed");
        let mut clash = self::trail();
        clash.slug = "running".to_string();
        assert!(matches!(
            repo.insert_category(&clash).unwrap_err(),
            DomainError::Conflict(_)
        ));

        let mut casual = repo
            .find_category_by_slug("casual")
            .expect("lookup failed")
            .expect("category should exist");
        casual.name = "Lifestyle".to_string();
        assert!(repo.replace_category(&casual).expect("replace failed"));
        let renamed = repo
            .list_products_by_category(casual.id)
            .expect("by category failed");
        assert!(renamed.iter().all(|p| p.category.name == "Lifestyle"));

        assert!(matches!(
            repo.delete_category(casual.id).unwrap_err(),
            DomainError::InvalidRequest(_)
        ));
        assert!(repo.delete_category(trail.id).expect("delete failed"));
        assert_eq!(repo.find_category(trail.id).expect("find failed"), None);
    }
}
