use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{Category, CategoryRef, Product};
use crate::schema::{cart_items, carts, categories, products, wishlist_items, wishlists};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub slug: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub image: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = products)]
#[diesel(belongs_to(CategoryRow, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub description: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category_id: Uuid,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub price: &'a BigDecimal,
    pub original_price: Option<&'a BigDecimal>,
    pub description: &'a str,
    pub images: &'a [String],
    pub sizes: &'a [String],
    pub colors: &'a [String],
    pub category_id: Uuid,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

/// Full overwrite of a category's editable columns.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = categories)]
pub struct CategoryChangeset<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub slug: &'a str,
}

/// Full overwrite of a product's editable columns; a `None` original price
/// clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductChangeset<'a> {
    pub name: &'a str,
    pub price: &'a BigDecimal,
    pub original_price: Option<&'a BigDecimal>,
    pub description: &'a str,
    pub images: &'a [String],
    pub sizes: &'a [String],
    pub colors: &'a [String],
    pub category_id: Uuid,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

impl<'a> From<&'a Category> for CategoryChangeset<'a> {
    fn from(c: &'a Category) -> Self {
        CategoryChangeset {
            name: &c.name,
            image: &c.image,
            slug: &c.slug,
        }
    }
}

impl<'a> From<&'a Product> for ProductChangeset<'a> {
    fn from(p: &'a Product) -> Self {
        ProductChangeset {
            name: &p.name,
            price: &p.price,
            original_price: p.original_price.as_ref(),
            description: &p.description,
            images: &p.images,
            sizes: &p.sizes,
            colors: &p.colors,
            category_id: p.category.id,
            featured: p.featured,
            bestseller: p.bestseller,
            is_new: p.is_new,
            rating: p.rating,
            reviews: p.reviews,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            image: row.image,
            slug: row.slug,
        }
    }
}

impl<'a> From<&'a Category> for NewCategoryRow<'a> {
    fn from(c: &'a Category) -> Self {
        NewCategoryRow {
            id: c.id,
            name: &c.name,
            image: &c.image,
            slug: &c.slug,
        }
    }
}

impl<'a> From<&'a Product> for NewProductRow<'a> {
    fn from(p: &'a Product) -> Self {
        NewProductRow {
            id: p.id,
            name: &p.name,
            price: &p.price,
            original_price: p.original_price.as_ref(),
            description: &p.description,
            images: &p.images,
            sizes: &p.sizes,
            colors: &p.colors,
            category_id: p.category.id,
            featured: p.featured,
            bestseller: p.bestseller,
            is_new: p.is_new,
            rating: p.rating,
            reviews: p.reviews,
        }
    }
}

/// Joins a product row with its category into the domain record.
pub fn into_product(row: ProductRow, category: CategoryRow) -> Product {
    Product {
        id: row.id,
        name: row.name,
        price: row.price,
        original_price: row.original_price,
        description: row.description,
        images: row.images,
        sizes: row.sizes,
        colors: row.colors,
        category: CategoryRef {
            id: category.id,
            name: category.name,
            slug: category.slug,
        },
        featured: row.featured,
        bestseller: row.bestseller,
        is_new: row.is_new,
        rating: row.rating,
        reviews: row.reviews,
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemRow {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItemRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub size: &'a str,
    pub color: &'a str,
    pub quantity: i32,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wishlists)]
pub struct NewWishlistRow {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wishlist_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistItemRow {
    pub product_id: Uuid,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wishlist_items)]
pub struct NewWishlistItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub date_added: DateTime<Utc>,
    pub position: i32,
}
